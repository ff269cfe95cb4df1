//! Font descriptor for text measurement and rendering.

/// Font configuration for a text element.
///
/// Built from an element style (`font`, `fontType`, `fontSize`) with the
/// configured fallbacks, then handed to the renderer before any measuring or
/// drawing so both use the same metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Georgia", "JetBrains Mono")
    pub family: String,

    /// Space-separated style and weight words (e.g., "bold", "italic bold").
    /// Empty means regular.
    pub variant: String,

    /// Absolute size in pixels
    pub size: f64,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, variant: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            variant: variant.into(),
            size,
        }
    }

    /// Converts this descriptor to a Pango font description string.
    ///
    /// Format: "Family Variant Sizepx"
    /// Example: "Sans Bold 20px" or "Georgia Italic Bold 32px"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        parts.extend(
            self.variant
                .split_whitespace()
                .filter(|word| !word.eq_ignore_ascii_case("normal"))
                .map(capitalize_first),
        );

        parts.push(format!("{}px", self.size.round() as i64));
        parts.join(" ")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

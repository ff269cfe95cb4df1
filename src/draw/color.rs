//! RGBA color type and `#RGB` / `#RRGGBB` hex parsing.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use quotecanvas::draw::Color;
/// let red = Color::from_hex("#f00").unwrap();
/// assert_eq!(red, Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 });
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#RGB` or `#RRGGBB` (case-insensitive). Anything else, including
    /// named colors and `#RRGGBBAA`, is rejected.
    pub fn from_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let (r, g, b) = match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| {
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    v * 16 + v
                });
                (channels.next()?, channels.next()?, channels.next()?)
            }
            6 => (
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            ),
            _ => return None,
        };

        Some(Self::from_rgb8(r, g, b))
    }

    /// Converts 0-255 channels to a fully opaque color.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

/// Returns true for `#RGB` and `#RRGGBB` hex strings.
pub fn is_hex_color(input: &str) -> bool {
    Color::from_hex(input).is_some()
}

/// Predefined white color, the default selection outline.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color, the default text fill.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

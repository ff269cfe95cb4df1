//! Drawn, addressable elements and the registry that owns them.

pub mod registry;
pub mod style;

pub use registry::ElementRegistry;
pub use style::{Outline, Shadow, Style};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::draw::ImageHandle;
use crate::draw::color::is_hex_color;
use crate::util::{Point, Rect};

/// What an element is; fixed when the element is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Shape,
    Image,
    Text,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Shape => "shape",
            ElementKind::Image => "image",
            ElementKind::Text => "text",
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    /// Fill color of a shape, as the `#RGB`/`#RRGGBB` string it was drawn with
    Color(String),
    /// Decoded pixels of an image
    Image(ImageHandle),
    /// Source string of a text block
    Text(String),
}

/// A drawn element.
///
/// Serializes to the same keys the `element` schema describes, with the kind
/// under `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: u64,
    pub zindex: u64,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub resource: Resource,
    pub style: Style,
    /// Fixed elements cannot be picked up for dragging, but still block the
    /// pointer from reaching anything underneath.
    pub fixed: bool,
}

impl Element {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Writes the patch into this element.
    ///
    /// `id`, `zindex` and `type` are never patched. A `resource` must keep the
    /// kind's shape: a hex color for shapes, a string for text; images cannot
    /// swap their pixels through a patch.
    pub fn apply(&mut self, patch: &ElementPatch) -> Result<(), String> {
        if let Some(resource) = &patch.resource {
            self.resource = self.patched_resource(resource)?;
        }

        let scalars = [
            (&mut self.x, patch.x),
            (&mut self.y, patch.y),
            (&mut self.width, patch.width),
            (&mut self.height, patch.height),
        ];
        for (slot, value) in scalars {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(style) = &patch.style {
            self.style.merge(style);
        }
        if let Some(fixed) = patch.fixed {
            self.fixed = fixed;
        }
        Ok(())
    }

    fn patched_resource(&self, value: &Value) -> Result<Resource, String> {
        match (self.kind, value.as_str()) {
            (ElementKind::Shape, Some(color)) if is_hex_color(color) => {
                Ok(Resource::Color(color.to_string()))
            }
            (ElementKind::Text, Some(text)) => Ok(Resource::Text(text.to_string())),
            (kind, _) => Err(format!(
                "resource {value} does not fit a {} element",
                kind.as_str()
            )),
        }
    }
}

/// Typed form of a partial update, read from the validated JSON view.
///
/// Keys the element does not store (and `id`/`zindex`/`type`) are dropped.
/// `None` means the key was absent; a supplied `null` must still fit the
/// field, so `"fixed": null` fails to deserialize.
#[derive(Debug, Default, Deserialize)]
pub struct ElementPatch {
    #[serde(default, deserialize_with = "supplied")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "supplied")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "supplied")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "supplied")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "supplied")]
    pub resource: Option<Value>,
    #[serde(default, deserialize_with = "supplied")]
    pub style: Option<Style>,
    #[serde(default, deserialize_with = "supplied")]
    pub fixed: Option<bool>,
}

fn supplied<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_element() -> Element {
        Element {
            id: 3,
            zindex: 4,
            kind: ElementKind::Text,
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 30.0,
            resource: Resource::Text("hello".into()),
            style: Style {
                color: Some("#000".into()),
                ..Style::default()
            },
            fixed: false,
        }
    }

    fn patch(value: Value) -> ElementPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn serializes_kind_as_type() {
        let value = serde_json::to_value(text_element()).unwrap();
        assert_eq!(value["type"], json!("text"));
        assert_eq!(value["resource"], json!("hello"));
        assert_eq!(value["style"], json!({ "color": "#000" }));
    }

    #[test]
    fn apply_writes_geometry_style_and_resource() {
        let mut element = text_element();
        element
            .apply(&patch(json!({
                "x": 50, "height": 60, "resource": "bye",
                "style": { "color": "#fff" }, "fixed": true
            })))
            .unwrap();

        assert_eq!(element.x, 50.0);
        assert_eq!(element.y, 20.0);
        assert_eq!(element.height, 60.0);
        assert_eq!(element.resource, Resource::Text("bye".into()));
        assert_eq!(element.style.color.as_deref(), Some("#fff"));
        assert!(element.fixed);
    }

    #[test]
    fn identity_fields_are_not_patched() {
        let mut element = text_element();
        element
            .apply(&patch(json!({ "id": 9, "zindex": 99, "type": "shape" })))
            .unwrap();
        assert_eq!((element.id, element.zindex, element.kind), (3, 4, ElementKind::Text));
    }

    #[test]
    fn mismatched_resource_is_refused() {
        let mut shape = text_element();
        shape.kind = ElementKind::Shape;
        shape.resource = Resource::Color("#123".into());

        assert!(shape.apply(&patch(json!({ "resource": "blue" }))).is_err());
        assert!(shape.apply(&patch(json!({ "resource": 7 }))).is_err());
        shape.apply(&patch(json!({ "resource": "#abcdef" }))).unwrap();
        assert_eq!(shape.resource, Resource::Color("#abcdef".into()));
    }

    #[test]
    fn supplied_null_is_kept_apart_from_an_absent_key() {
        assert_eq!(patch(json!({ "resource": null })).resource, Some(Value::Null));
        assert!(patch(json!({})).resource.is_none());
        assert!(serde_json::from_value::<ElementPatch>(json!({ "fixed": null })).is_err());

        let mut element = text_element();
        assert!(element.apply(&patch(json!({ "resource": null }))).is_err());
    }
}

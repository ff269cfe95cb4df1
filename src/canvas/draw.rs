use std::path::Path;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::images::PendingImage;
use super::{Canvas, ImageReady, Position, paint};
use crate::draw::image::has_image_extension;
use crate::draw::{Renderer, wrap_words};
use crate::element::registry::RegistryScope;
use crate::element::{Element, ElementKind, Resource, Style};
use crate::error::CanvasError;
use crate::schema::{self, SchemaError, SchemaName, TypeTag};
use crate::util::{Point, Size};

impl<R: Renderer> Canvas<R> {
    /// Fills the whole surface with `color` as a fixed shape.
    pub fn draw_background(&mut self, color: &str) -> Result<Element, CanvasError> {
        self.check_arg("color", TypeTag::Color, &Value::from(color))?;

        let surface = self.surface;
        Ok(self.create_and_paint(
            ElementKind::Shape,
            Point::default(),
            Size::new(surface.width, surface.height),
            Resource::Color(color.to_string()),
            Style::default(),
            true,
        ))
    }

    /// Draws a filled rectangle.
    pub fn draw_rect(
        &mut self,
        color: &str,
        position: Position,
        size: Size,
        fixed: bool,
    ) -> Result<Element, CanvasError> {
        self.check_arg("color", TypeTag::Color, &Value::from(color))?;
        self.check_schema(&position, SchemaName::Element)?;
        self.check_schema(&size, SchemaName::Element)?;

        let origin = position.resolve(self.surface, size.width, size.height);
        Ok(self.create_and_paint(
            ElementKind::Shape,
            origin,
            size,
            Resource::Color(color.to_string()),
            Style::default(),
            fixed,
        ))
    }

    /// Starts loading `path` as a fixed image covering the whole surface.
    pub fn draw_background_image(
        &mut self,
        path: impl AsRef<Path>,
        on_ready: Option<ImageReady>,
    ) -> Result<(), CanvasError> {
        let path = path.as_ref();
        self.check_image_path(path)?;

        let surface = self.surface;
        self.request_image(
            path,
            PendingImage {
                style: Style::default(),
                position: Position::at(0.0, 0.0),
                size: Size::new(surface.width, surface.height),
                fixed: true,
                on_ready,
            },
        )
    }

    /// Starts loading `path` as an image element.
    ///
    /// Returns once the request is queued. The element is created, painted and
    /// handed to `on_ready` only when the decode finishes and the result is
    /// dispatched; until then it is not part of [`Canvas::elements`].
    pub fn draw_image(
        &mut self,
        path: impl AsRef<Path>,
        style: Style,
        position: Position,
        size: Size,
        on_ready: Option<ImageReady>,
        fixed: bool,
    ) -> Result<(), CanvasError> {
        let path = path.as_ref();
        self.check_image_path(path)?;
        self.check_schema(&style, SchemaName::Style)?;
        self.check_schema(&position, SchemaName::Element)?;
        self.check_schema(&size, SchemaName::Element)?;

        self.request_image(
            path,
            PendingImage {
                style,
                position,
                size,
                fixed,
                on_ready,
            },
        )
    }

    /// Lays out and draws a text block.
    ///
    /// Without `max_width` the block is as wide as the text on one line. The
    /// stored style gets the `lineHeight` and `textAlign` it was laid out with,
    /// so later repaints and patches see the same values.
    pub fn draw_text(
        &mut self,
        text: &str,
        style: Style,
        position: Position,
        max_width: Option<f64>,
        fixed: bool,
    ) -> Result<Element, CanvasError> {
        self.check_arg("text", TypeTag::Str, &Value::from(text))?;
        self.check_schema(&style, SchemaName::Style)?;
        self.check_schema(&position, SchemaName::Element)?;
        if let Some(width) = max_width {
            self.check_arg("maxWidth", TypeTag::Nat, &Value::from(width))?;
        }

        let mut style = style;
        let font = paint::font_for(&style, &self.text);
        if style.line_height.is_none() {
            style.line_height = Some(font.size + self.text.line_spacing);
        }
        if style.text_align.is_none() {
            style.text_align = Some(self.text.default_align);
        }
        let line_height = style.line_height.unwrap_or_default();

        self.renderer.set_font(&font);
        let width = match max_width {
            Some(width) => width,
            None => self.auto_text_width(text),
        };
        let line_count = wrap_words(&mut self.renderer, text, width).len();
        let height = line_count as f64 * line_height + line_height / 2.0;

        let origin = position.resolve(self.surface, width, height);
        Ok(self.create_and_paint(
            ElementKind::Text,
            origin,
            Size::new(width, height),
            Resource::Text(text.to_string()),
            style,
            fixed,
        ))
    }

    /// One-line width of `text` under the current font, rounded down plus one
    /// pixel; falls back to the surface width minus the configured margin when
    /// the text would not fit.
    fn auto_text_width(&mut self, text: &str) -> f64 {
        let width = self.renderer.measure_text(text).floor() + 1.0;
        if width > self.surface.width {
            (self.surface.width - self.text.auto_width_margin).max(0.0)
        } else {
            width
        }
    }

    fn create_and_paint(
        &mut self,
        kind: ElementKind,
        origin: Point,
        size: Size,
        resource: Resource,
        style: Style,
        fixed: bool,
    ) -> Element {
        let element = self
            .registry
            .create(kind, origin, size, resource, style, fixed)
            .clone();
        self.paint(&element);
        element
    }

    fn check_image_path(&self, path: &Path) -> Result<(), CanvasError> {
        if has_image_extension(path, &self.image_extensions) {
            Ok(())
        } else {
            debug!("Rejected image path {}", path.display());
            Err(CanvasError::InvalidArgument(format!(
                "{} is not an image path (expected one of: {})",
                path.display(),
                self.image_extensions.join(", ")
            )))
        }
    }

    /// Checks the JSON view of `value` against `schema`.
    pub(crate) fn check_schema<T: Serialize>(
        &self,
        value: &T,
        schema: SchemaName,
    ) -> Result<(), CanvasError> {
        let view = serde_json::to_value(value)?;
        schema::check(&view, schema, &self.scope()).map_err(|err| {
            debug!("Rejected {} argument: {}", schema.name(), err);
            CanvasError::from(err)
        })
    }

    fn check_arg(&self, name: &str, tag: TypeTag, value: &Value) -> Result<(), CanvasError> {
        if schema::is_of_type(tag, value, &self.scope()) {
            return Ok(());
        }
        debug!("Rejected argument `{}`: {} is not a {}", name, value, tag.name());
        Err(SchemaError::InvalidField {
            path: name.to_string(),
            expected: tag.name(),
        }
        .into())
    }

    pub(crate) fn scope(&self) -> RegistryScope<'_> {
        RegistryScope {
            registry: &self.registry,
            surface: self.surface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, RecordingRenderer};
    use crate::util::SurfaceSize;

    fn canvas() -> Canvas<RecordingRenderer> {
        Canvas::with_defaults(RecordingRenderer::default(), SurfaceSize::new(800.0, 600.0))
    }

    #[test]
    fn background_covers_the_surface_and_is_fixed() {
        let mut canvas = canvas();
        let bg = canvas.draw_background("#123456").unwrap();
        assert_eq!((bg.x, bg.y, bg.width, bg.height), (0.0, 0.0, 800.0, 600.0));
        assert!(bg.fixed);
        assert!(canvas.draw_background("navy").is_err());
        assert_eq!(canvas.elements().len(), 1);
    }

    #[test]
    fn rect_with_missing_coordinate_is_centered_on_that_axis() {
        let mut canvas = canvas();
        let rect = canvas
            .draw_rect(
                "#f00",
                Position { x: Some(10.0), y: None },
                Size::new(100.0, 50.0),
                false,
            )
            .unwrap();
        assert_eq!((rect.x, rect.y), (10.0, 275.0));
    }

    #[test]
    fn rect_outside_surface_is_rejected() {
        let mut canvas = canvas();
        let err = canvas
            .draw_rect("#f00", Position::at(801.0, 0.0), Size::new(1.0, 1.0), false)
            .unwrap_err();
        assert!(err.is_validation());
        let err = canvas
            .draw_rect("#f00", Position::at(0.0, 0.0), Size::new(1.5, 1.0), false)
            .unwrap_err();
        assert!(err.is_validation());
        let err = canvas
            .draw_rect("#f00", Position::at(f64::NAN, 0.0), Size::new(1.0, 1.0), false)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(canvas.elements().is_empty());
    }

    #[test]
    fn text_fills_line_height_and_alignment_defaults() {
        let mut canvas = canvas();
        let text = canvas
            .draw_text("hello world", Style::default(), Position::at(0.0, 0.0), Some(60.0), false)
            .unwrap();
        assert_eq!(text.style.line_height, Some(20.0));
        assert_eq!(text.style.text_align, Some(crate::draw::Align::Center));
        // two lines of 20px plus half a line
        assert_eq!((text.width, text.height), (60.0, 50.0));
    }

    #[test]
    fn text_auto_width_falls_back_to_surface_margin() {
        let mut canvas = canvas();
        let long = "word ".repeat(40);
        let text = canvas
            .draw_text(long.trim(), Style::default(), Position::at(0.0, 0.0), None, false)
            .unwrap();
        assert_eq!(text.width, 770.0);

        let short = canvas
            .draw_text("abc", Style::default(), Position::at(0.0, 0.0), None, false)
            .unwrap();
        assert_eq!(short.width, 31.0);
    }

    #[test]
    fn text_uses_style_font() {
        let mut canvas = canvas();
        let style: Style = serde_json::from_value(serde_json::json!({
            "font": "Georgia", "fontType": "bold", "fontSize": 32
        }))
        .unwrap();
        let text = canvas
            .draw_text("quote", style, Position::at(0.0, 0.0), None, false)
            .unwrap();
        assert_eq!(text.style.line_height, Some(42.0));
        assert!(canvas.renderer().commands().contains(&DrawCommand::SetFont {
            font: "Georgia Bold 32px".into()
        }));
    }

    #[test]
    fn empty_text_and_bad_style_are_rejected() {
        let mut canvas = canvas();
        assert!(
            canvas
                .draw_text("", Style::default(), Position::centered(), None, false)
                .is_err()
        );
        let style = Style {
            color: Some("red".into()),
            ..Style::default()
        };
        let err = canvas
            .draw_text("hi", style, Position::centered(), None, false)
            .unwrap_err();
        assert!(matches!(
            err,
            CanvasError::Validation(SchemaError::InvalidField { ref path, .. }) if path == "color"
        ));
        assert!(canvas.elements().is_empty());
    }

    #[test]
    fn image_needs_extension_and_loader() {
        let mut canvas = canvas();
        let err = canvas
            .draw_image("notes.txt", Style::default(), Position::centered(), Size::new(10.0, 10.0), None, false)
            .unwrap_err();
        assert!(matches!(err, CanvasError::InvalidArgument(_)));

        let err = canvas
            .draw_image("photo.png", Style::default(), Position::centered(), Size::new(10.0, 10.0), None, false)
            .unwrap_err();
        assert!(matches!(err, CanvasError::LoaderUnavailable));
    }
}

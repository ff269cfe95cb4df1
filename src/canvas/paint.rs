//! Full repaint and per-kind element painters.

use log::debug;

use super::Canvas;
use crate::config::TextConfig;
use crate::draw::color::{BLACK, WHITE};
use crate::draw::{Color, FontDescriptor, Renderer, TextLayout, TextPaint, layout_text};
use crate::element::{Element, Resource, Style};

impl<R: Renderer> Canvas<R> {
    /// Clears the surface and paints every element in ascending z-index order.
    ///
    /// This is the only repaint path; state is never touched.
    pub fn redraw(&mut self) {
        self.renderer.clear(self.surface.width, self.surface.height);
        for element in self.registry.paint_order() {
            paint_element(&mut self.renderer, element, &self.text);
        }
    }

    pub(crate) fn paint(&mut self, element: &Element) {
        paint_element(&mut self.renderer, element, &self.text);
    }

    /// Strokes the transient selection outline around `element`.
    pub(crate) fn draw_selection(&mut self, element: &Element) {
        let color = Color::from_hex(&self.selection.color).unwrap_or(WHITE);
        self.renderer
            .stroke_rect(element.bounds(), color, self.selection.line_width);
    }

    /// Repaints everything, then outlines the element with `id` if it exists.
    pub(crate) fn redraw_with_selection(&mut self, id: u64) {
        self.redraw();
        if let Some(element) = self.registry.get(id).cloned() {
            self.draw_selection(&element);
        }
    }
}

/// Dispatches on the element kind.
fn paint_element<R: Renderer>(renderer: &mut R, element: &Element, text: &TextConfig) {
    match &element.resource {
        Resource::Color(hex) => {
            let color = Color::from_hex(hex).unwrap_or(BLACK);
            renderer.fill_rect(element.bounds(), color);
        }
        Resource::Image(image) => {
            let shadow = element.style.shadow_paint();
            renderer.draw_image(image, element.bounds(), shadow.as_ref());
        }
        Resource::Text(source) => {
            let dropped = paint_text_block(renderer, element, source, text);
            if dropped > 0 {
                debug!(
                    "Element {}: {} line(s) fall outside its height and were not drawn",
                    element.id, dropped
                );
            }
        }
    }
}

/// Font for a text style, filling gaps from the config.
pub(crate) fn font_for(style: &Style, text: &TextConfig) -> FontDescriptor {
    FontDescriptor::new(
        style.font.as_deref().unwrap_or(&text.font_family),
        style.font_type.as_deref().unwrap_or_default(),
        style.font_size.unwrap_or(text.font_size),
    )
}

/// Lays out and draws a text element inside its box.
///
/// Lines whose baseline lies further below the top edge than the element is
/// tall are skipped; returns how many.
pub(crate) fn paint_text_block<R: Renderer>(
    renderer: &mut R,
    element: &Element,
    source: &str,
    text: &TextConfig,
) -> usize {
    let style = &element.style;
    let font = font_for(style, text);
    renderer.set_font(&font);

    let fill = Color::from_hex(style.color.as_deref().unwrap_or(&text.default_color))
        .unwrap_or(BLACK);
    let paint = TextPaint {
        fill,
        shadow: style.shadow_paint(),
        outline: style.outline_paint(),
    };

    let params = TextLayout {
        max_width: element.width,
        line_height: style
            .line_height
            .unwrap_or(font.size + text.line_spacing),
        align: style.text_align.unwrap_or(text.default_align),
        origin: element.origin(),
    };
    let lines = layout_text(renderer, source, &params);

    let mut drawn = 0;
    for line in &lines {
        if line.y - element.y > element.height {
            break;
        }
        renderer.draw_text_line(&line.text, line.x, line.y, &paint);
        drawn += 1;
    }
    lines.len() - drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, RecordingRenderer};
    use crate::element::ElementKind;

    fn text_element(source: &str, width: f64, height: f64) -> Element {
        Element {
            id: 0,
            zindex: 1,
            kind: ElementKind::Text,
            x: 0.0,
            y: 0.0,
            width,
            height,
            resource: Resource::Text(source.into()),
            style: Style {
                line_height: Some(20.0),
                text_align: Some(crate::draw::Align::Left),
                ..Style::default()
            },
            fixed: false,
        }
    }

    fn drawn_lines(renderer: &RecordingRenderer) -> Vec<(String, f64)> {
        renderer
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, y, .. } => Some((text.clone(), *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lines_below_the_box_are_dropped() {
        let mut renderer = RecordingRenderer::default();
        let element = text_element("aaa bbb ccc", 30.0, 45.0);
        let dropped = paint_text_block(&mut renderer, &element, "aaa bbb ccc", &TextConfig::default());

        assert_eq!(dropped, 1);
        assert_eq!(
            drawn_lines(&renderer),
            vec![("aaa".to_string(), 20.0), ("bbb".to_string(), 40.0)]
        );
    }

    #[test]
    fn baseline_exactly_at_height_is_drawn() {
        let mut renderer = RecordingRenderer::default();
        let element = text_element("aaa bbb", 30.0, 40.0);
        let dropped = paint_text_block(&mut renderer, &element, "aaa bbb", &TextConfig::default());
        assert_eq!(dropped, 0);
        assert_eq!(drawn_lines(&renderer).len(), 2);
    }

    #[test]
    fn font_falls_back_to_config() {
        let style = Style {
            font_size: Some(24.0),
            ..Style::default()
        };
        let font = font_for(&style, &TextConfig::default());
        assert_eq!(font, FontDescriptor::new("Sans", "", 24.0));
    }
}

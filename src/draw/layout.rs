//! Greedy word wrapping and line placement for text elements.
//!
//! Lines are produced by [`wrap_words`] and positioned by [`layout_text`].
//! Baselines start one line height below the origin, so the first line sits
//! inside the element box rather than on its top edge.

use serde::{Deserialize, Serialize};

use super::render::TextMeasure;
use crate::util::Point;

/// Horizontal alignment of each line inside the wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// A laid-out line: its text and the baseline-left point to draw it at.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Parameters for [`layout_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextLayout {
    pub max_width: f64,
    pub line_height: f64,
    pub align: Align,
    pub origin: Point,
}

/// Splits `text` on single spaces and packs words into lines no wider than
/// `max_width`.
///
/// A word that is wider than `max_width` on its own gets a line to itself; it
/// is never broken further.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f64,
) -> Vec<String> {
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();
    let mut lines = Vec::new();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure.measure_text(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

/// Wraps `text` and assigns every line its baseline position.
pub fn layout_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    params: &TextLayout,
) -> Vec<LayoutLine> {
    let mut baseline = params.origin.y;

    wrap_words(measure, text, params.max_width)
        .into_iter()
        .map(|line| {
            baseline += params.line_height;
            let x = line_x(measure, &line, params);
            LayoutLine {
                text: line,
                x,
                y: baseline,
            }
        })
        .collect()
}

fn line_x<M: TextMeasure + ?Sized>(measure: &mut M, line: &str, params: &TextLayout) -> f64 {
    let origin_x = params.origin.x;
    match params.align {
        Align::Left => origin_x,
        Align::Center => {
            let width = measure.measure_text(line);
            if width < params.max_width {
                origin_x + (params.max_width - width) / 2.0
            } else {
                origin_x
            }
        }
        Align::Right => origin_x + params.max_width - measure.measure_text(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 10px wide.
    struct Mono;

    impl TextMeasure for Mono {
        fn measure_text(&mut self, text: &str) -> f64 {
            text.chars().count() as f64 * 10.0
        }
    }

    fn params(align: Align) -> TextLayout {
        TextLayout {
            max_width: 100.0,
            line_height: 20.0,
            align,
            origin: Point::new(5.0, 50.0),
        }
    }

    #[test]
    fn wraps_greedily_at_max_width() {
        let lines = wrap_words(&mut Mono, "the quick brown fox jumps over", 100.0);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over"]);
    }

    #[test]
    fn line_exactly_at_max_width_is_kept() {
        // "aaaa bbbbb" is exactly 100px
        let lines = wrap_words(&mut Mono, "aaaa bbbbb c", 100.0);
        assert_eq!(lines, vec!["aaaa bbbbb", "c"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_words(&mut Mono, "hi incomprehensibilities ok", 100.0);
        assert_eq!(lines, vec!["hi", "incomprehensibilities", "ok"]);

        let lines = wrap_words(&mut Mono, "incomprehensibilities", 100.0);
        assert_eq!(lines, vec!["incomprehensibilities"]);
    }

    #[test]
    fn trailing_overflowing_word_is_not_lost() {
        let lines = wrap_words(&mut Mono, "one two three four", 100.0);
        assert_eq!(lines, vec!["one two", "three four"]);
        let lines = wrap_words(&mut Mono, "one two three fourteen", 100.0);
        assert_eq!(lines, vec!["one two", "three", "fourteen"]);
    }

    #[test]
    fn every_line_but_single_words_fits() {
        let text = "a bb ccc dddd eeeee ffffffffffffff g hh iii jjjj kkkkkkkkkkkk l";
        let lines = wrap_words(&mut Mono, text, 60.0);
        for line in &lines {
            let width = Mono.measure_text(line);
            assert!(
                width <= 60.0 || !line.contains(' '),
                "line {line:?} is {width}px wide"
            );
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn baselines_step_by_line_height() {
        let lines = layout_text(&mut Mono, "the quick brown fox", &params(Align::Left));
        let ys: Vec<f64> = lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![70.0, 90.0]);
        assert!(lines.iter().all(|l| l.x == 5.0));
    }

    #[test]
    fn center_and_right_alignment_offsets() {
        let centered = layout_text(&mut Mono, "abcd", &params(Align::Center));
        assert_eq!(centered[0].x, 5.0 + 30.0);

        let right = layout_text(&mut Mono, "abcd", &params(Align::Right));
        assert_eq!(right[0].x, 5.0 + 60.0);
    }

    #[test]
    fn full_width_line_keeps_origin_when_centered() {
        let lines = layout_text(&mut Mono, "abcdefghij", &params(Align::Center));
        assert_eq!(lines[0].x, 5.0);

        let lines = layout_text(&mut Mono, "abcdefghijkl", &params(Align::Center));
        assert_eq!(lines[0].x, 5.0);
    }

    #[test]
    fn align_parses_known_keywords_only() {
        assert_eq!(Align::parse("right"), Some(Align::Right));
        assert_eq!(Align::parse("Right"), None);
        assert_eq!(Align::parse("justify"), None);
        assert_eq!(Align::Center.as_str(), "center");
    }
}

//! Text metrics for text annotations.

use arrows_core::constants::{APPROX_GLYPH_WIDTH_FACTOR, TEXT_INSET_X, TEXT_INSET_Y, TEXT_LINE_HEIGHT_FACTOR};
use arrows_core::{Annotation, AnnotationKind, BoundingBox, Size};

/// Line measurement supplied by whatever draws the text.
pub trait MeasureText {
    /// Width of a single line, or `None` when the backend cannot measure it.
    fn measure_text(&self, line: &str, font_size: f64, font_family: &str) -> Option<f64>;
}

/// Width from character count alone. Used when no measurer is available or
/// a measurement fails.
pub fn approximate_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * APPROX_GLYPH_WIDTH_FACTOR
}

/// Size of a possibly multi-line block of text.
pub fn text_size(
    text: &str,
    font_size: f64,
    font_family: &str,
    measure: Option<&dyn MeasureText>,
) -> Size {
    let lines: Vec<&str> = text.split('\n').collect();
    let height = lines.len() as f64 * font_size * TEXT_LINE_HEIGHT_FACTOR;

    let measured = measure.and_then(|m| {
        lines
            .iter()
            .map(|line| m.measure_text(line, font_size, font_family))
            .try_fold(0.0_f64, |acc, w| w.map(|w| acc.max(w)))
    });
    let width = measured.unwrap_or_else(|| {
        log::trace!("text measurement unavailable, approximating {text:?}");
        approximate_width(text, font_size)
    });

    Size::new(width, height)
}

/// Hit box of a text annotation: measured text plus a small inset on every
/// side, anchored at the annotation position. `None` for drawings.
pub fn text_bounds(annotation: &Annotation, measure: Option<&dyn MeasureText>) -> Option<BoundingBox> {
    let AnnotationKind::Text { position, text } = &annotation.kind else {
        return None;
    };
    let size = text_size(text, annotation.font_size(), annotation.font_family(), measure);
    Some(BoundingBox::new(
        position.x - TEXT_INSET_X,
        position.y - TEXT_INSET_Y,
        position.x + size.width + TEXT_INSET_X,
        position.y + size.height + TEXT_INSET_Y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrows_core::{AnnotationId, Point, Style};
    use pretty_assertions::assert_eq;

    /// Every glyph is exactly 10 wide.
    struct Monospace;

    impl MeasureText for Monospace {
        fn measure_text(&self, line: &str, _font_size: f64, _font_family: &str) -> Option<f64> {
            Some(line.chars().count() as f64 * 10.0)
        }
    }

    struct Broken;

    impl MeasureText for Broken {
        fn measure_text(&self, _: &str, _: f64, _: &str) -> Option<f64> {
            None
        }
    }

    #[test]
    fn measured_width_is_widest_line() {
        let size = text_size("ab\nabcd", 10.0, "sans-serif", Some(&Monospace));
        assert_eq!(size.width, 40.0);
        assert_eq!(size.height, 24.0);
    }

    #[test]
    fn fallback_uses_character_count() {
        let size = text_size("abcde", 10.0, "sans-serif", None);
        assert!((size.width - 30.0).abs() < 1e-9);

        let failed = text_size("abcde", 10.0, "sans-serif", Some(&Broken));
        assert_eq!(failed, size);
    }

    #[test]
    fn bounds_include_inset() {
        let a = Annotation::text(
            AnnotationId(0),
            Point::new(100.0, 50.0),
            "abc",
            &Style::new().with("fontSize", 10.0),
        );
        let b = text_bounds(&a, Some(&Monospace)).unwrap();
        assert_eq!(b, BoundingBox::new(96.0, 48.0, 134.0, 64.0));
    }

    #[test]
    fn drawings_have_no_text_bounds() {
        let a = Annotation::drawing(AnnotationId(0), vec![Point::ORIGIN], &Style::new());
        assert_eq!(text_bounds(&a, None), None);
    }
}

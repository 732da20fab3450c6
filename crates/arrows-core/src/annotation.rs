//! Free-floating annotations: text labels and drawn strokes.
//!
//! All operations return a new `Annotation`; the graph swaps the old value
//! for the new one so every intermediate graph stays a complete snapshot.

use crate::constants::*;
use crate::geometry::{BoundingBox, Point, Vector};
use crate::id::AnnotationId;
use crate::style::Style;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub style: Style,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AnnotationKind {
    Text { position: Point, text: String },
    /// Stroke points in drawing order.
    Drawing { points: Vec<Point> },
}

impl Annotation {
    /// A text annotation. `style` overrides the text defaults key by key.
    pub fn text(id: AnnotationId, position: Point, text: impl Into<String>, style: &Style) -> Self {
        let defaults = Style::new()
            .with("fontSize", DEFAULT_FONT_SIZE)
            .with("fontFamily", DEFAULT_FONT_FAMILY)
            .with("color", DEFAULT_TEXT_COLOR)
            .with("backgroundColor", DEFAULT_TEXT_BACKGROUND);
        Self {
            id,
            style: defaults.merge(style),
            kind: AnnotationKind::Text {
                position,
                text: text.into(),
            },
        }
    }

    /// A drawing annotation. `style` overrides the stroke defaults key by key.
    pub fn drawing(id: AnnotationId, points: Vec<Point>, style: &Style) -> Self {
        let defaults = Style::new()
            .with("strokeColor", DEFAULT_STROKE_COLOR)
            .with("strokeWidth", DEFAULT_STROKE_WIDTH);
        Self {
            id,
            style: defaults.merge(style),
            kind: AnnotationKind::Drawing { points },
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.kind, AnnotationKind::Drawing { .. })
    }

    pub fn points(&self) -> &[Point] {
        match &self.kind {
            AnnotationKind::Drawing { points } => points,
            AnnotationKind::Text { .. } => &[],
        }
    }

    pub fn font_size(&self) -> f64 {
        self.style.number("fontSize").unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font_family(&self) -> &str {
        self.style.text("fontFamily").unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Replace the text. Drawings are returned unchanged.
    pub fn with_text(&self, text: &str) -> Self {
        let mut next = self.clone();
        if let AnnotationKind::Text { text: t, .. } = &mut next.kind {
            *t = text.to_string();
        }
        next
    }

    /// Move a text annotation's anchor. Drawings are returned unchanged;
    /// use [`Annotation::translated`] for those.
    pub fn with_position(&self, position: Point) -> Self {
        let mut next = self.clone();
        if let AnnotationKind::Text { position: p, .. } = &mut next.kind {
            *p = position;
        }
        next
    }

    /// Append a stroke point. Text annotations are returned unchanged.
    pub fn with_point(&self, point: Point) -> Self {
        let mut next = self.clone();
        if let AnnotationKind::Drawing { points } = &mut next.kind {
            points.push(point);
        }
        next
    }

    /// Shift the whole annotation by `delta`.
    pub fn translated(&self, delta: Vector) -> Self {
        let mut next = self.clone();
        match &mut next.kind {
            AnnotationKind::Text { position, .. } => *position += delta,
            AnnotationKind::Drawing { points } => {
                for p in points.iter_mut() {
                    *p += delta;
                }
            }
        }
        next
    }

    /// Merge style keys; unknown keys are kept, not rejected.
    pub fn with_style(&self, patch: &Style) -> Self {
        Self {
            style: self.style.merge(patch),
            ..self.clone()
        }
    }

    /// Sum of the distances between consecutive stroke points (0 for text).
    pub fn path_length(&self) -> f64 {
        self.points()
            .windows(2)
            .map(|w| w[0].distance_to(w[1]))
            .sum()
    }

    /// A drawing too short to be an intentional stroke.
    pub fn is_degenerate_drawing(&self) -> bool {
        match &self.kind {
            AnnotationKind::Drawing { points } => {
                points.len() < 2 || self.path_length() < DRAWING_MIN_PATH_LENGTH
            }
            AnnotationKind::Text { .. } => false,
        }
    }

    /// Bounds of a drawing's points. Text bounds depend on font metrics and
    /// are computed by the visual layer.
    pub fn drawing_bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points().iter().copied())
    }
}

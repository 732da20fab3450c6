//! Rubber-band selection over empty canvas.

use crate::mutation::SelectionMutation;
use arrows_core::{BoundingBox, Point, SelectionMode};
use arrows_render::VisualGraph;

/// Rubber-band rectangle in graph space, from the press point to the
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub from: Point,
    pub to: Point,
}

impl Marquee {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.from, self.to)
    }

    /// Replace the selection with everything inside the rectangle.
    pub fn select(&self, visual: &VisualGraph<'_>, include_annotations: bool) -> SelectionMutation {
        let entities = visual.entities_in_bounding_box(self.bounding_box(), include_annotations);
        log::debug!("marquee selected {} entities", entities.len());
        SelectionMutation::Toggle {
            entities,
            mode: SelectionMode::Replace,
        }
    }
}

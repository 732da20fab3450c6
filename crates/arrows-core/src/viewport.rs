//! View transformation between graph space and canvas space.
//!
//! `canvas = graph * scale + offset`. Wheel input either zooms about the
//! pointer (ctrl/cmd held) or pans; both results pass through the scroll
//! constraint so content can never be scrolled out of reach.

use crate::constants::{CANVAS_PADDING, INSPECTOR_WIDTH, RECENTRE_FACTOR, TOOLBAR_HEIGHT};
use crate::geometry::{BoundingBox, Point, Size, Vector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransformation {
    /// Always > 0.
    pub scale: f64,
    pub offset: Vector,
}

impl Default for ViewTransformation {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vector::ZERO,
        }
    }
}

impl ViewTransformation {
    /// Non-positive or non-finite scales fall back to 1.
    pub fn new(scale: f64, offset: Vector) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { scale, offset }
    }

    /// Graph → canvas.
    pub fn apply(&self, graph: Point) -> Point {
        graph.scale(self.scale).translate(self.offset)
    }

    /// Canvas → graph.
    pub fn inverse(&self, canvas: Point) -> Point {
        Point::new(
            (canvas.x - self.offset.dx) / self.scale,
            (canvas.y - self.offset.dy) / self.scale,
        )
    }

    /// Canvas-space displacement → graph-space displacement.
    pub fn inverse_vector(&self, canvas: Vector) -> Vector {
        canvas.scale(1.0 / self.scale)
    }

    /// Zoom about `pointer` (canvas space). Positive `delta_y` zooms out.
    pub fn wheel_zoom(
        &self,
        content: BoundingBox,
        canvas: Size,
        pointer: Point,
        delta_y: f64,
    ) -> ViewTransformation {
        let fit = FitScale::of(content, canvas);
        let graph_pointer = self.inverse(pointer);
        let scale = (self.scale * (100.0 - delta_y) / 100.0).max(fit.min_scale());

        // Keep the graph point under the pointer fixed on screen.
        let raw_offset = pointer.vector_from(graph_pointer.scale(scale));
        let constrained = constrain_scroll(content, scale, raw_offset, canvas);

        let should_centre = scale <= fit.height && scale <= fit.width && delta_y > 0.0;
        let offset = if should_centre {
            move_toward_centre(fit.min_scale(), constrained, content, canvas)
        } else {
            constrained
        };
        log::trace!("wheel zoom: scale {} -> {scale}, offset {offset:?}", self.scale);
        ViewTransformation::new(scale, offset)
    }

    /// Pan by a wheel delta at the current scale.
    pub fn wheel_pan(&self, content: BoundingBox, canvas: Size, delta: Vector) -> ViewTransformation {
        let raw_offset = self.offset.plus(delta.scale(self.scale).invert());
        let offset = constrain_scroll(content, self.scale, raw_offset, canvas);
        ViewTransformation::new(self.scale, offset)
    }
}

/// Scales at which the content exactly fits the canvas, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitScale {
    pub width: f64,
    pub height: f64,
}

impl FitScale {
    pub fn of(content: BoundingBox, canvas: Size) -> Self {
        let fit = |canvas_extent: f64, content_extent: f64| {
            if content_extent > 0.0 {
                canvas_extent / content_extent
            } else {
                f64::INFINITY
            }
        };
        Self {
            width: fit(canvas.width, content.width()),
            height: fit(canvas.height, content.height()),
        }
    }

    /// Zooming out stops here: never smaller than "whole content visible",
    /// and never forced above 1.
    pub fn min_scale(&self) -> f64 {
        1.0_f64.min(self.width).min(self.height)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    fn range(self, bb: &BoundingBox) -> (f64, f64) {
        match self {
            Axis::X => (bb.left, bb.right),
            Axis::Y => (bb.top, bb.bottom),
        }
    }

    fn extent(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    fn component(self, v: Vector) -> f64 {
        match self {
            Axis::X => v.dx,
            Axis::Y => v.dy,
        }
    }

    fn set(self, v: &mut Vector, value: f64) {
        match self {
            Axis::X => v.dx = value,
            Axis::Y => v.dy = value,
        }
    }
}

/// Clamp an offset so content stays reachable.
///
/// Per axis: content larger than the canvas must keep covering it (its
/// near edge may not come inside the padding, its far edge may not fall
/// short of the far padding). Content smaller than the canvas must stay
/// inside those same bounds.
pub fn constrain_scroll(content: BoundingBox, scale: f64, offset: Vector, canvas: Size) -> Vector {
    let mut constrained = offset;
    for axis in Axis::BOTH {
        let (lo, hi) = axis.range(&content);
        let extent = axis.extent(canvas);
        let too_large = (hi - lo) * scale > extent;
        let flip = |out_of_range: bool| if too_large { !out_of_range } else { out_of_range };

        let min = lo * scale + axis.component(offset);
        if flip(min < CANVAS_PADDING) {
            axis.set(&mut constrained, CANVAS_PADDING - lo * scale);
        }
        let max = hi * scale + axis.component(offset);
        if flip(max > CANVAS_PADDING + extent) {
            axis.set(&mut constrained, CANVAS_PADDING + extent - hi * scale);
        }
    }
    constrained
}

/// Step the offset a fraction of the way toward centring the content at
/// `min_scale`. Differences of a pixel or less are left alone.
fn move_toward_centre(min_scale: f64, offset: Vector, content: BoundingBox, canvas: Size) -> Vector {
    let mut moved = offset;
    for axis in Axis::BOTH {
        let (lo, hi) = axis.range(&content);
        let current = axis.component(offset);
        let centred = CANVAS_PADDING + axis.extent(canvas) / 2.0 - (hi + lo) * min_scale / 2.0;
        let difference = centred - current;
        if difference.abs() > 1.0 {
            axis.set(&mut moved, current + difference * RECENTRE_FACTOR);
        }
    }
    moved
}

/// Usable drawing area for a window, before padding.
pub fn compute_canvas_size(window: Size, inspector_visible: bool) -> Size {
    let inspector = if inspector_visible { INSPECTOR_WIDTH } else { 0.0 };
    Size::new(
        (window.width - inspector).max(0.0),
        (window.height - TOOLBAR_HEIGHT).max(0.0),
    )
}

/// Canvas size that scroll constraints are computed against.
pub fn padded_canvas_size(window: Size, inspector_visible: bool) -> Size {
    compute_canvas_size(window, inspector_visible).shrink(CANVAS_PADDING)
}

//! Resize/rotate handles around a multi-node selection.
//!
//! Handles live in canvas space so they keep a constant on-screen size at
//! any zoom. The transforms they drive are computed in graph space from the
//! node positions captured at mouse down, never incrementally.

use crate::mutation::NodePosition;
use arrows_core::constants::{HANDLE_FRAME_MARGIN_CANVAS, HANDLE_SIZE_CANVAS};
use arrows_core::{BoundingBox, Point, Selection, Vector, ViewTransformation};
use arrows_render::VisualGraph;
use std::f64::consts::FRAC_1_SQRT_2;

/// A handle position on the selection frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::TopLeft,
        Corner::Top,
        Corner::TopRight,
        Corner::Right,
        Corner::BottomRight,
        Corner::Bottom,
        Corner::BottomLeft,
        Corner::Left,
    ];

    /// -1 for left/top, 0 for the middle, 1 for right/bottom.
    fn sides(self) -> (i8, i8) {
        match self {
            Corner::TopLeft => (-1, -1),
            Corner::Top => (0, -1),
            Corner::TopRight => (1, -1),
            Corner::Right => (1, 0),
            Corner::BottomRight => (1, 1),
            Corner::Bottom => (0, 1),
            Corner::BottomLeft => (-1, 1),
            Corner::Left => (-1, 0),
        }
    }

    /// Edge midpoints scale one axis and never rotate.
    pub fn is_edge(self) -> bool {
        let (x, y) = self.sides();
        x == 0 || y == 0
    }

    fn point_on(self, frame: &BoundingBox) -> Point {
        let (sx, sy) = self.sides();
        let pick = |side: i8, lo: f64, hi: f64| match side {
            -1 => lo,
            1 => hi,
            _ => (lo + hi) / 2.0,
        };
        Point::new(
            pick(sx, frame.left, frame.right),
            pick(sy, frame.top, frame.bottom),
        )
    }
}

/// What an unlocked handle drag turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleLock {
    Scale,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformationHandles {
    frame: Option<BoundingBox>,
}

impl TransformationHandles {
    /// Handles appear only when at least two nodes are selected.
    pub fn for_selection(
        visual: &VisualGraph<'_>,
        selection: &Selection,
        view: &ViewTransformation,
    ) -> Self {
        let ids: Vec<_> = selection.node_ids().collect();
        if ids.len() < 2 {
            return Self::default();
        }
        let frame = visual.nodes_bounding_box(ids).map(|b| {
            let top_left = view.apply(Point::new(b.left, b.top));
            let bottom_right = view.apply(Point::new(b.right, b.bottom));
            BoundingBox::from_corners(top_left, bottom_right).expand(HANDLE_FRAME_MARGIN_CANVAS)
        });
        Self { frame }
    }

    /// Canvas-space rectangle the handles sit on.
    pub fn frame(&self) -> Option<BoundingBox> {
        self.frame
    }

    pub fn handle_position(&self, corner: Corner) -> Option<Point> {
        self.frame.map(|f| corner.point_on(&f))
    }

    pub fn handle_at_point(&self, canvas: Point) -> Option<Corner> {
        let frame = self.frame?;
        Corner::ALL.into_iter().find(|c| {
            BoundingBox::around(c.point_on(&frame), HANDLE_SIZE_CANVAS / 2.0).contains(canvas)
        })
    }
}

/// Decide scale vs rotate for a corner handle from the first real movement:
/// mostly toward or away from the centre scales, mostly around it rotates.
pub fn choose_lock(corner: Corner, centre: Point, initial: Point, current: Point) -> HandleLock {
    if corner.is_edge() {
        return HandleLock::Scale;
    }
    let radial = initial - centre;
    let movement = current - initial;
    let denominator = radial.length() * movement.length();
    if denominator == 0.0 {
        return HandleLock::Scale;
    }
    let cos = radial.dot(movement) / denominator;
    if cos.abs() >= FRAC_1_SQRT_2 {
        HandleLock::Scale
    } else {
        HandleLock::Rotate
    }
}

/// Scale positions about the side opposite `corner`. `movement` is the
/// graph-space pointer displacement since mouse down.
pub fn scale_positions(corner: Corner, initial: &[NodePosition], movement: Vector) -> Vec<NodePosition> {
    let Some(bounds) = BoundingBox::from_points(initial.iter().map(|p| p.position)) else {
        return Vec::new();
    };
    let (sx, sy) = corner.sides();

    let axis = |side: i8, lo: f64, hi: f64, delta: f64| -> (f64, f64) {
        let extent = hi - lo;
        match side {
            _ if extent <= 0.0 => (lo, 1.0),
            1 => (lo, (extent + delta) / extent),
            -1 => (hi, (extent - delta) / extent),
            _ => (lo, 1.0),
        }
    };
    let (anchor_x, fx) = axis(sx, bounds.left, bounds.right, movement.dx);
    let (anchor_y, fy) = axis(sy, bounds.top, bounds.bottom, movement.dy);

    initial
        .iter()
        .map(|p| NodePosition {
            node_id: p.node_id,
            position: Point::new(
                anchor_x + (p.position.x - anchor_x) * fx,
                anchor_y + (p.position.y - anchor_y) * fy,
            ),
        })
        .collect()
}

/// Rotate positions about the centre of their bounds by the angle the
/// pointer swept around it. Pointer positions are graph space.
pub fn rotate_positions(initial: &[NodePosition], initial_mouse: Point, current_mouse: Point) -> Vec<NodePosition> {
    let Some(bounds) = BoundingBox::from_points(initial.iter().map(|p| p.position)) else {
        return Vec::new();
    };
    let centre = bounds.center();
    let angle = (current_mouse - centre).angle() - (initial_mouse - centre).angle();
    initial
        .iter()
        .map(|p| NodePosition {
            node_id: p.node_id,
            position: centre + (p.position - centre).rotate(angle),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrows_core::{EntityRef, Graph, Node, NodeId};
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-9;

    fn positions(points: &[(f64, f64)]) -> Vec<NodePosition> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| NodePosition {
                node_id: NodeId(i as u32),
                position: Point::new(x, y),
            })
            .collect()
    }

    fn assert_close(actual: &[NodePosition], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert!(
                (a.position.x - x).abs() < EPS && (a.position.y - y).abs() < EPS,
                "expected ({x}, {y}), got {:?}",
                a.position
            );
        }
    }

    fn two_nodes() -> Graph {
        Graph {
            nodes: vec![
                Node::new(NodeId(0), Point::new(0.0, 0.0)),
                Node::new(NodeId(1), Point::new(100.0, 50.0)),
            ],
            ..Graph::default()
        }
    }

    #[test]
    fn no_handles_for_single_node() {
        let g = two_nodes();
        let visual = VisualGraph::straight_layout(&g, 20.0);
        let one = Selection::new().toggled(&[EntityRef::Node(NodeId(0))], arrows_core::SelectionMode::Replace);
        let handles = TransformationHandles::for_selection(&visual, &one, &ViewTransformation::default());
        assert_eq!(handles.frame(), None);
        assert_eq!(handles.handle_at_point(Point::ORIGIN), None);
    }

    #[test]
    fn frame_surrounds_selected_node_boxes() {
        let g = two_nodes();
        let visual = VisualGraph::straight_layout(&g, 20.0);
        let both = Selection::new().toggled(
            &[EntityRef::Node(NodeId(0)), EntityRef::Node(NodeId(1))],
            arrows_core::SelectionMode::Replace,
        );
        let view = ViewTransformation::new(2.0, Vector::new(10.0, 10.0));
        let handles = TransformationHandles::for_selection(&visual, &both, &view);
        // Graph box (-20,-20)-(120,70) → canvas (-30,-30)-(250,150), plus margin
        assert_eq!(handles.frame(), Some(BoundingBox::new(-40.0, -40.0, 260.0, 160.0)));
        assert_eq!(handles.handle_at_point(Point::new(263.0, 157.0)), Some(Corner::BottomRight));
        assert_eq!(handles.handle_at_point(Point::new(110.0, -36.0)), Some(Corner::Top));
        assert_eq!(handles.handle_at_point(Point::new(110.0, 60.0)), None);
    }

    #[test]
    fn lock_follows_movement_direction() {
        let centre = Point::new(0.0, 0.0);
        let corner = Point::new(10.0, 10.0);
        assert_eq!(
            choose_lock(Corner::BottomRight, centre, corner, Point::new(14.0, 13.0)),
            HandleLock::Scale
        );
        assert_eq!(
            choose_lock(Corner::BottomRight, centre, corner, Point::new(14.0, 6.0)),
            HandleLock::Rotate
        );
        assert_eq!(
            choose_lock(Corner::Right, centre, corner, Point::new(14.0, 6.0)),
            HandleLock::Scale
        );
    }

    #[test]
    fn corner_scale_anchors_opposite_corner() {
        let initial = positions(&[(0.0, 0.0), (100.0, 50.0)]);
        let scaled = scale_positions(Corner::BottomRight, &initial, Vector::new(100.0, 50.0));
        assert_close(&scaled, &[(0.0, 0.0), (200.0, 100.0)]);

        let scaled = scale_positions(Corner::TopLeft, &initial, Vector::new(50.0, 0.0));
        assert_close(&scaled, &[(50.0, 0.0), (100.0, 50.0)]);
    }

    #[test]
    fn edge_scale_touches_one_axis() {
        let initial = positions(&[(0.0, 0.0), (100.0, 50.0)]);
        let scaled = scale_positions(Corner::Bottom, &initial, Vector::new(30.0, 50.0));
        assert_close(&scaled, &[(0.0, 0.0), (100.0, 100.0)]);
    }

    #[test]
    fn rotate_quarter_turn() {
        let initial = positions(&[(-10.0, 0.0), (10.0, 0.0)]);
        let rotated = rotate_positions(&initial, Point::new(20.0, 0.0), Point::new(0.0, 20.0));
        assert_close(&rotated, &[(0.0, -10.0), (0.0, 10.0)]);
    }
}

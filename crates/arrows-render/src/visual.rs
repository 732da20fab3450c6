//! Resolved geometry handed over by the layout/rendering layer.
//!
//! Node circles and routed relationship paths are computed elsewhere; this
//! module only answers distance and bounds questions about them.

use arrows_core::{BoundingBox, Point, RelationshipId};
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, ParamCurveNearest, PathSeg, Shape};

/// Accuracy for kurbo's iterative curve queries, in graph units.
const CURVE_ACCURACY: f64 = 1e-3;

/// A node as drawn: a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualNode {
    pub position: Point,
    pub radius: f64,
}

impl VisualNode {
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Distance from the centre.
    pub fn distance_from(&self, point: Point) -> f64 {
        self.position.distance_to(point)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.radius)
    }
}

/// A relationship as drawn: an arbitrary path between its two nodes.
#[derive(Debug, Clone)]
pub struct RoutedRelationship {
    pub id: RelationshipId,
    pub path: BezPath,
}

impl RoutedRelationship {
    pub fn new(id: RelationshipId, path: BezPath) -> Self {
        Self { id, path }
    }

    /// A straight arrow between two points.
    pub fn straight(id: RelationshipId, from: Point, to: Point) -> Self {
        Self::polyline(id, &[from, to])
    }

    pub fn polyline(id: RelationshipId, points: &[Point]) -> Self {
        let mut path = BezPath::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(to_kurbo(*first));
            for p in rest {
                path.line_to(to_kurbo(*p));
            }
        }
        Self { id, path }
    }

    /// Shortest distance from `point` to any segment of the path.
    pub fn distance_from(&self, point: Point) -> f64 {
        let p = to_kurbo(point);
        self.path
            .segments()
            .map(|seg| seg.nearest(p, CURVE_ACCURACY).distance_sq)
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }

    /// The point halfway along the path by arc length.
    pub fn mid_point(&self) -> Option<Point> {
        let segments: Vec<PathSeg> = self.path.segments().collect();
        let lengths: Vec<f64> = segments
            .iter()
            .map(|s| s.arclen(CURVE_ACCURACY))
            .collect();
        let total: f64 = lengths.iter().sum();
        let first = segments.first()?;
        if total <= 0.0 {
            return Some(from_kurbo(first.start()));
        }

        let mut remaining = total / 2.0;
        for (seg, len) in segments.iter().zip(&lengths) {
            if remaining <= *len {
                let t = seg.inv_arclen(remaining, CURVE_ACCURACY);
                return Some(from_kurbo(seg.eval(t)));
            }
            remaining -= len;
        }
        segments.last().map(|s| from_kurbo(s.end()))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.path.elements().is_empty() {
            return None;
        }
        let r = self.path.bounding_box();
        Some(BoundingBox::new(r.x0, r.y0, r.x1, r.y1))
    }
}

pub fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

pub fn from_kurbo(p: kurbo::Point) -> Point {
    Point::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn straight_relationship_distance() {
        let rel = RoutedRelationship::straight(
            RelationshipId(0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((rel.distance_from(Point::new(50.0, 7.0)) - 7.0).abs() < EPS);
        // Past the end: distance to the endpoint
        assert!((rel.distance_from(Point::new(103.0, 4.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn mid_point_by_arc_length() {
        let rel = RoutedRelationship::polyline(
            RelationshipId(0),
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 30.0)],
        );
        let mid = rel.mid_point().unwrap();
        assert!((mid.x - 10.0).abs() < EPS);
        assert!((mid.y - 10.0).abs() < EPS);
    }

    #[test]
    fn empty_path_has_no_geometry() {
        let rel = RoutedRelationship::new(RelationshipId(0), BezPath::new());
        assert!(rel.mid_point().is_none());
        assert!(rel.bounding_box().is_none());
        assert!(rel.distance_from(Point::ORIGIN).is_infinite());
    }

    #[test]
    fn node_bounds() {
        let node = VisualNode::new(Point::new(10.0, 20.0), 5.0);
        assert_eq!(node.bounding_box(), BoundingBox::new(5.0, 15.0, 15.0, 25.0));
        assert!((node.distance_from(Point::new(13.0, 24.0)) - 5.0).abs() < EPS);
    }
}

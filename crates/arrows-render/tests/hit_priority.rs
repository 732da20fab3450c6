//! Integration tests: graph snapshot + resolved geometry → hit results.
//!
//! Builds `VisualGraph`s the way a renderer would hand them over and checks
//! the entity priority and area queries end to end.

use arrows_core::{
    Annotation, AnnotationId, BoundingBox, EntityRef, Graph, Node, NodeId, Point, Relationship,
    RelationshipId, Style,
};
use arrows_render::{Hit, MeasureText, RoutedRelationship, VisualGraph, VisualNode};
use kurbo::BezPath;
use std::collections::HashMap;

struct FixedWidth(f64);

impl MeasureText for FixedWidth {
    fn measure_text(&self, line: &str, _font_size: f64, _font_family: &str) -> Option<f64> {
        Some(line.chars().count() as f64 * self.0)
    }
}

fn node_graph() -> Graph {
    Graph {
        nodes: vec![
            Node::new(NodeId(0), Point::new(0.0, 0.0)),
            Node::new(NodeId(1), Point::new(300.0, 0.0)),
        ],
        relationships: vec![Relationship::new(RelationshipId(0), NodeId(0), NodeId(1))],
        ..Graph::default()
    }
}

// ─── Priority ────────────────────────────────────────────────────────────

#[test]
fn annotation_over_node_wins() {
    let mut graph = node_graph();
    graph.annotations.push(Annotation::text(
        AnnotationId(0),
        Point::new(-5.0, -5.0),
        "label",
        &Style::new(),
    ));
    let measure = FixedWidth(8.0);
    let visual = VisualGraph::straight_layout(&graph, 40.0).with_text_measure(&measure);

    assert_eq!(
        visual.entity_at_point(Point::new(0.0, 0.0)),
        Some(Hit::Annotation(AnnotationId(0)))
    );
    // Below the text box the node shows through
    assert_eq!(visual.entity_at_point(Point::new(0.0, 20.0)), Some(Hit::Node(NodeId(0))));
}

#[test]
fn text_hit_falls_back_without_measurer() {
    let mut graph = Graph::new();
    graph.annotations.push(Annotation::text(
        AnnotationId(3),
        Point::new(0.0, 0.0),
        "abcdefghij",
        &Style::new().with("fontSize", 10.0),
    ));
    let visual = VisualGraph::straight_layout(&graph, 40.0);

    // Approximate width 10 * 10 * 0.6 = 60, plus the 4 unit inset
    assert_eq!(visual.annotation_at_point(Point::new(63.0, 5.0)), Some(AnnotationId(3)));
    assert_eq!(visual.annotation_at_point(Point::new(65.0, 5.0)), None);
}

// ─── Routed relationships ────────────────────────────────────────────────

#[test]
fn curved_relationship_uses_its_path() {
    let graph = node_graph();
    let nodes: HashMap<NodeId, VisualNode> = graph
        .nodes
        .iter()
        .map(|n| (n.id, VisualNode::new(n.position, 40.0)))
        .collect();

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.quad_to((150.0, 200.0), (300.0, 0.0));
    let routed = RoutedRelationship::new(RelationshipId(0), path);
    let mid = routed.mid_point().unwrap();
    assert!((mid.x - 150.0).abs() < 1e-3);
    assert!((mid.y - 100.0).abs() < 1e-3);

    let visual = VisualGraph::new(&graph, nodes, vec![routed]);
    // Near the apex of the curve, nowhere near the straight chord
    assert_eq!(
        visual.entity_at_point(Point::new(150.0, 95.0)),
        Some(Hit::Relationship(RelationshipId(0)))
    );
    assert_eq!(visual.entity_at_point(Point::new(150.0, 0.0)), None);

    let selected = visual.entities_in_bounding_box(BoundingBox::new(100.0, 50.0, 200.0, 150.0), false);
    assert_eq!(selected, vec![EntityRef::Relationship(RelationshipId(0))]);
}

#[test]
fn nodes_without_geometry_are_skipped() {
    let graph = node_graph();
    let mut nodes = HashMap::new();
    nodes.insert(NodeId(1), VisualNode::new(Point::new(300.0, 0.0), 40.0));
    let visual = VisualGraph::new(&graph, nodes, Vec::new());

    assert_eq!(visual.entity_at_point(Point::new(0.0, 0.0)), None);
    assert_eq!(visual.entity_at_point(Point::new(300.0, 0.0)), Some(Hit::Node(NodeId(1))));
    assert_eq!(
        visual.bounding_box(),
        Some(BoundingBox::new(260.0, -40.0, 340.0, 40.0))
    );
}

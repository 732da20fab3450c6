//! Hit testing: point → entity lookup over a graph snapshot.
//!
//! A `VisualGraph` is rebuilt from the current graph plus resolved node and
//! relationship geometry every frame. Lookups follow a fixed priority:
//! annotations (topmost first), node bodies, node rings, relationships.

use crate::text::{MeasureText, text_bounds};
use crate::visual::{RoutedRelationship, VisualNode};
use arrows_core::constants::{DRAWING_HIT_TOLERANCE, RELATIONSHIP_HIT_TOLERANCE, RING_MARGIN};
use arrows_core::{
    Annotation, AnnotationId, AnnotationKind, BoundingBox, EntityRef, Graph, NodeId, Point,
    RelationshipId,
};
use std::collections::HashMap;

/// What sits under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Annotation(AnnotationId),
    Node(NodeId),
    /// The annulus just outside a node body.
    NodeRing(NodeId),
    Relationship(RelationshipId),
}

impl Hit {
    /// The selectable entity behind this hit. Rings are not selectable.
    pub fn entity(&self) -> Option<EntityRef> {
        match *self {
            Hit::Annotation(id) => Some(EntityRef::Annotation(id)),
            Hit::Node(id) => Some(EntityRef::Node(id)),
            Hit::Relationship(id) => Some(EntityRef::Relationship(id)),
            Hit::NodeRing(_) => None,
        }
    }
}

pub struct VisualGraph<'a> {
    graph: &'a Graph,
    nodes: HashMap<NodeId, VisualNode>,
    relationships: Vec<RoutedRelationship>,
    measure: Option<&'a dyn MeasureText>,
}

impl<'a> VisualGraph<'a> {
    pub fn new(
        graph: &'a Graph,
        nodes: HashMap<NodeId, VisualNode>,
        relationships: Vec<RoutedRelationship>,
    ) -> Self {
        Self {
            graph,
            nodes,
            relationships,
            measure: None,
        }
    }

    /// Circles at the model positions and straight arrows between centres.
    /// A node's `radius` style entry overrides `default_radius`.
    pub fn straight_layout(graph: &'a Graph, default_radius: f64) -> Self {
        let nodes: HashMap<NodeId, VisualNode> = graph
            .nodes
            .iter()
            .map(|n| {
                let radius = n.style.number("radius").unwrap_or(default_radius);
                (n.id, VisualNode::new(n.position, radius))
            })
            .collect();
        let relationships = graph
            .relationships
            .iter()
            .filter_map(|r| {
                let from = nodes.get(&r.from_id)?;
                let to = nodes.get(&r.to_id)?;
                Some(RoutedRelationship::straight(r.id, from.position, to.position))
            })
            .collect();
        Self::new(graph, nodes, relationships)
    }

    pub fn with_text_measure(mut self, measure: &'a dyn MeasureText) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn visual_node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&id)
    }

    // ─── Point queries ───────────────────────────────────────────────────

    pub fn entity_at_point(&self, point: Point) -> Option<Hit> {
        let hit = self
            .annotation_at_point(point)
            .map(Hit::Annotation)
            .or_else(|| self.node_at_point(point).map(Hit::Node))
            .or_else(|| self.node_ring_at_point(point).map(Hit::NodeRing))
            .or_else(|| self.relationship_at_point(point).map(Hit::Relationship));
        log::trace!("entity_at_point({}, {}) -> {hit:?}", point.x, point.y);
        hit
    }

    /// Topmost annotation under the point.
    pub fn annotation_at_point(&self, point: Point) -> Option<AnnotationId> {
        self.graph
            .annotations
            .iter()
            .rev()
            .find(|a| self.annotation_contains(a, point))
            .map(|a| a.id)
    }

    pub fn annotation_contains(&self, annotation: &Annotation, point: Point) -> bool {
        match &annotation.kind {
            AnnotationKind::Text { .. } => {
                text_bounds(annotation, self.measure).is_some_and(|b| b.contains(point))
            }
            AnnotationKind::Drawing { points } => points
                .windows(2)
                .any(|w| point.distance_to_segment(w[0], w[1]) <= DRAWING_HIT_TOLERANCE),
        }
    }

    pub fn annotation_bounds(&self, annotation: &Annotation) -> Option<BoundingBox> {
        match annotation.kind {
            AnnotationKind::Text { .. } => text_bounds(annotation, self.measure),
            AnnotationKind::Drawing { .. } => annotation.drawing_bounds(),
        }
    }

    pub fn node_at_point(&self, point: Point) -> Option<NodeId> {
        self.closest_node(point, |visual, distance| distance < visual.radius)
    }

    pub fn node_ring_at_point(&self, point: Point) -> Option<NodeId> {
        self.closest_node(point, |visual, distance| {
            distance > visual.radius && distance < visual.radius + RING_MARGIN
        })
    }

    /// Every node whose body or ring reaches the point, closest first.
    pub fn ring_targets_at_point(&self, point: Point) -> Vec<NodeId> {
        let mut hits: Vec<(f64, NodeId)> = self
            .graph
            .nodes
            .iter()
            .filter_map(|n| {
                let visual = self.nodes.get(&n.id)?;
                let distance = visual.distance_from(point);
                (distance < visual.radius + RING_MARGIN).then_some((distance, n.id))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    pub fn relationship_at_point(&self, point: Point) -> Option<RelationshipId> {
        self.relationships
            .iter()
            .map(|r| (r.distance_from(point), r.id))
            .filter(|(d, _)| *d <= RELATIONSHIP_HIT_TOLERANCE)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
    }

    fn closest_node(&self, point: Point, hit: impl Fn(&VisualNode, f64) -> bool) -> Option<NodeId> {
        let mut closest: Option<(f64, NodeId)> = None;
        for node in &self.graph.nodes {
            let Some(visual) = self.nodes.get(&node.id) else {
                continue;
            };
            let distance = visual.distance_from(point);
            let closer = closest.is_none_or(|(best, _)| distance < best);
            if closer && hit(visual, distance) {
                closest = Some((distance, node.id));
            }
        }
        closest.map(|(_, id)| id)
    }

    // ─── Area queries ────────────────────────────────────────────────────

    /// Nodes whose position lies in `rect`, then relationships whose path
    /// midpoint does. Annotations whose bounds centre lies in `rect` follow
    /// when `include_annotations` is set.
    pub fn entities_in_bounding_box(
        &self,
        rect: BoundingBox,
        include_annotations: bool,
    ) -> Vec<EntityRef> {
        let nodes = self
            .graph
            .nodes
            .iter()
            .filter(|n| rect.contains(n.position))
            .map(|n| EntityRef::Node(n.id));
        let relationships = self
            .relationships
            .iter()
            .filter(|r| r.mid_point().is_some_and(|m| rect.contains(m)))
            .map(|r| EntityRef::Relationship(r.id));
        let mut entities: Vec<EntityRef> = nodes.chain(relationships).collect();

        if include_annotations {
            entities.extend(
                self.graph
                    .annotations
                    .iter()
                    .filter(|a| {
                        self.annotation_bounds(a)
                            .is_some_and(|b| rect.contains(b.center()))
                    })
                    .map(|a| EntityRef::Annotation(a.id)),
            );
        }
        entities
    }

    /// Union of node and relationship visual bounds.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let nodes = self
            .graph
            .nodes
            .iter()
            .filter_map(|n| self.nodes.get(&n.id))
            .map(VisualNode::bounding_box);
        let relationships = self
            .relationships
            .iter()
            .filter_map(RoutedRelationship::bounding_box);
        BoundingBox::combine(nodes.chain(relationships))
    }

    /// Union of the visual boxes of the given nodes.
    pub fn nodes_bounding_box(&self, ids: impl IntoIterator<Item = NodeId>) -> Option<BoundingBox> {
        BoundingBox::combine(
            ids.into_iter()
                .filter_map(|id| self.nodes.get(&id))
                .map(VisualNode::bounding_box),
        )
    }
}

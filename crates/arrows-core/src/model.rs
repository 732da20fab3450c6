//! Core graph data model.
//!
//! A `Graph` is a plain value: nodes, relationships between them, the
//! annotation layer drawn on top, and a graph-wide style map. Editing code
//! never mutates a graph that someone else may hold; it clones, changes the
//! clone, and hands the result on. That is what lets undo history be a
//! simple stack of graphs.

use crate::annotation::Annotation;
use crate::error::GraphError;
use crate::geometry::Point;
use crate::id::{AnnotationId, NodeId, RelationshipId, next_available_id};
use crate::style::Style;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashSet};

// ─── Nodes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub labels: SmallVec<[String; 2]>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub style: Style,
}

impl Node {
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            caption: String::new(),
            labels: SmallVec::new(),
            properties: BTreeMap::new(),
            style: Style::new(),
        }
    }

    pub fn moved_to(&self, position: Point) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

// ─── Relationships ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: RelationshipId,
    #[serde(rename = "type", default)]
    pub rel_type: String,
    pub from_id: NodeId,
    pub to_id: NodeId,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub style: Style,
}

impl Relationship {
    pub fn new(id: RelationshipId, from_id: NodeId, to_id: NodeId) -> Self {
        Self {
            id,
            rel_type: String::new(),
            from_id,
            to_id,
            properties: BTreeMap::new(),
            style: Style::new(),
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from_id == node || self.to_id == node
    }
}

// ─── Graph ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
    /// Paint order: the last annotation is drawn on top.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub style: Style,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// The topmost annotation, which is the one a freehand stroke appends to.
    pub fn last_annotation(&self) -> Option<&Annotation> {
        self.annotations.last()
    }

    pub fn next_node_id(&self) -> Option<NodeId> {
        next_available_id(self.nodes.iter().map(|n| n.id))
    }

    pub fn next_relationship_id(&self) -> Option<RelationshipId> {
        next_available_id(self.relationships.iter().map(|r| r.id))
    }

    pub fn next_annotation_id(&self) -> Option<AnnotationId> {
        next_available_id(self.annotations.iter().map(|a| a.id))
    }

    /// Check structural invariants of a graph received from outside.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }

        let mut rel_ids = HashSet::new();
        for rel in &self.relationships {
            if !rel_ids.insert(rel.id) {
                return Err(GraphError::DuplicateRelationship(rel.id));
            }
            for end in [rel.from_id, rel.to_id] {
                if !node_ids.contains(&end) {
                    return Err(GraphError::DanglingRelationship {
                        relationship: rel.id,
                        node: end,
                    });
                }
            }
        }

        let mut ann_ids = HashSet::new();
        for ann in &self.annotations {
            if !ann_ids.insert(ann.id) {
                return Err(GraphError::DuplicateAnnotation(ann.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> Graph {
        Graph {
            nodes: vec![
                Node::new(NodeId(0), Point::new(0.0, 0.0)),
                Node::new(NodeId(1), Point::new(100.0, 0.0)),
            ],
            relationships: vec![Relationship::new(RelationshipId(0), NodeId(0), NodeId(1))],
            ..Graph::default()
        }
    }

    #[test]
    fn next_ids_follow_existing() {
        let g = two_nodes();
        assert_eq!(g.next_node_id(), Some(NodeId(2)));
        assert_eq!(g.next_relationship_id(), Some(RelationshipId(1)));
        assert_eq!(g.next_annotation_id(), Some(AnnotationId(0)));
    }

    #[test]
    fn validate_accepts_consistent_graph() {
        assert!(two_nodes().validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_relationship() {
        let mut g = two_nodes();
        g.relationships
            .push(Relationship::new(RelationshipId(1), NodeId(0), NodeId(9)));
        assert_eq!(
            g.validate(),
            Err(GraphError::DanglingRelationship {
                relationship: RelationshipId(1),
                node: NodeId(9),
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_nodes() {
        let mut g = two_nodes();
        g.nodes.push(Node::new(NodeId(1), Point::ORIGIN));
        assert_eq!(g.validate(), Err(GraphError::DuplicateNode(NodeId(1))));
    }

    #[test]
    fn relationship_json_uses_camel_case() {
        let rel = Relationship::new(RelationshipId(2), NodeId(0), NodeId(1));
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["fromId"], "n0");
        assert_eq!(json["toId"], "n1");
        assert_eq!(json["type"], "");
    }
}

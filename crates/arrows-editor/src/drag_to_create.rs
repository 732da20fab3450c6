//! Dragging out of a node ring: connect to existing nodes or spawn new ones.

use crate::mutation::{GraphMutation, NewRelationship, SpawnedNode};
use arrows_core::id::id_sequence;
use arrows_core::{Graph, NodeId, Point, Selection};
use arrows_render::VisualGraph;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragToCreate {
    pub source_node_id: Option<NodeId>,
    /// Other selected nodes dragged along with the source.
    pub secondary_source_node_ids: SmallVec<[NodeId; 4]>,
    /// Nodes under the pointer, closest first.
    pub target_node_ids: SmallVec<[NodeId; 4]>,
    /// Where a new node would go when no target is hovered.
    pub new_node_position: Option<Point>,
}

impl DragToCreate {
    /// Arm the ring of `source`. When the source is part of the selection,
    /// every other selected node becomes a secondary source.
    pub fn activate(&mut self, source: NodeId, selection: &Selection) {
        let secondary = if selection.node_selected(source) {
            selection.node_ids().filter(|id| *id != source).collect()
        } else {
            SmallVec::new()
        };
        *self = DragToCreate {
            source_node_id: Some(source),
            secondary_source_node_ids: secondary,
            ..DragToCreate::default()
        };
    }

    pub fn deactivate(&mut self) {
        *self = DragToCreate::default();
    }

    pub fn is_active(&self) -> bool {
        self.source_node_id.is_some()
    }

    /// Track the pointer: hovered rings become targets, otherwise the
    /// pointer itself is the candidate spot for a new node.
    pub fn drag(&mut self, visual: &VisualGraph<'_>, graph_position: Point) {
        let targets = visual.ring_targets_at_point(graph_position);
        if targets.is_empty() {
            self.target_node_ids.clear();
            self.new_node_position = Some(graph_position);
        } else {
            self.target_node_ids = targets.into_iter().collect();
            self.new_node_position = None;
        }
    }

    fn sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.source_node_id
            .into_iter()
            .chain(self.secondary_source_node_ids.iter().copied())
    }

    /// The mutation committing this drag, if it leads anywhere.
    pub fn finish(&self, graph: &Graph) -> Option<GraphMutation> {
        let source_id = self.source_node_id?;
        let Some(source) = graph.node(source_id) else {
            log::warn!("drag-to-create source {source_id} no longer exists");
            return None;
        };
        let sources: SmallVec<[NodeId; 4]> = self
            .sources()
            .filter(|id| graph.node(*id).is_some())
            .collect();

        let Some(relationship_id) = graph.next_relationship_id() else {
            log::warn!("drag-to-create: relationship ids exhausted");
            return None;
        };

        if !self.target_node_ids.is_empty() {
            let mut ids = id_sequence(relationship_id);
            let new: Vec<NewRelationship> = sources
                .iter()
                .flat_map(|from| self.target_node_ids.iter().map(move |to| (*from, *to)))
                .filter(|(_, to)| graph.node(*to).is_some())
                .zip(&mut ids)
                .map(|((from_id, to_id), id)| NewRelationship { id, from_id, to_id })
                .collect();
            log::debug!("drag-to-create: connecting {} relationship(s)", new.len());
            return (!new.is_empty()).then_some(GraphMutation::CreateRelationships(new));
        }

        let candidate = self.new_node_position?;
        let Some(node_id) = graph.next_node_id() else {
            log::warn!("drag-to-create: node ids exhausted");
            return None;
        };
        let displacement = candidate - source.position;
        let spawned: Vec<SpawnedNode> = sources
            .iter()
            .filter_map(|id| graph.node(*id))
            .zip(id_sequence(node_id))
            .zip(id_sequence(relationship_id))
            .map(|((from, node_id), relationship_id)| SpawnedNode {
                source_id: from.id,
                node_id,
                position: from.position + displacement,
                relationship_id,
            })
            .collect();
        log::debug!("drag-to-create: spawning {} node(s)", spawned.len());
        Some(GraphMutation::CreateNodesAndRelationships(spawned))
    }
}

//! The closed set of changes the editor can make, and their reducers.
//!
//! Gesture handling never touches state directly. It emits `Mutation`s,
//! which the editor applies one by one. Graph reducers are pure: they take
//! the current graph and return the next one, or `None` when the mutation
//! changes nothing (so no history entry is created).

use crate::handles::HandleLock;
use crate::tools::ToolMutation;
use arrows_core::{
    Annotation, AnnotationId, AnnotationKind, EntityRef, Graph, Node, NodeId, Point, Relationship,
    RelationshipId, Selection, SelectionMode, Style, Vector,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    pub node_id: NodeId,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewRelationship {
    pub id: RelationshipId,
    pub from_id: NodeId,
    pub to_id: NodeId,
}

/// A node spawned next to `source_id` plus the relationship joining them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedNode {
    pub source_id: NodeId,
    pub node_id: NodeId,
    pub position: Point,
    pub relationship_id: RelationshipId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Graph(GraphMutation),
    Selection(SelectionMutation),
    AdjustViewport { scale: f64, offset: Vector },
    Tool(ToolMutation),
    BeginDragLock(HandleLock),
    EndDragLock,
}

impl From<GraphMutation> for Mutation {
    fn from(m: GraphMutation) -> Self {
        Mutation::Graph(m)
    }
}

impl From<SelectionMutation> for Mutation {
    fn from(m: SelectionMutation) -> Self {
        Mutation::Selection(m)
    }
}

impl From<ToolMutation> for Mutation {
    fn from(m: ToolMutation) -> Self {
        Mutation::Tool(m)
    }
}

// ─── Selection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMutation {
    Toggle {
        entities: Vec<EntityRef>,
        mode: SelectionMode,
    },
    Clear,
    ActivateEditing(EntityRef),
}

impl SelectionMutation {
    pub fn apply(&self, selection: &Selection) -> Selection {
        match self {
            SelectionMutation::Toggle { entities, mode } => selection.toggled(entities, *mode),
            SelectionMutation::Clear => Selection::cleared(),
            SelectionMutation::ActivateEditing(entity) => Selection::editing(*entity),
        }
    }
}

// ─── Graph ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    CreateNode {
        id: NodeId,
        position: Point,
        caption: String,
        style: Style,
    },
    MoveNodes(Vec<NodePosition>),
    /// Final positions of a drag; closes the move's undo step.
    MoveNodesEndDrag(Vec<NodePosition>),
    /// Also deletes every relationship touching the nodes.
    DeleteNodes(Vec<NodeId>),
    CreateRelationships(Vec<NewRelationship>),
    DeleteRelationships(Vec<RelationshipId>),
    CreateNodesAndRelationships(Vec<SpawnedNode>),
    CreateAnnotation(Annotation),
    MoveAnnotation { id: AnnotationId, position: Point },
    DeleteAnnotation(AnnotationId),
    AppendDrawingPoint { id: AnnotationId, point: Point },
    TranslateDrawingAnnotation { id: AnnotationId, delta: Vector },
    SetAnnotationText { id: AnnotationId, text: String },
    SetAnnotationStyle { id: AnnotationId, style: Style },
    SetGraphStyle(Style),

    // Node and relationship editing
    SetNodeCaption { nodes: Vec<NodeId>, caption: String },
    AddLabel { nodes: Vec<NodeId>, label: String },
    /// Renaming onto a label the node already has just drops `from`.
    RenameLabel { nodes: Vec<NodeId>, from: String, to: String },
    RemoveLabel { nodes: Vec<NodeId>, label: String },
    SetRelationshipType { relationships: Vec<RelationshipId>, rel_type: String },
    /// Swap the endpoints of each relationship.
    ReverseRelationships(Vec<RelationshipId>),
    /// Property edits apply to the nodes and relationships among `entities`.
    SetProperty { entities: Vec<EntityRef>, key: String, value: String },
    /// Moves the value of `from` to `to`, replacing any value already there.
    RenameProperty { entities: Vec<EntityRef>, from: String, to: String },
    RemoveProperty { entities: Vec<EntityRef>, key: String },
}

/// Continuous gestures whose samples collapse into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoGroup {
    MoveNodes,
    /// Samples of one stroke, keyed by its annotation.
    DrawingStroke(AnnotationId),
    MoveAnnotation,
    TranslateDrawing,
}

/// How a mutation relates to the open undo group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Its own undo step.
    Standalone,
    /// Always a new step, which later samples may join.
    Opens(UndoGroup),
    /// Joins an open group of the same kind, otherwise opens one.
    Joins(UndoGroup),
    /// Joins an open group of the same kind and closes it.
    Closes(UndoGroup),
}

impl GraphMutation {
    pub fn grouping(&self) -> Grouping {
        match self {
            GraphMutation::MoveNodes(_) => Grouping::Joins(UndoGroup::MoveNodes),
            GraphMutation::MoveNodesEndDrag(_) => Grouping::Closes(UndoGroup::MoveNodes),
            GraphMutation::CreateAnnotation(a) if a.is_drawing() => {
                Grouping::Opens(UndoGroup::DrawingStroke(a.id))
            }
            GraphMutation::AppendDrawingPoint { id, .. } => {
                Grouping::Joins(UndoGroup::DrawingStroke(*id))
            }
            // Removing an accidental stroke folds into that stroke's step
            GraphMutation::DeleteAnnotation(id) => Grouping::Closes(UndoGroup::DrawingStroke(*id)),
            GraphMutation::MoveAnnotation { .. } => Grouping::Joins(UndoGroup::MoveAnnotation),
            GraphMutation::TranslateDrawingAnnotation { .. } => {
                Grouping::Joins(UndoGroup::TranslateDrawing)
            }
            _ => Grouping::Standalone,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GraphMutation::CreateNode { .. } => "create node",
            GraphMutation::MoveNodes(_) | GraphMutation::MoveNodesEndDrag(_) => "move nodes",
            GraphMutation::DeleteNodes(_) => "delete nodes",
            GraphMutation::CreateRelationships(_) => "connect nodes",
            GraphMutation::DeleteRelationships(_) => "delete relationships",
            GraphMutation::CreateNodesAndRelationships(_) => "create nodes and relationships",
            GraphMutation::CreateAnnotation(a) if a.is_drawing() => "draw",
            GraphMutation::CreateAnnotation(_) => "create text",
            GraphMutation::MoveAnnotation { .. } => "move annotation",
            GraphMutation::DeleteAnnotation(_) => "delete annotation",
            GraphMutation::AppendDrawingPoint { .. } => "draw",
            GraphMutation::TranslateDrawingAnnotation { .. } => "move drawing",
            GraphMutation::SetAnnotationText { .. } => "edit text",
            GraphMutation::SetAnnotationStyle { .. } => "style annotation",
            GraphMutation::SetGraphStyle(_) => "style graph",
            GraphMutation::SetNodeCaption { .. } => "set caption",
            GraphMutation::AddLabel { .. } => "add label",
            GraphMutation::RenameLabel { .. } => "rename label",
            GraphMutation::RemoveLabel { .. } => "remove label",
            GraphMutation::SetRelationshipType { .. } => "set relationship type",
            GraphMutation::ReverseRelationships(_) => "reverse relationships",
            GraphMutation::SetProperty { .. } => "set property",
            GraphMutation::RenameProperty { .. } => "rename property",
            GraphMutation::RemoveProperty { .. } => "remove property",
        }
    }

    /// The next graph, or `None` when nothing would change. References to
    /// missing entities are skipped.
    pub fn apply(&self, graph: &Graph) -> Option<Graph> {
        match self {
            GraphMutation::CreateNode {
                id,
                position,
                caption,
                style,
            } => {
                if graph.node(*id).is_some() {
                    return None;
                }
                let mut node = Node::new(*id, *position);
                node.caption = caption.clone();
                node.style = style.clone();
                let mut next = graph.clone();
                next.nodes.push(node);
                Some(next)
            }

            GraphMutation::MoveNodes(positions) | GraphMutation::MoveNodesEndDrag(positions) => {
                let mut next = graph.clone();
                let mut changed = false;
                for np in positions {
                    if let Some(node) = next.nodes.iter_mut().find(|n| n.id == np.node_id)
                        && node.position != np.position
                    {
                        *node = node.moved_to(np.position);
                        changed = true;
                    }
                }
                changed.then_some(next)
            }

            GraphMutation::DeleteNodes(ids) => {
                if !graph.nodes.iter().any(|n| ids.contains(&n.id)) {
                    return None;
                }
                let mut next = graph.clone();
                next.nodes.retain(|n| !ids.contains(&n.id));
                next.relationships
                    .retain(|r| !ids.iter().any(|id| r.touches(*id)));
                Some(next)
            }

            GraphMutation::CreateRelationships(new) => {
                let mut next = graph.clone();
                for r in new {
                    if next.relationship(r.id).is_none()
                        && next.node(r.from_id).is_some()
                        && next.node(r.to_id).is_some()
                    {
                        next.relationships
                            .push(Relationship::new(r.id, r.from_id, r.to_id));
                    }
                }
                (next.relationships.len() != graph.relationships.len()).then_some(next)
            }

            GraphMutation::DeleteRelationships(ids) => {
                let mut next = graph.clone();
                next.relationships.retain(|r| !ids.contains(&r.id));
                (next.relationships.len() != graph.relationships.len()).then_some(next)
            }

            GraphMutation::CreateNodesAndRelationships(spawned) => {
                let mut next = graph.clone();
                for s in spawned {
                    if graph.node(s.source_id).is_none()
                        || next.node(s.node_id).is_some()
                        || next.relationship(s.relationship_id).is_some()
                    {
                        continue;
                    }
                    next.nodes.push(Node::new(s.node_id, s.position));
                    next.relationships.push(Relationship::new(
                        s.relationship_id,
                        s.source_id,
                        s.node_id,
                    ));
                }
                (next.nodes.len() != graph.nodes.len()).then_some(next)
            }

            GraphMutation::CreateAnnotation(annotation) => {
                if graph.annotation(annotation.id).is_some() {
                    return None;
                }
                let mut next = graph.clone();
                next.annotations.push(annotation.clone());
                Some(next)
            }

            GraphMutation::MoveAnnotation { id, position } => {
                update_annotation(graph, *id, |a| match a.kind {
                    AnnotationKind::Text { .. } => Some(a.with_position(*position)),
                    AnnotationKind::Drawing { .. } => None,
                })
            }

            GraphMutation::DeleteAnnotation(id) => {
                graph.annotation(*id)?;
                let mut next = graph.clone();
                next.annotations.retain(|a| a.id != *id);
                Some(next)
            }

            GraphMutation::AppendDrawingPoint { id, point } => {
                update_annotation(graph, *id, |a| a.is_drawing().then(|| a.with_point(*point)))
            }

            GraphMutation::TranslateDrawingAnnotation { id, delta } => {
                update_annotation(graph, *id, |a| a.is_drawing().then(|| a.translated(*delta)))
            }

            GraphMutation::SetAnnotationText { id, text } => {
                update_annotation(graph, *id, |a| match a.kind {
                    AnnotationKind::Text { .. } => Some(a.with_text(text)),
                    AnnotationKind::Drawing { .. } => None,
                })
            }

            GraphMutation::SetAnnotationStyle { id, style } => {
                update_annotation(graph, *id, |a| Some(a.with_style(style)))
            }

            GraphMutation::SetGraphStyle(style) => {
                let merged = graph.style.merge(style);
                (merged != graph.style).then(|| Graph {
                    style: merged,
                    ..graph.clone()
                })
            }

            GraphMutation::SetNodeCaption { nodes, caption } => {
                update_nodes(graph, nodes, |n| Node {
                    caption: caption.clone(),
                    ..n.clone()
                })
            }

            GraphMutation::AddLabel { nodes, label } => update_nodes(graph, nodes, |n| {
                let mut node = n.clone();
                if !node.labels.contains(label) {
                    node.labels.push(label.clone());
                }
                node
            }),

            GraphMutation::RenameLabel { nodes, from, to } => update_nodes(graph, nodes, |n| {
                let mut node = n.clone();
                let Some(index) = node.labels.iter().position(|l| l == from) else {
                    return node;
                };
                if node.labels.contains(to) {
                    node.labels.remove(index);
                } else {
                    node.labels[index] = to.clone();
                }
                node
            }),

            GraphMutation::RemoveLabel { nodes, label } => update_nodes(graph, nodes, |n| {
                let mut node = n.clone();
                node.labels.retain(|l| l != label);
                node
            }),

            GraphMutation::SetRelationshipType {
                relationships,
                rel_type,
            } => update_relationships(graph, relationships, |r| Relationship {
                rel_type: rel_type.clone(),
                ..r.clone()
            }),

            GraphMutation::ReverseRelationships(ids) => update_relationships(graph, ids, |r| {
                Relationship {
                    from_id: r.to_id,
                    to_id: r.from_id,
                    ..r.clone()
                }
            }),

            GraphMutation::SetProperty {
                entities,
                key,
                value,
            } => update_properties(graph, entities, |props| {
                props.insert(key.clone(), value.clone());
            }),

            GraphMutation::RenameProperty { entities, from, to } => {
                update_properties(graph, entities, |props| {
                    if let Some(value) = props.remove(from) {
                        props.insert(to.clone(), value);
                    }
                })
            }

            GraphMutation::RemoveProperty { entities, key } => {
                update_properties(graph, entities, |props| {
                    props.remove(key);
                })
            }
        }
    }
}

/// Rewrite the listed nodes. `None` when none of them changes.
fn update_nodes(graph: &Graph, ids: &[NodeId], f: impl Fn(&Node) -> Node) -> Option<Graph> {
    let mut next = graph.clone();
    let mut changed = false;
    for node in next.nodes.iter_mut().filter(|n| ids.contains(&n.id)) {
        let updated = f(node);
        if updated != *node {
            *node = updated;
            changed = true;
        }
    }
    changed.then_some(next)
}

/// Rewrite the listed relationships. `None` when none of them changes.
fn update_relationships(
    graph: &Graph,
    ids: &[RelationshipId],
    f: impl Fn(&Relationship) -> Relationship,
) -> Option<Graph> {
    let mut next = graph.clone();
    let mut changed = false;
    for relationship in next.relationships.iter_mut().filter(|r| ids.contains(&r.id)) {
        let updated = f(relationship);
        if updated != *relationship {
            *relationship = updated;
            changed = true;
        }
    }
    changed.then_some(next)
}

/// Edit the property maps of the nodes and relationships among `entities`.
fn update_properties(
    graph: &Graph,
    entities: &[EntityRef],
    edit: impl Fn(&mut BTreeMap<String, String>),
) -> Option<Graph> {
    let mut next = graph.clone();
    for node in next
        .nodes
        .iter_mut()
        .filter(|n| entities.contains(&EntityRef::Node(n.id)))
    {
        edit(&mut node.properties);
    }
    for relationship in next
        .relationships
        .iter_mut()
        .filter(|r| entities.contains(&EntityRef::Relationship(r.id)))
    {
        edit(&mut relationship.properties);
    }
    (next != *graph).then_some(next)
}

/// Swap one annotation for `f`'s replacement. `None` when the annotation
/// is missing, `f` declines, or the replacement is identical.
fn update_annotation(
    graph: &Graph,
    id: AnnotationId,
    f: impl FnOnce(&Annotation) -> Option<Annotation>,
) -> Option<Graph> {
    let index = graph.annotations.iter().position(|a| a.id == id)?;
    let updated = f(&graph.annotations[index])?;
    if updated == graph.annotations[index] {
        return None;
    }
    let mut next = graph.clone();
    next.annotations[index] = updated;
    Some(next)
}

//! Selection of graph entities and the single inline-editing target.

use crate::id::{AnnotationId, NodeId, RelationshipId};
use serde::{Deserialize, Serialize};

/// The kind of a selectable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Node,
    Relationship,
    Annotation,
}

/// A reference to one selectable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "entityType", content = "id", rename_all = "camelCase")]
pub enum EntityRef {
    Node(NodeId),
    Relationship(RelationshipId),
    Annotation(AnnotationId),
}

impl EntityRef {
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityRef::Node(_) => EntityType::Node,
            EntityRef::Relationship(_) => EntityType::Relationship,
            EntityRef::Annotation(_) => EntityType::Annotation,
        }
    }
}

/// How a set of entities is combined with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Exactly these entities.
    Replace,
    /// Toggle each entity in or out.
    Xor,
    /// Ensure each entity is selected, keeping the rest.
    AtLeast,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Selected entities in selection order.
    pub entities: Vec<EntityRef>,
    /// Entity in inline text-edit mode; always a member of `entities`.
    pub editing: Option<EntityRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        self.entities.contains(&entity)
    }

    pub fn toggled(&self, entities: &[EntityRef], mode: SelectionMode) -> Selection {
        let mut next = match mode {
            SelectionMode::Replace => Vec::new(),
            SelectionMode::Xor | SelectionMode::AtLeast => self.entities.clone(),
        };
        for &entity in entities {
            match mode {
                SelectionMode::Replace | SelectionMode::AtLeast => {
                    if !next.contains(&entity) {
                        next.push(entity);
                    }
                }
                SelectionMode::Xor => {
                    if let Some(pos) = next.iter().position(|e| *e == entity) {
                        next.remove(pos);
                    } else {
                        next.push(entity);
                    }
                }
            }
        }
        Selection {
            editing: self.editing.filter(|e| next.contains(e)),
            entities: next,
        }
    }

    pub fn cleared() -> Selection {
        Selection::default()
    }

    /// Select exactly `entity` and make it the editing target.
    pub fn editing(entity: EntityRef) -> Selection {
        Selection {
            entities: vec![entity],
            editing: Some(entity),
        }
    }

    /// Drop entities that no longer exist.
    pub fn retain(&self, mut keep: impl FnMut(EntityRef) -> bool) -> Selection {
        let entities: Vec<EntityRef> = self.entities.iter().copied().filter(|e| keep(*e)).collect();
        Selection {
            editing: self.editing.filter(|e| entities.contains(e)),
            entities,
        }
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entities.iter().filter_map(|e| match e {
            EntityRef::Node(id) => Some(*id),
            _ => None,
        })
    }

    pub fn relationship_ids(&self) -> impl Iterator<Item = RelationshipId> + '_ {
        self.entities.iter().filter_map(|e| match e {
            EntityRef::Relationship(id) => Some(*id),
            _ => None,
        })
    }

    pub fn annotation_ids(&self) -> impl Iterator<Item = AnnotationId> + '_ {
        self.entities.iter().filter_map(|e| match e {
            EntityRef::Annotation(id) => Some(*id),
            _ => None,
        })
    }

    pub fn node_selected(&self, id: NodeId) -> bool {
        self.contains(EntityRef::Node(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const A: EntityRef = EntityRef::Node(NodeId(0));
    const B: EntityRef = EntityRef::Node(NodeId(1));
    const R: EntityRef = EntityRef::Relationship(RelationshipId(0));

    fn of(entities: &[EntityRef]) -> Selection {
        Selection {
            entities: entities.to_vec(),
            editing: None,
        }
    }

    #[test]
    fn replace_discards_previous() {
        let s = of(&[A, R]).toggled(&[B], SelectionMode::Replace);
        assert_eq!(s.entities, vec![B]);
    }

    #[test]
    fn xor_toggles_membership() {
        let s = of(&[A]).toggled(&[A, B], SelectionMode::Xor);
        assert_eq!(s.entities, vec![B]);
    }

    #[test]
    fn at_least_keeps_others() {
        let s = of(&[A]).toggled(&[A, R], SelectionMode::AtLeast);
        assert_eq!(s.entities, vec![A, R]);
    }

    #[test]
    fn editing_cleared_when_deselected() {
        let s = Selection::editing(A).toggled(&[A], SelectionMode::Xor);
        assert!(s.is_empty());
        assert_eq!(s.editing, None);

        let kept = Selection::editing(A).toggled(&[B], SelectionMode::AtLeast);
        assert_eq!(kept.editing, Some(A));
    }

    #[test]
    fn typed_id_filters() {
        let s = of(&[A, R, B]);
        assert_eq!(s.node_ids().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1)]);
        assert_eq!(s.relationship_ids().collect::<Vec<_>>(), vec![RelationshipId(0)]);
        assert_eq!(s.annotation_ids().count(), 0);
    }

    #[test]
    fn entity_ref_json_shape() {
        let json = serde_json::to_value(A).unwrap();
        assert_eq!(json, serde_json::json!({"entityType": "node", "id": "n0"}));
    }
}

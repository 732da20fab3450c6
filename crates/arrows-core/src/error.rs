//! Errors for graphs handed in from outside the editor.

use crate::id::{AnnotationId, NodeId, RelationshipId};
use thiserror::Error;

/// Structural problems in a graph supplied from outside the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("duplicate relationship id {0}")]
    DuplicateRelationship(RelationshipId),

    #[error("duplicate annotation id {0}")]
    DuplicateAnnotation(AnnotationId),

    #[error("relationship {relationship} references missing node {node}")]
    DanglingRelationship {
        relationship: RelationshipId,
        node: NodeId,
    },
}

pub mod annotation;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod selection;
pub mod style;
pub mod viewport;

pub use annotation::{Annotation, AnnotationKind};
pub use error::GraphError;
pub use geometry::{BoundingBox, Point, Size, Vector};
pub use id::{AnnotationId, EntityId, NodeId, RelationshipId, next_available_id};
pub use model::{Graph, Node, Relationship};
pub use selection::{EntityRef, EntityType, Selection, SelectionMode};
pub use style::{Style, StyleValue};
pub use viewport::{FitScale, ViewTransformation, constrain_scroll};

//! Typed entity ids and id allocation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Common behaviour of the typed entity ids.
///
/// Ids are small integers scoped to their own collection, rendered with a
/// one-letter kind prefix (`n3`, `r0`, `a12`).
pub trait EntityId: Copy + Ord + fmt::Debug {
    const PREFIX: char;

    fn from_index(index: u32) -> Self;

    fn index(self) -> u32;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl EntityId for $name {
            const PREFIX: char = $prefix;

            fn from_index(index: u32) -> Self {
                $name(index)
            }

            fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                parse_prefixed(&s, $prefix)
                    .map($name)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {s}")))
            }
        }
    };
}

entity_id!(
    /// Identifier of a node, unique within a graph.
    NodeId,
    'n'
);
entity_id!(
    /// Identifier of a relationship, unique within a graph.
    RelationshipId,
    'r'
);
entity_id!(
    /// Identifier of an annotation, unique within a graph.
    AnnotationId,
    'a'
);

fn parse_prefixed(s: &str, prefix: char) -> Option<u32> {
    s.strip_prefix(prefix)?.parse().ok()
}

/// Next free id for a collection: one past the highest id in use, or 0.
/// `None` once the highest possible id is taken.
///
/// Ids below the maximum are never handed out again, so an id that was
/// freed and restored by undo cannot collide with one allocated since.
pub fn next_available_id<I: EntityId>(existing: impl IntoIterator<Item = I>) -> Option<I> {
    match existing.into_iter().map(EntityId::index).max() {
        None => Some(I::from_index(0)),
        Some(highest) => highest.checked_add(1).map(I::from_index),
    }
}

/// Successive ids starting at `first`, ending with the highest possible id.
pub fn id_sequence<I: EntityId>(first: I) -> impl Iterator<Item = I> {
    (first.index()..=u32::MAX).map(I::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_available_skips_gaps() {
        let ids = [NodeId(0), NodeId(4), NodeId(2)];
        assert_eq!(next_available_id(ids), Some(NodeId(5)));
        assert_eq!(next_available_id(Vec::<NodeId>::new()), Some(NodeId(0)));
    }

    #[test]
    fn allocation_stops_at_highest_id() {
        assert_eq!(next_available_id([NodeId(u32::MAX)]), None);
        assert_eq!(next_available_id([NodeId(u32::MAX - 1)]), Some(NodeId(u32::MAX)));
        let tail: Vec<NodeId> = id_sequence(NodeId(u32::MAX - 1)).collect();
        assert_eq!(tail, vec![NodeId(u32::MAX - 1), NodeId(u32::MAX)]);
    }

    #[test]
    fn sequence_counts_up() {
        let ids: Vec<RelationshipId> = id_sequence(RelationshipId(3)).take(3).collect();
        assert_eq!(ids, vec![RelationshipId(3), RelationshipId(4), RelationshipId(5)]);
    }

    #[test]
    fn display_uses_kind_prefix() {
        assert_eq!(NodeId(3).to_string(), "n3");
        assert_eq!(format!("{:?}", AnnotationId(12)), "a12");
    }

    #[test]
    fn serde_roundtrip_through_prefixed_string() {
        let json = serde_json::to_string(&RelationshipId(7)).unwrap();
        assert_eq!(json, "\"r7\"");
        let back: RelationshipId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RelationshipId(7));
        assert!(serde_json::from_str::<NodeId>("\"r7\"").is_err());
    }
}

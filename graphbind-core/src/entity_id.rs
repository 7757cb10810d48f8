//! Entity identifiers
//!
//! An entity is identified either by a global IRI or by a locally-scoped
//! identifier. Local identifiers name anonymous and compound nodes (blank
//! nodes, list cells) and are never serializable as global references.
//!
//! Two `EntityId`s are equal iff their normalized string forms match, which
//! the derived `PartialEq`/`Hash` on the enum provides directly. Ids are
//! immutable and cheap to clone, and are used as identity-map keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a mapped entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    /// Globally addressable IRI
    Iri(String),
    /// Locally-scoped identifier (blank/anonymous node)
    Local(String),
}

impl EntityId {
    /// Create an IRI-based id
    pub fn iri(iri: impl Into<String>) -> Self {
        EntityId::Iri(iri.into())
    }

    /// Create a locally-scoped id
    pub fn local(id: impl Into<String>) -> Self {
        EntityId::Local(id.into())
    }

    /// The IRI form, if this id is globally addressable
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            EntityId::Iri(iri) => Some(iri),
            EntityId::Local(_) => None,
        }
    }

    /// Whether this id is locally scoped
    pub fn is_local(&self) -> bool {
        matches!(self, EntityId::Local(_))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Iri(iri) => write!(f, "{}", iri),
            EntityId::Local(id) => write!(f, "_:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_by_normalized_form() {
        assert_eq!(EntityId::iri("http://ex/1"), EntityId::iri("http://ex/1"));
        assert_ne!(EntityId::iri("http://ex/1"), EntityId::iri("http://ex/2"));
        // An IRI and a local id never compare equal, even with the same text
        assert_ne!(EntityId::iri("b0"), EntityId::local("b0"));
    }

    #[test]
    fn test_local_ids_are_not_global() {
        assert_eq!(EntityId::iri("http://ex/1").as_iri(), Some("http://ex/1"));
        assert_eq!(EntityId::local("b0").as_iri(), None);
        assert!(EntityId::local("b0").is_local());
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(EntityId::iri("http://ex/1"), 1);
        map.insert(EntityId::local("b0"), 2);
        assert_eq!(map.get(&EntityId::iri("http://ex/1")), Some(&1));
        assert_eq!(map.get(&EntityId::local("b0")), Some(&2));
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityId::iri("http://ex/1").to_string(), "http://ex/1");
        assert_eq!(EntityId::local("b0").to_string(), "_:b0");
    }
}

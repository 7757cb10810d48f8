//! Node - atomic graph term
//!
//! A `Node` is an immutable tagged union over the three kinds of RDF terms:
//! an IRI reference, a locally-scoped (blank) identifier, or a literal with
//! an optional datatype and an optional language tag.
//!
//! ## Invariants
//!
//! - A node is never simultaneously a reference and a literal.
//! - A literal's language tag is mutually exclusive with a non-default
//!   datatype; the constructors enforce this (`lang_literal` never accepts
//!   a datatype, `typed_literal` never accepts a language tag).
//! - A literal without an explicit datatype defaults to `xsd:string`.
//!
//! Nodes are transient: created per read/write operation and never mutated
//! after construction.

use crate::entity_id::EntityId;
use crate::error::{Error, Result};
use graphbind_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An atomic graph term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    /// An IRI reference
    Iri(String),
    /// A blank node with local identifier
    Blank(String),
    /// A literal with optional datatype and language
    Literal {
        /// Lexical form
        value: String,
        /// Datatype IRI; `None` implies the plain-string default
        datatype: Option<String>,
        /// Language tag, mutually exclusive with a non-default datatype
        language: Option<String>,
    },
}

impl Node {
    /// Create an IRI node
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// Create a blank node
    pub fn blank(id: impl Into<String>) -> Self {
        Node::Blank(id.into())
    }

    /// Create a plain string literal
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a typed literal
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Node::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Create a language-tagged string literal
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Node::Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// Create a reference node from an entity id
    pub fn from_entity_id(id: &EntityId) -> Self {
        match id {
            EntityId::Iri(iri) => Node::Iri(iri.clone()),
            EntityId::Local(local) => Node::Blank(local.clone()),
        }
    }

    /// Whether this node is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal { .. })
    }

    /// Whether this node is an IRI reference
    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    /// Whether this node is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    /// The literal lexical form, if this node is a literal
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Node::Literal { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The effective datatype IRI of a literal
    ///
    /// Returns `rdf:langString` for language-tagged literals and the
    /// plain-string default (`xsd:string`) when no datatype was declared.
    /// Returns `None` for non-literal nodes.
    pub fn datatype_iri(&self) -> Option<&str> {
        match self {
            Node::Literal {
                datatype, language, ..
            } => match (datatype, language) {
                (Some(dt), _) => Some(dt),
                (None, Some(_)) => Some(rdf::LANG_STRING),
                (None, None) => Some(xsd::STRING),
            },
            _ => None,
        }
    }

    /// The language tag, if this node is a language-tagged literal
    pub fn language(&self) -> Option<&str> {
        match self {
            Node::Literal { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    /// The lexical form of this node: the IRI, the local identifier, or the
    /// literal value
    pub fn as_str(&self) -> &str {
        match self {
            Node::Iri(iri) => iri,
            Node::Blank(id) => id,
            Node::Literal { value, .. } => value,
        }
    }

    /// Resolve this node to an entity id
    ///
    /// IRI nodes become globally addressable ids, blank nodes become
    /// locally-scoped ids. Literals do not denote entities and fail with a
    /// conversion error.
    pub fn to_entity_id(&self) -> Result<EntityId> {
        match self {
            Node::Iri(iri) => Ok(EntityId::Iri(iri.clone())),
            Node::Blank(id) => Ok(EntityId::Local(id.clone())),
            Node::Literal { value, .. } => Err(Error::conversion(
                value.clone(),
                "EntityId",
                "a literal node does not denote an entity",
            )),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::Blank(id) => write!(f, "_:{}", id),
            Node::Literal { value, .. } => write!(f, "\"{}\"", value),
        }
    }
}

//! Error types for graphbind-core
//!
//! Every failure in the conversion core is attributable to one of these
//! variants; no operation surfaces a generic, unqualified failure.
//! Conversion-level errors abort only the property being converted —
//! callers decide whether a bad property fails the whole entity load.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A list cell is missing an rdf:rest before the nil sentinel, carries
    /// multiple rdf:first/rdf:rest candidates, or the chain is cyclic
    #[error("Malformed list at {node}: {reason}")]
    MalformedList {
        /// Identity of the offending list cell
        node: String,
        /// What made the chain malformed
        reason: String,
    },

    /// The requested conversion direction is not implemented
    #[error("Unsupported direction: {0}")]
    UnsupportedDirection(String),

    /// A value could not be converted to the requested target
    #[error("Cannot convert '{value}' to {target}: {reason}")]
    Conversion {
        /// Lexical or display form of the offending value
        value: String,
        /// Target type or datatype
        target: String,
        /// Why the conversion failed
        reason: String,
    },

    /// Mapping-model invariant violation
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing source / store error
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a malformed-list error
    pub fn malformed_list(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedList {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-direction error
    pub fn unsupported_direction(msg: impl Into<String>) -> Self {
        Error::UnsupportedDirection(msg.into())
    }

    /// Create a conversion error
    pub fn conversion(
        value: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Conversion {
            value: value.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-mapping error
    pub fn invalid_mapping(msg: impl Into<String>) -> Self {
        Error::InvalidMapping(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }
}

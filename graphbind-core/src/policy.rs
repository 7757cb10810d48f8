//! Conversion policies
//!
//! The permissive behaviors of the conversion engine are explicit, named
//! policies rather than implicit side effects, so callers can pick a
//! strictness level and tests can assert on the choice deliberately.

use serde::{Deserialize, Serialize};

/// What to do with a literal whose datatype has no registered converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownDatatype {
    /// Pass the literal through as its lexical string.
    ///
    /// This can silently produce semantically wrong values for exotic
    /// datatypes; it is a policy, not a defect.
    #[default]
    LexicalString,
    /// Fail the property conversion
    Fail,
}

/// What to do with collection elements that fail the declared type constraint
/// during write-direction conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonConforming {
    /// Silently skip non-conforming elements (partial tolerance of
    /// heterogeneous collections)
    #[default]
    Skip,
    /// Fail the property conversion
    Fail,
}

/// Bundle of conversion policies
///
/// The defaults reproduce the permissive behavior of the classic
/// object-graph mappers: unknown datatypes fall back to lexical strings and
/// heterogeneous collections are filtered rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionPolicy {
    /// Unknown-datatype handling
    pub unknown_datatype: UnknownDatatype,
    /// Non-conforming collection element handling
    pub non_conforming: NonConforming,
}

impl ConversionPolicy {
    /// The permissive defaults
    pub fn permissive() -> Self {
        ConversionPolicy::default()
    }

    /// Strict variant: unknown datatypes and non-conforming elements fail
    pub fn strict() -> Self {
        ConversionPolicy {
            unknown_datatype: UnknownDatatype::Fail,
            non_conforming: NonConforming::Fail,
        }
    }
}

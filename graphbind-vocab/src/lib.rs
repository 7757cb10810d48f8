//! RDF Vocabulary Constants for graphbind
//!
//! This crate provides a centralized location for the RDF and XSD vocabulary
//! IRIs used throughout the graphbind mapping stack.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//!
//! The `xsd` module additionally carries datatype classification helpers
//! (`is_string_like`, `is_integer_family`, `is_temporal`, `integer_bounds`)
//! for the layers that validate and convert literals.

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:JSON IRI
    pub const JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    ///
    /// This sentinel must match bit-exactly for list termination detection.
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// XSD vocabulary constants and datatype classification helpers
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:unsignedLong IRI
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";

    /// xsd:unsignedInt IRI
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";

    /// xsd:unsignedShort IRI
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";

    /// xsd:unsignedByte IRI
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// xsd:nonPositiveInteger IRI
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";

    /// xsd:negativeInteger IRI
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:time IRI
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    // ========================================================================
    // Datatype Classification
    // ========================================================================

    /// Check if a datatype IRI is an integer-family type
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    /// Check if a datatype IRI is a string-like type
    ///
    /// String-like types hold string values and should not accept implicit
    /// coercion from numbers or booleans.
    #[inline]
    pub fn is_string_like(datatype_iri: &str) -> bool {
        matches!(datatype_iri, STRING | ANY_URI)
    }

    /// Check if a datatype IRI is a temporal type
    #[inline]
    pub fn is_temporal(datatype_iri: &str) -> bool {
        matches!(datatype_iri, DATE_TIME | DATE | TIME)
    }

    /// Get the valid range bounds for an integer subtype as (min, max) inclusive.
    ///
    /// Returns `None` for unbounded types (xsd:integer) or non-integer types.
    /// Uses i128 to accommodate the full range of xsd:unsignedLong.
    ///
    /// Per XSD, sign-constrained types (`positiveInteger`, `nonNegativeInteger`,
    /// `negativeInteger`, `nonPositiveInteger`) only constrain the sign, not the
    /// magnitude; we bound them to the i128 range for practical purposes.
    #[inline]
    pub fn integer_bounds(datatype_iri: &str) -> Option<(i128, i128)> {
        match datatype_iri {
            BYTE => Some((i8::MIN as i128, i8::MAX as i128)),
            SHORT => Some((i16::MIN as i128, i16::MAX as i128)),
            INT => Some((i32::MIN as i128, i32::MAX as i128)),
            LONG => Some((i64::MIN as i128, i64::MAX as i128)),
            UNSIGNED_BYTE => Some((0, u8::MAX as i128)),
            UNSIGNED_SHORT => Some((0, u16::MAX as i128)),
            UNSIGNED_INT => Some((0, u32::MAX as i128)),
            UNSIGNED_LONG => Some((0, u64::MAX as i128)),
            POSITIVE_INTEGER => Some((1, i128::MAX)),
            NON_NEGATIVE_INTEGER => Some((0, i128::MAX)),
            NEGATIVE_INTEGER => Some((i128::MIN, -1)),
            NON_POSITIVE_INTEGER => Some((i128::MIN, 0)),
            // xsd:integer is truly unbounded
            INTEGER => None,
            _ => None,
        }
    }

    /// Get the local name portion of a datatype IRI (e.g., "integer" from xsd:integer)
    #[inline]
    pub fn datatype_local_name(datatype_iri: &str) -> Option<&str> {
        datatype_iri.rsplit('#').next()
    }
}

//! Typed value model
//!
//! `Value` is what read conversion produces and write conversion consumes:
//! a primitive scalar, a URI, an entity reference, or a sequence of any of
//! these. Entities are never literals and literals are never wrapped as
//! entities.
//!
//! Entity values compare by handle identity (`Arc::ptr_eq`); everything
//! else compares structurally.

use crate::entity::EntityHandle;
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use graphbind_core::ElementType;
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;

/// A converted value
#[derive(Debug, Clone)]
pub enum Value {
    /// String value (xsd:string and language-tagged strings)
    String(String),
    /// Boolean value (xsd:boolean)
    Boolean(bool),
    /// 64-bit signed integer (integer family when it fits)
    Long(i64),
    /// Arbitrary precision integer (xsd:integer beyond i64 range).
    /// Boxed to keep the enum small
    BigInt(Box<BigInt>),
    /// Arbitrary precision decimal (xsd:decimal).
    /// Boxed to keep the enum small
    Decimal(Box<BigDecimal>),
    /// 64-bit float (xsd:double, xsd:float)
    Double(f64),
    /// dateTime with offset (xsd:dateTime)
    DateTime(Box<DateTime<FixedOffset>>),
    /// Calendar date (xsd:date)
    Date(NaiveDate),
    /// Time of day (xsd:time)
    Time(NaiveTime),
    /// URI value, absolute or relative, kept as an opaque string
    Uri(String),
    /// Embedded JSON document (rdf:JSON)
    Json(serde_json::Value),
    /// Reference to a mapped entity
    Entity(EntityHandle),
    /// Ordered or unordered sequence of values
    Collection(Vec<Value>),
}

impl Value {
    /// Short name of the value's variant, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Long(_) => "integer",
            Value::BigInt(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Uri(_) => "uri",
            Value::Json(_) => "json",
            Value::Entity(_) => "entity",
            Value::Collection(_) => "collection",
        }
    }

    /// The lexical form used when a value is written as a plain literal
    pub fn lexical_form(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Long(n) => n.to_string(),
            Value::BigInt(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Double(d) => d.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Date(d) => d.to_string(),
            Value::Time(t) => t.to_string(),
            Value::Uri(u) => u.clone(),
            Value::Json(j) => j.to_string(),
            Value::Entity(e) => e.id().to_string(),
            Value::Collection(items) => {
                let parts: Vec<String> = items.iter().map(Value::lexical_form).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// Whether this value satisfies the declared element type constraint
    ///
    /// This is the type-constraint filter applied to heterogeneous
    /// collections during write-direction conversion.
    pub fn conforms_to(&self, ty: ElementType) -> bool {
        match ty {
            ElementType::Any => true,
            ElementType::String => matches!(self, Value::String(_)),
            ElementType::Boolean => matches!(self, Value::Boolean(_)),
            ElementType::Integer => matches!(self, Value::Long(_) | Value::BigInt(_)),
            ElementType::Decimal => matches!(self, Value::Decimal(_)),
            ElementType::Double => matches!(self, Value::Double(_)),
            ElementType::DateTime => matches!(self, Value::DateTime(_)),
            ElementType::Date => matches!(self, Value::Date(_)),
            ElementType::Time => matches!(self, Value::Time(_)),
            ElementType::Uri => matches!(self, Value::Uri(_)),
            ElementType::Json => matches!(self, Value::Json(_)),
            ElementType::Id | ElementType::Entity => matches!(self, Value::Entity(_)),
        }
    }

    /// The string content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The i64 content, if this is a fitting integer value
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// The entity handle, if this is an entity reference
    pub fn as_entity(&self) -> Option<&EntityHandle> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    /// The element sequence, if this is a collection
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Collection(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            // Entities compare by handle identity, not by content
            (Value::Entity(a), Value::Entity(b)) => Arc::ptr_eq(a, b),
            (Value::Collection(a), Value::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical_form())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::IdentityMap;
    use graphbind_core::EntityId;

    #[test]
    fn test_conforms_to_filter() {
        assert!(Value::from("x").conforms_to(ElementType::String));
        assert!(!Value::from(1i64).conforms_to(ElementType::String));
        assert!(Value::from(1i64).conforms_to(ElementType::Integer));
        assert!(Value::BigInt(Box::new(BigInt::from(7))).conforms_to(ElementType::Integer));
        assert!(Value::from("x").conforms_to(ElementType::Any));
        assert!(!Value::Uri("http://ex/1".into()).conforms_to(ElementType::Entity));
    }

    #[test]
    fn test_entity_equality_is_identity() {
        let identity = IdentityMap::new();
        let a = identity.resolve(&EntityId::iri("http://ex/1"));
        let b = identity.resolve(&EntityId::iri("http://ex/1"));
        assert_eq!(Value::Entity(a.clone()), Value::Entity(b));

        let other = Arc::new(crate::entity::Entity::new(EntityId::iri("http://ex/1")));
        // Same id, different handle: not equal
        assert_ne!(Value::Entity(a), Value::Entity(other));
    }

    #[test]
    fn test_lexical_forms() {
        assert_eq!(Value::from(true).lexical_form(), "true");
        assert_eq!(Value::from(42i64).lexical_form(), "42");
        assert_eq!(Value::Uri("http://ex/1".into()).lexical_form(), "http://ex/1");
    }
}

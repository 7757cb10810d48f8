//! Built-in scalar converters
//!
//! One bidirectional converter per XSD datatype family, mirroring the
//! datatype coverage of the storage layer: boolean, the integer family
//! (bounded subtypes validated against their bit width, `xsd:integer`
//! unbounded), decimal, double/float, the temporal types, anyURI and
//! rdf:JSON. All converters expect fully expanded datatype IRIs.
//!
//! Conversion errors carry the offending lexical form and target datatype
//! so a failure is attributable to the one property being converted.

use crate::registry::ScalarConverter;
use crate::value::Value;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};
use graphbind_core::{Error, Node, Result};
use graphbind_vocab::{rdf, xsd};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::str::FromStr;

fn unexpected_value(value: &Value, target: &str) -> Error {
    Error::conversion(
        value.lexical_form(),
        target,
        format!("expected a {} value", target),
    )
}

/// Converter for xsd:string
///
/// Plain strings keep the default datatype on write, so round-trips do not
/// introduce an explicit xsd:string annotation.
pub struct StringConverter;

impl ScalarConverter for StringConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::STRING]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        Ok(Value::String(node.as_str().to_owned()))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::String(s) => Ok(Node::literal(s.clone())),
            other => Err(unexpected_value(other, "string")),
        }
    }
}

/// Converter for xsd:boolean
pub struct BooleanConverter;

impl ScalarConverter for BooleanConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::BOOLEAN]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        match node.as_str().trim() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            other => Err(Error::conversion(other, "boolean", "expected true/false/1/0")),
        }
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Boolean(b) => Ok(Node::typed_literal(b.to_string(), xsd::BOOLEAN)),
            other => Err(unexpected_value(other, "boolean")),
        }
    }
}

/// Converter for the XSD integer family
///
/// Bounded subtypes (xsd:long, xsd:byte, the unsigned and sign-constrained
/// types) are range-checked against their declared bounds. `xsd:integer` is
/// unbounded: values beyond i64 are kept as arbitrary-precision integers.
pub struct IntegerConverter;

impl ScalarConverter for IntegerConverter {
    fn datatypes(&self) -> &[&str] {
        &[
            xsd::INTEGER,
            xsd::LONG,
            xsd::INT,
            xsd::SHORT,
            xsd::BYTE,
            xsd::UNSIGNED_LONG,
            xsd::UNSIGNED_INT,
            xsd::UNSIGNED_SHORT,
            xsd::UNSIGNED_BYTE,
            xsd::NON_NEGATIVE_INTEGER,
            xsd::POSITIVE_INTEGER,
            xsd::NON_POSITIVE_INTEGER,
            xsd::NEGATIVE_INTEGER,
        ]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let datatype = node.datatype_iri().unwrap_or(xsd::INTEGER);
        let local = xsd::datatype_local_name(datatype).unwrap_or(datatype);
        let text = node.as_str().trim();
        let parsed = BigInt::from_str(text)
            .map_err(|e| Error::conversion(text, local, e.to_string()))?;

        if let Some((min, max)) = xsd::integer_bounds(datatype) {
            let narrow = parsed.to_i128().ok_or_else(|| {
                Error::conversion(text, local, format!("out of range {} to {}", min, max))
            })?;
            if narrow < min || narrow > max {
                return Err(Error::conversion(
                    text,
                    local,
                    format!("out of range {} to {}", min, max),
                ));
            }
        }

        match parsed.to_i64() {
            Some(n) => Ok(Value::Long(n)),
            None => Ok(Value::BigInt(Box::new(parsed))),
        }
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Long(n) => Ok(Node::typed_literal(n.to_string(), xsd::INTEGER)),
            Value::BigInt(n) => Ok(Node::typed_literal(n.to_string(), xsd::INTEGER)),
            other => Err(unexpected_value(other, "integer")),
        }
    }
}

/// Converter for xsd:decimal
pub struct DecimalConverter;

impl ScalarConverter for DecimalConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::DECIMAL]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str().trim();
        let decimal = BigDecimal::from_str(text)
            .map_err(|e| Error::conversion(text, "decimal", e.to_string()))?;
        Ok(Value::Decimal(Box::new(decimal)))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Decimal(d) => Ok(Node::typed_literal(d.to_string(), xsd::DECIMAL)),
            other => Err(unexpected_value(other, "decimal")),
        }
    }
}

/// Converter for xsd:double and xsd:float
///
/// Both map to f64. The XSD special lexical forms INF, -INF and NaN are
/// honored in both directions.
pub struct DoubleConverter;

impl ScalarConverter for DoubleConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::DOUBLE, xsd::FLOAT]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str().trim();
        let parsed = match text {
            "INF" | "+INF" => f64::INFINITY,
            "-INF" => f64::NEG_INFINITY,
            "NaN" => f64::NAN,
            _ => f64::from_str(text)
                .map_err(|e| Error::conversion(text, "double", e.to_string()))?,
        };
        Ok(Value::Double(parsed))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Double(d) => {
                let lexical = if d.is_nan() {
                    "NaN".to_owned()
                } else if d.is_infinite() {
                    if *d > 0.0 { "INF".to_owned() } else { "-INF".to_owned() }
                } else {
                    d.to_string()
                };
                Ok(Node::typed_literal(lexical, xsd::DOUBLE))
            }
            other => Err(unexpected_value(other, "double")),
        }
    }
}

/// Converter for xsd:dateTime (offset-preserving, RFC 3339 lexical forms)
pub struct DateTimeConverter;

impl ScalarConverter for DateTimeConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::DATE_TIME]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str().trim();
        let parsed = DateTime::parse_from_rfc3339(text)
            .map_err(|e| Error::conversion(text, "dateTime", e.to_string()))?;
        Ok(Value::DateTime(Box::new(parsed)))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::DateTime(dt) => Ok(Node::typed_literal(dt.to_rfc3339(), xsd::DATE_TIME)),
            other => Err(unexpected_value(other, "dateTime")),
        }
    }
}

/// Converter for xsd:date
pub struct DateConverter;

impl ScalarConverter for DateConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::DATE]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str().trim();
        let parsed = NaiveDate::from_str(text)
            .map_err(|e| Error::conversion(text, "date", e.to_string()))?;
        Ok(Value::Date(parsed))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Date(d) => Ok(Node::typed_literal(d.to_string(), xsd::DATE)),
            other => Err(unexpected_value(other, "date")),
        }
    }
}

/// Converter for xsd:time
pub struct TimeConverter;

impl ScalarConverter for TimeConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::TIME]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str().trim();
        let parsed = NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .map_err(|e| Error::conversion(text, "time", e.to_string()))?;
        Ok(Value::Time(parsed))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Time(t) => {
                let lexical = if t.nanosecond() == 0 {
                    t.format("%H:%M:%S").to_string()
                } else {
                    t.format("%H:%M:%S%.f").to_string()
                };
                Ok(Node::typed_literal(lexical, xsd::TIME))
            }
            other => Err(unexpected_value(other, "time")),
        }
    }
}

/// Converter for xsd:anyURI
///
/// URIs are kept as opaque strings, absolute or relative; no validation is
/// performed on the lexical form.
pub struct UriConverter;

impl ScalarConverter for UriConverter {
    fn datatypes(&self) -> &[&str] {
        &[xsd::ANY_URI]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        Ok(Value::Uri(node.as_str().to_owned()))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Uri(u) => Ok(Node::typed_literal(u.clone(), xsd::ANY_URI)),
            other => Err(unexpected_value(other, "anyURI")),
        }
    }
}

/// Converter for rdf:JSON
pub struct JsonConverter;

impl ScalarConverter for JsonConverter {
    fn datatypes(&self) -> &[&str] {
        &[rdf::JSON]
    }

    fn node_to_value(&self, node: &Node) -> Result<Value> {
        let text = node.as_str();
        let parsed: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| Error::conversion(text, "JSON", e.to_string()))?;
        Ok(Value::Json(parsed))
    }

    fn value_to_node(&self, value: &Value) -> Result<Node> {
        match value {
            Value::Json(j) => Ok(Node::typed_literal(j.to_string(), rdf::JSON)),
            other => Err(unexpected_value(other, "JSON")),
        }
    }
}

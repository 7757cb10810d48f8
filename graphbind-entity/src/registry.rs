//! Converter registry
//!
//! The registry owns the catalog of scalar converters (one per literal
//! datatype) and complex-type converters (entity-shaped structures such as
//! RDF lists), and selects the applicable one per node or value.
//!
//! ## Selection rules
//!
//! - Scalar converters are keyed by datatype IRI; `best_converter_for`
//!   matches a literal node's effective datatype exactly and returns `None`
//!   for non-literals or unknown datatypes (the caller falls back to the
//!   generic string/URI path).
//! - Complex converters are tried in registration order; the first whose
//!   `can_convert` predicate claims the candidate wins. Registration order
//!   is stable, so dispatch is deterministic: ties resolve by first match,
//!   not best match.
//! - Each complex converter is registered under a capability tag; a
//!   property mapping may name a tag explicitly to shortcut the scan.
//!
//! Registration is a configuration-time operation and is not safe to
//! interleave with conversion traffic; hosts serialize setup before use.
//! Re-registering a datatype or tag replaces the prior entry (last
//! registration wins).

use crate::engine::ConvertScope;
use crate::entity::EntityHandle;
use crate::list::RdfListConverter;
use crate::scalar::{
    BooleanConverter, DateConverter, DateTimeConverter, DecimalConverter, DoubleConverter,
    IntegerConverter, JsonConverter, StringConverter, TimeConverter, UriConverter,
};
use crate::value::Value;
use graphbind_core::{EntityStore, Node, PropertyMapping, Result};
use graphbind_vocab::{rdf, xsd};
use std::collections::HashMap;
use std::sync::Arc;

/// Bidirectional converter between literal nodes and scalar values
pub trait ScalarConverter: Send + Sync {
    /// The datatype IRIs this converter handles
    fn datatypes(&self) -> &[&str];

    /// Convert a literal node to a typed value
    fn node_to_value(&self, node: &Node) -> Result<Value>;

    /// Convert a typed value back to a literal node
    fn value_to_node(&self, value: &Value) -> Result<Node>;
}

/// Converter for complex, entity-shaped structures
pub trait ComplexConverter: Send + Sync {
    /// Whether this converter claims the given entity for the property
    fn can_convert(
        &self,
        entity: &EntityHandle,
        store: &EntityStore,
        mapping: Option<&PropertyMapping>,
    ) -> bool;

    /// Materialize the claimed entity into a value
    fn convert(&self, entity: &EntityHandle, scope: &ConvertScope<'_>) -> Result<Value>;

    /// Whether this converter claims the given value for write-direction
    /// conversion of the property
    fn can_convert_back(&self, value: &Value, mapping: &PropertyMapping) -> bool;

    /// Convert the claimed value back into nodes
    fn convert_back(&self, value: &Value) -> Result<Vec<Node>>;
}

/// Catalog of scalar and complex converters
pub struct ConverterRegistry {
    scalars: HashMap<String, Arc<dyn ScalarConverter>>,
    complex: Vec<(String, Arc<dyn ComplexConverter>)>,
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ConverterRegistry {
            scalars: HashMap::new(),
            complex: Vec::new(),
        }
    }

    /// Create a registry with the built-in converters registered
    ///
    /// Scalars: boolean, integer family, decimal, double/float, dateTime,
    /// date, time, anyURI, rdf:JSON, string. Complex: the RDF-list
    /// converter under the `"rdf-list"` tag.
    pub fn with_defaults() -> Self {
        let mut registry = ConverterRegistry::new();
        registry.register_scalar(Arc::new(StringConverter));
        registry.register_scalar(Arc::new(BooleanConverter));
        registry.register_scalar(Arc::new(IntegerConverter));
        registry.register_scalar(Arc::new(DecimalConverter));
        registry.register_scalar(Arc::new(DoubleConverter));
        registry.register_scalar(Arc::new(DateTimeConverter));
        registry.register_scalar(Arc::new(DateConverter));
        registry.register_scalar(Arc::new(TimeConverter));
        registry.register_scalar(Arc::new(UriConverter));
        registry.register_scalar(Arc::new(JsonConverter));
        registry.register_complex("rdf-list", Arc::new(RdfListConverter::new()));
        registry
    }

    /// Register a scalar converter for every datatype it declares
    ///
    /// Last registration wins per datatype.
    pub fn register_scalar(&mut self, converter: Arc<dyn ScalarConverter>) {
        for datatype in converter.datatypes() {
            self.scalars.insert((*datatype).to_owned(), converter.clone());
        }
    }

    /// Register a complex converter under a capability tag
    ///
    /// Re-registering a tag replaces the prior entry in place, preserving
    /// its position in the dispatch order.
    pub fn register_complex(&mut self, tag: impl Into<String>, converter: Arc<dyn ComplexConverter>) {
        let tag = tag.into();
        if let Some(slot) = self.complex.iter_mut().find(|(t, _)| *t == tag) {
            slot.1 = converter;
        } else {
            self.complex.push((tag, converter));
        }
    }

    /// The scalar converter whose declared datatype matches the node's
    ///
    /// Returns `None` if the node is not a literal or no converter is
    /// registered for its effective datatype.
    pub fn best_converter_for(&self, node: &Node) -> Option<Arc<dyn ScalarConverter>> {
        let datatype = node.datatype_iri()?;
        self.scalars.get(datatype).cloned()
    }

    /// Complex converters in registration order, with their tags
    pub fn complex_converters(
        &self,
    ) -> impl Iterator<Item = &(String, Arc<dyn ComplexConverter>)> {
        self.complex.iter()
    }

    /// The complex converter registered under the given tag
    pub fn complex_by_tag(&self, tag: &str) -> Option<&Arc<dyn ComplexConverter>> {
        self.complex.iter().find(|(t, _)| t == tag).map(|(_, c)| c)
    }

    /// The first complex converter claiming the value for write-direction
    /// conversion of the property
    pub fn complex_back_for(
        &self,
        value: &Value,
        mapping: &PropertyMapping,
    ) -> Option<&Arc<dyn ComplexConverter>> {
        self.complex
            .iter()
            .find(|(_, c)| c.can_convert_back(value, mapping))
            .map(|(_, c)| c)
    }

    /// The scalar converter for a value's runtime variant, by its canonical
    /// datatype
    ///
    /// Used by the single-value write path so scalars round-trip as typed
    /// literals. Entity, URI and collection values have no scalar datatype
    /// and return `None`.
    pub fn scalar_for_value(&self, value: &Value) -> Option<Arc<dyn ScalarConverter>> {
        let datatype = match value {
            Value::String(_) => xsd::STRING,
            Value::Boolean(_) => xsd::BOOLEAN,
            Value::Long(_) | Value::BigInt(_) => xsd::INTEGER,
            Value::Decimal(_) => xsd::DECIMAL,
            Value::Double(_) => xsd::DOUBLE,
            Value::DateTime(_) => xsd::DATE_TIME,
            Value::Date(_) => xsd::DATE,
            Value::Time(_) => xsd::TIME,
            Value::Json(_) => rdf::JSON,
            Value::Uri(_) | Value::Entity(_) | Value::Collection(_) => return None,
        };
        self.scalars.get(datatype).cloned()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        ConverterRegistry::with_defaults()
    }
}

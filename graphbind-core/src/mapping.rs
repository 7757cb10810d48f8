//! Declarative mapping model
//!
//! The mapping model is a read-only description of how a mapped type's
//! properties bind to predicates and how multi-valued properties are
//! physically encoded. It is built once by an external mapping source
//! (attribute/fluent parsers are out of scope here) and queried for the
//! lifetime of the process; nothing in this crate mutates it.
//!
//! Declared return shapes are a closed set of tagged variants
//! (`Scalar` / `NestedEntity` / `CollectionOf` / `Dictionary`) rather than
//! open-ended runtime type inspection. Custom complex converters are named
//! by capability tag in [`PropertyMapping::converter`] and resolved against
//! the converter registry.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Declared element type of a mapped property
///
/// This is the CLR-agnostic "what the application sees" type: it drives
/// literal-vs-reference classification on read and the type-constraint
/// filter on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// A plain string
    String,
    /// A boolean
    Boolean,
    /// An integer (i64 with arbitrary-precision overflow)
    Integer,
    /// An arbitrary-precision decimal
    Decimal,
    /// A 64-bit float
    Double,
    /// A dateTime with offset
    DateTime,
    /// A calendar date
    Date,
    /// A time of day
    Time,
    /// A URI value (absolute or relative, kept as an opaque string)
    Uri,
    /// An embedded JSON document
    Json,
    /// An identifier-only entity reference (no full load on read)
    Id,
    /// A full entity reference
    Entity,
    /// No constraint
    Any,
}

impl ElementType {
    /// Whether values of this type live in literal nodes
    ///
    /// `Uri`, `Id`, `Entity` and `Any` are reference-shaped (or unknown) and
    /// classify as non-literal.
    pub fn is_literal_like(&self) -> bool {
        matches!(
            self,
            ElementType::String
                | ElementType::Boolean
                | ElementType::Integer
                | ElementType::Decimal
                | ElementType::Double
                | ElementType::DateTime
                | ElementType::Date
                | ElementType::Time
                | ElementType::Json
        )
    }
}

/// Physical encoding of a multi-valued property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageStrategy {
    /// Each element is an independent statement sharing subject+predicate;
    /// insertion order is not guaranteed by the encoding
    SimpleCollection,
    /// Elements are encoded as a linked chain of anonymous list cells;
    /// insertion order is preserved by construction
    RdfList,
}

/// Declared return shape of a mapped property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnShape {
    /// A single value of the given element type
    Scalar {
        /// The element type
        ty: ElementType,
        /// Whether absence is an expected state rather than an error
        optional: bool,
    },
    /// A single nested entity
    NestedEntity,
    /// A collection of values of the given element type
    CollectionOf(ElementType),
    /// A dictionary-like aggregation keyed off the graph
    Dictionary,
}

/// Declarative binding of one typed property to a predicate and encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Target predicate IRI
    pub predicate: String,
    /// Property name on the mapped type
    pub name: String,
    /// Declared return shape
    pub shape: ReturnShape,
    /// Optional explicit complex-converter capability tag
    pub converter: Option<String>,
    /// Storage strategy; present iff `shape` is `CollectionOf`
    pub storage: Option<StorageStrategy>,
}

impl PropertyMapping {
    /// Create a required scalar property mapping
    pub fn scalar(name: impl Into<String>, predicate: impl Into<String>, ty: ElementType) -> Self {
        PropertyMapping {
            predicate: predicate.into(),
            name: name.into(),
            shape: ReturnShape::Scalar {
                ty,
                optional: false,
            },
            converter: None,
            storage: None,
        }
    }

    /// Create an optional scalar property mapping
    pub fn optional_scalar(
        name: impl Into<String>,
        predicate: impl Into<String>,
        ty: ElementType,
    ) -> Self {
        PropertyMapping {
            predicate: predicate.into(),
            name: name.into(),
            shape: ReturnShape::Scalar { ty, optional: true },
            converter: None,
            storage: None,
        }
    }

    /// Create a nested-entity property mapping
    pub fn nested(name: impl Into<String>, predicate: impl Into<String>) -> Self {
        PropertyMapping {
            predicate: predicate.into(),
            name: name.into(),
            shape: ReturnShape::NestedEntity,
            converter: None,
            storage: None,
        }
    }

    /// Create a collection property mapping with its storage strategy
    pub fn collection(
        name: impl Into<String>,
        predicate: impl Into<String>,
        ty: ElementType,
        storage: StorageStrategy,
    ) -> Self {
        PropertyMapping {
            predicate: predicate.into(),
            name: name.into(),
            shape: ReturnShape::CollectionOf(ty),
            converter: None,
            storage: Some(storage),
        }
    }

    /// Name an explicit complex converter by capability tag
    pub fn with_converter(mut self, tag: impl Into<String>) -> Self {
        self.converter = Some(tag.into());
        self
    }

    /// The declared element type of this property
    ///
    /// For scalars and collections this is the declared type; nested
    /// entities are entity-typed and dictionaries are unconstrained.
    pub fn element_type(&self) -> ElementType {
        match self.shape {
            ReturnShape::Scalar { ty, .. } => ty,
            ReturnShape::NestedEntity => ElementType::Entity,
            ReturnShape::CollectionOf(ty) => ty,
            ReturnShape::Dictionary => ElementType::Any,
        }
    }

    /// Whether this property is stored as an RDF list
    pub fn is_rdf_list(&self) -> bool {
        self.storage == Some(StorageStrategy::RdfList)
    }

    /// Check the mapping-model invariant: a storage strategy is present iff
    /// the shape is `CollectionOf`
    pub fn validate(&self) -> Result<()> {
        match (&self.shape, &self.storage) {
            (ReturnShape::CollectionOf(_), Some(_)) => Ok(()),
            (ReturnShape::CollectionOf(_), None) => Err(Error::invalid_mapping(format!(
                "collection property '{}' has no storage strategy",
                self.name
            ))),
            (_, Some(_)) => Err(Error::invalid_mapping(format!(
                "non-collection property '{}' carries a storage strategy",
                self.name
            ))),
            (_, None) => Ok(()),
        }
    }
}

/// Mapping of a whole type: its class IRI and ordered property mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMapping {
    /// Name of the mapped type
    pub type_name: String,
    /// Optional rdf:type class IRI
    pub class_iri: Option<String>,
    /// Property mappings, in declaration order
    pub properties: Vec<PropertyMapping>,
}

impl EntityMapping {
    /// Create an entity mapping
    pub fn new(type_name: impl Into<String>, properties: Vec<PropertyMapping>) -> Self {
        EntityMapping {
            type_name: type_name.into(),
            class_iri: None,
            properties,
        }
    }

    /// Set the class IRI
    pub fn with_class(mut self, class_iri: impl Into<String>) -> Self {
        self.class_iri = Some(class_iri.into());
        self
    }

    /// Look up a property mapping by name
    pub fn property(&self, name: &str) -> Option<&PropertyMapping> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property mapping by predicate IRI
    pub fn property_for_predicate(&self, predicate: &str) -> Option<&PropertyMapping> {
        self.properties.iter().find(|p| p.predicate == predicate)
    }

    /// Validate every property mapping
    pub fn validate(&self) -> Result<()> {
        for property in &self.properties {
            property.validate()?;
        }
        Ok(())
    }
}

/// Immutable set of entity mappings, queried by type name
#[derive(Debug, Clone, Default)]
pub struct MappingSet {
    mappings: Vec<EntityMapping>,
}

impl MappingSet {
    /// Build a mapping set, validating every mapping
    pub fn new(mappings: Vec<EntityMapping>) -> Result<Self> {
        for mapping in &mappings {
            mapping.validate()?;
        }
        Ok(MappingSet { mappings })
    }

    /// Look up a type's mapping by name
    pub fn for_type(&self, type_name: &str) -> Option<&EntityMapping> {
        self.mappings.iter().find(|m| m.type_name == type_name)
    }

    /// All mappings, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &EntityMapping> {
        self.mappings.iter()
    }
}

//! # graphbind entity layer
//!
//! Conversion engine, converter registry, list materializer, and entity
//! context for mapping triple statements to typed values and back.
//!
//! This crate provides:
//! - [`Value`]: the typed values applications see
//! - [`ConverterRegistry`] with built-in scalar converters per XSD datatype
//!   and pluggable complex converters keyed by capability tag
//! - The conversion engine ([`engine`]): literal/reference classification,
//!   scalar dispatch, and write-direction conversion with type-constraint
//!   filtering
//! - [`RdfListConverter`]: ordered materialization of `rdf:first`/`rdf:rest`
//!   chains with explicit malformed-list detection
//! - [`EntityContext`]: load/create orchestration with an identity map
//!   guaranteeing reference-equal handles per id
//!
//! ## Example
//!
//! ```ignore
//! use graphbind_core::{ElementType, EntityId, MappingSet, PropertyMapping};
//! use graphbind_entity::EntityContext;
//!
//! let ctx = EntityContext::new(source, MappingSet::default());
//! let person = ctx.load(&EntityId::iri("http://ex/person/1")).await?;
//! let name = PropertyMapping::scalar("name", "http://xmlns.com/foaf/0.1/name", ElementType::String);
//! let values = ctx.get(&person, &name).await?;
//! ```

pub mod context;
pub mod engine;
pub mod entity;
pub mod list;
pub mod registry;
pub mod scalar;
pub mod value;

pub use context::EntityContext;
pub use engine::ConvertScope;
pub use entity::{Entity, EntityHandle, IdentityMap};
pub use list::RdfListConverter;
pub use registry::{ComplexConverter, ConverterRegistry, ScalarConverter};
pub use value::Value;

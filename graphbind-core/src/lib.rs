//! # graphbind core
//!
//! Core model for mapping typed object graphs onto triple statements.
//!
//! This crate provides:
//! - Graph terms: [`Node`] (IRI / blank / literal) and [`EntityId`]
//! - The declarative mapping model: [`PropertyMapping`], [`EntityMapping`],
//!   [`ReturnShape`], [`StorageStrategy`]
//! - The in-memory statement cache [`EntityStore`] and the async
//!   [`EntitySource`] seam
//! - The conversion error taxonomy and named conversion policies
//!
//! ## Design Principles
//!
//! 1. **Async at the I/O seam only**: the [`EntitySource`] trait is the
//!    single suspension point; traversal over in-memory statements is
//!    synchronous.
//! 2. **Closed shape set**: declared return shapes are tagged variants, not
//!    runtime type inspection.
//! 3. **Named policies**: permissive fallbacks are explicit and
//!    test-assertable, never implicit side effects.

pub mod entity_id;
pub mod error;
pub mod mapping;
pub mod node;
pub mod policy;
pub mod store;

pub use entity_id::EntityId;
pub use error::{Error, Result};
pub use mapping::{
    ElementType, EntityMapping, MappingSet, PropertyMapping, ReturnShape, StorageStrategy,
};
pub use node::Node;
pub use policy::{ConversionPolicy, NonConforming, UnknownDatatype};
pub use store::{EntitySource, EntityStore, Statement};

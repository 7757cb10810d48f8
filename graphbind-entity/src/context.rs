//! Entity context
//!
//! The orchestrator: owns the statement store, the identity map, the
//! converter registry and the mapping set, and delegates per-property
//! conversion to the engine. Loading is the only async operation; once an
//! entity's statements are in the store, property reads and writes are
//! synchronous.
//!
//! Property-level conversion failures abort only the property being
//! converted; the caller decides whether one bad property fails the whole
//! entity or is reported and skipped.

use crate::engine::{self, ConvertScope};
use crate::entity::{EntityHandle, IdentityMap};
use crate::registry::ConverterRegistry;
use crate::value::Value;
use graphbind_core::{
    ConversionPolicy, ElementType, EntityId, EntitySource, EntityStore, Error, MappingSet,
    PropertyMapping, Result, ReturnShape, Statement,
};
use graphbind_vocab::rdf;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Orchestrates entity load, property conversion, and write-back
pub struct EntityContext {
    source: Arc<dyn EntitySource>,
    store: EntityStore,
    identity: IdentityMap,
    registry: ConverterRegistry,
    mappings: MappingSet,
    policy: ConversionPolicy,
}

impl EntityContext {
    /// Create a context with the default converter registry and permissive
    /// policies
    pub fn new(source: Arc<dyn EntitySource>, mappings: MappingSet) -> Self {
        EntityContext {
            source,
            store: EntityStore::new(),
            identity: IdentityMap::new(),
            registry: ConverterRegistry::with_defaults(),
            mappings,
            policy: ConversionPolicy::default(),
        }
    }

    /// Replace the converter registry (configuration time, before traffic)
    pub fn with_registry(mut self, registry: ConverterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the conversion policies
    pub fn with_policy(mut self, policy: ConversionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The context's statement store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The context's converter registry
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// The context's mapping set
    pub fn mappings(&self) -> &MappingSet {
        &self.mappings
    }

    fn scope(&self) -> ConvertScope<'_> {
        ConvertScope {
            store: &self.store,
            identity: &self.identity,
            registry: &self.registry,
            policy: &self.policy,
        }
    }

    /// Load an entity: fetch its statements from the source (idempotent)
    /// and return its identity-mapped handle
    pub async fn load(&self, id: &EntityId) -> Result<EntityHandle> {
        if !self.store.is_loaded(id) {
            debug!(entity = %id, "loading entity");
            let statements = self.source.load_entity(id).await?;
            self.store.insert_all(statements);
            self.store.mark_loaded(id);
        }
        Ok(self.identity.resolve(id))
    }

    /// Create a new entity handle without consulting the source
    ///
    /// The handle is identity mapped and its subject marked loaded, so
    /// subsequent reads see only locally applied statements.
    pub fn create(&self, id: &EntityId) -> EntityHandle {
        self.store.mark_loaded(id);
        self.identity.resolve(id)
    }

    /// Read a property: all converted values for the entity's mapped
    /// predicate
    pub async fn get(
        &self,
        entity: &EntityHandle,
        mapping: &PropertyMapping,
    ) -> Result<Vec<Value>> {
        mapping.validate()?;
        let nodes = self.store.objects_for(entity.id(), &mapping.predicate);

        // Reference-bound nodes get their statements pulled in before the
        // synchronous conversion pass, unless the property only wants ids.
        // List heads pull in their whole chain: a source is only obliged to
        // return the asked subject's statements, so interior cells and
        // IRI-identified elements may each need their own load.
        if mapping.element_type() != ElementType::Id {
            for node in &nodes {
                if !engine::treat_as_literal(node, Some(mapping)) {
                    if let Ok(id) = node.to_entity_id() {
                        if mapping.is_rdf_list() {
                            self.load_list_chain(&id).await?;
                        } else if !self.store.is_loaded(&id) {
                            self.load(&id).await?;
                        }
                    }
                }
            }
        }

        engine::convert_nodes(&nodes, Some(mapping), &self.scope())
            .into_iter()
            .collect()
    }

    /// Load every cell of an `rdf:rest` chain and every IRI-identified
    /// element, so the synchronous list materializer sees the full chain
    ///
    /// Structural anomalies (missing or ambiguous `rest`, a `rest` pointing
    /// at a literal, a cycle) stop the walk here and are reported by the
    /// materializer, which owns the malformed-list diagnostics.
    async fn load_list_chain(&self, head: &EntityId) -> Result<()> {
        let nil = EntityId::iri(rdf::NIL);
        let mut visited = HashSet::new();
        let mut current = head.clone();

        while current != nil && visited.insert(current.clone()) {
            if !self.store.is_loaded(&current) {
                self.load(&current).await?;
            }
            for element in self.store.objects_for(&current, rdf::FIRST) {
                if let Ok(id) = element.to_entity_id() {
                    if !self.store.is_loaded(&id) {
                        self.load(&id).await?;
                    }
                }
            }
            let mut rests = self.store.objects_for(&current, rdf::REST);
            if rests.len() != 1 {
                break;
            }
            match rests.remove(0).to_entity_id() {
                Ok(next) => current = next,
                Err(_) => break,
            }
        }
        Ok(())
    }

    /// Read a scalar property
    ///
    /// Absence is `None` for optional scalars and an error for required
    /// ones; when multiple statements exist the first in load order wins.
    pub async fn get_scalar(
        &self,
        entity: &EntityHandle,
        mapping: &PropertyMapping,
    ) -> Result<Option<Value>> {
        let mut values = self.get(entity, mapping).await?;
        if values.is_empty() {
            return match mapping.shape {
                ReturnShape::Scalar { optional: false, .. } => Err(Error::not_found(format!(
                    "no value for required property '{}' on {}",
                    mapping.name,
                    entity.id()
                ))),
                _ => Ok(None),
            };
        }
        Ok(Some(values.remove(0)))
    }

    /// Write a property: convert the value to the statements to persist
    ///
    /// The context does not touch the backing graph; apply the returned
    /// statements locally with [`EntityContext::apply`] or hand them to the
    /// physical store.
    pub fn set(
        &self,
        entity: &EntityHandle,
        mapping: &PropertyMapping,
        value: &Value,
    ) -> Result<Vec<Statement>> {
        mapping.validate()?;
        let nodes = engine::convert_back(value, mapping, &self.registry, &self.policy)?;
        Ok(nodes
            .into_iter()
            .map(|object| Statement::new(entity.id().clone(), mapping.predicate.clone(), object))
            .collect())
    }

    /// Apply statements to the local store
    ///
    /// This is the local half of a write: flushing applied statements to
    /// the physical store is the host's commit step. The context never
    /// writes through the source.
    pub fn apply(&self, statements: Vec<Statement>) {
        self.store.insert_all(statements);
    }

    /// Resolve a reference node to its identity-mapped handle without
    /// loading
    pub fn entity_as_id(&self, node: &graphbind_core::Node) -> Result<EntityHandle> {
        Ok(self.identity.resolve(&node.to_entity_id()?))
    }
}

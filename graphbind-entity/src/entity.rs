//! Entity handles and the identity map
//!
//! An `Entity` is a lightweight typed handle on a graph subject; the
//! statements themselves live in the context's `EntityStore`. Handles are
//! shared as `Arc`s, and the identity map guarantees at most one handle per
//! `EntityId` within a context: two reads of the same IRI return
//! reference-equal handles.

use graphbind_core::EntityId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A handle on a mapped entity
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    /// Create a detached handle
    ///
    /// Prefer [`IdentityMap::resolve`]; detached handles are not identity
    /// mapped and will not compare reference-equal to context handles.
    pub fn new(id: EntityId) -> Self {
        Entity { id }
    }

    /// The entity's identifier
    pub fn id(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Shared entity handle
pub type EntityHandle = Arc<Entity>;

/// Per-context cache ensuring one materialized handle per `EntityId`
///
/// `resolve` is an insert-if-absent operation: under concurrent resolution
/// of the same id, exactly one handle wins and every caller receives it.
#[derive(Debug, Default)]
pub struct IdentityMap {
    inner: RwLock<HashMap<EntityId, EntityHandle>>,
}

impl IdentityMap {
    /// Create an empty identity map
    pub fn new() -> Self {
        IdentityMap::default()
    }

    /// The handle for the given id, creating it if absent
    pub fn resolve(&self, id: &EntityId) -> EntityHandle {
        if let Some(handle) = self.inner.read().get(id) {
            return handle.clone();
        }
        let mut inner = self.inner.write();
        // Re-check under the write lock: another thread may have inserted
        // between lock transitions.
        if let Some(handle) = inner.get(id) {
            return handle.clone();
        }
        debug!(entity = %id, "materializing entity handle");
        let handle = Arc::new(Entity::new(id.clone()));
        inner.insert(id.clone(), handle.clone());
        handle
    }

    /// The handle for the given id, if one has been materialized
    pub fn get(&self, id: &EntityId) -> Option<EntityHandle> {
        self.inner.read().get(id).cloned()
    }

    /// Number of materialized handles
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no handles have been materialized
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_insert_if_absent() {
        let identity = IdentityMap::new();
        let a = identity.resolve(&EntityId::iri("http://ex/1"));
        let b = identity.resolve(&EntityId::iri("http://ex/1"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(identity.len(), 1);

        let c = identity.resolve(&EntityId::iri("http://ex/2"));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(identity.len(), 2);
    }

    #[test]
    fn test_local_and_global_ids_are_distinct_handles() {
        let identity = IdentityMap::new();
        let global = identity.resolve(&EntityId::iri("b0"));
        let local = identity.resolve(&EntityId::local("b0"));
        assert!(!Arc::ptr_eq(&global, &local));
    }

    #[test]
    fn test_concurrent_resolution_single_handle() {
        let identity = Arc::new(IdentityMap::new());
        let id = EntityId::iri("http://ex/1");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let identity = identity.clone();
                let id = id.clone();
                std::thread::spawn(move || identity.resolve(&id))
            })
            .collect();
        let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(resolved.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(identity.len(), 1);
    }
}

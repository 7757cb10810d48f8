//! Statement store and entity source seam
//!
//! `EntityStore` is the in-memory statement cache conversion runs against:
//! synchronous, interior-locked, and safe for concurrent reads. The only
//! async seam is the [`EntitySource`] trait, which fetches the statements
//! for one subject from the physical backing store; once statements are in
//! memory, traversal is synchronous.
//!
//! The store also answers the one structural question the list converter
//! needs: whether an entity is the root of an RDF list chain
//! (`entity_is_collection_root`).

use crate::entity_id::EntityId;
use crate::error::Result;
use crate::node::Node;
use async_trait::async_trait;
use graphbind_vocab::rdf;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A (subject, predicate, object) fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Subject entity id
    pub subject: EntityId,
    /// Predicate IRI
    pub predicate: String,
    /// Object term
    pub object: Node,
}

impl Statement {
    /// Create a statement
    pub fn new(subject: EntityId, predicate: impl Into<String>, object: Node) -> Self {
        Statement {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Statements grouped by subject, in insertion order per subject
    by_subject: HashMap<EntityId, Vec<(String, Node)>>,
    /// Ids that appear as the object of an rdf:rest statement; such ids are
    /// interior list cells, not list roots
    rest_targets: HashSet<EntityId>,
    /// Subjects whose statements have been fetched from the source
    loaded: HashSet<EntityId>,
}

/// In-memory statement store
///
/// Reads are safe for concurrent invocation; writes take the interior lock.
#[derive(Debug, Default)]
pub struct EntityStore {
    inner: RwLock<StoreInner>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        EntityStore::default()
    }

    /// Insert a single statement
    pub fn insert(&self, statement: Statement) {
        let mut inner = self.inner.write();
        if statement.predicate == rdf::REST {
            if let Ok(target) = statement.object.to_entity_id() {
                inner.rest_targets.insert(target);
            }
        }
        inner
            .by_subject
            .entry(statement.subject)
            .or_default()
            .push((statement.predicate, statement.object));
    }

    /// Insert a batch of statements
    pub fn insert_all(&self, statements: impl IntoIterator<Item = Statement>) {
        for statement in statements {
            self.insert(statement);
        }
    }

    /// All object nodes for a subject+predicate pair, in insertion order
    ///
    /// Insertion order is an artifact of loading, not a guarantee of the
    /// SimpleCollection encoding; only RdfList traversal yields a defined
    /// order.
    pub fn objects_for(&self, subject: &EntityId, predicate: &str) -> Vec<Node> {
        let inner = self.inner.read();
        inner
            .by_subject
            .get(subject)
            .map(|statements| {
                statements
                    .iter()
                    .filter(|(p, _)| p == predicate)
                    .map(|(_, o)| o.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All statements for a subject, in insertion order
    pub fn statements_for(&self, subject: &EntityId) -> Vec<Statement> {
        let inner = self.inner.read();
        inner
            .by_subject
            .get(subject)
            .map(|statements| {
                statements
                    .iter()
                    .map(|(p, o)| Statement::new(subject.clone(), p.clone(), o.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the entity is the root of an RDF list chain
    ///
    /// True iff the id carries an `rdf:first` statement and is not itself
    /// pointed at by some other cell's `rdf:rest` (which would make it an
    /// interior cell).
    pub fn entity_is_collection_root(&self, id: &EntityId) -> bool {
        let inner = self.inner.read();
        if inner.rest_targets.contains(id) {
            return false;
        }
        inner
            .by_subject
            .get(id)
            .map(|statements| statements.iter().any(|(p, _)| p == rdf::FIRST))
            .unwrap_or(false)
    }

    /// Whether the subject's statements have been fetched from the source
    pub fn is_loaded(&self, id: &EntityId) -> bool {
        self.inner.read().loaded.contains(id)
    }

    /// Record that the subject's statements have been fetched
    ///
    /// Idempotent; repeated loads of the same subject are no-ops at the
    /// bookkeeping level.
    pub fn mark_loaded(&self, id: &EntityId) {
        self.inner.write().loaded.insert(id.clone());
    }

    /// Number of distinct subjects with statements
    pub fn subject_count(&self) -> usize {
        self.inner.read().by_subject.len()
    }
}

/// Physical source of entity statements
///
/// The single suspension point of the core: implementations may hit network
/// or disk. Loads are idempotent per id; cancellation and timeouts live
/// behind this trait and surface as [`crate::Error::Store`] failures.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Fetch all statements describing the given entity
    ///
    /// Implementations are only obliged to return the asked subject's
    /// statements; the entity context loads related nodes (list cells,
    /// referenced entities) through further calls. Bundling statements
    /// about related anonymous nodes is a permitted optimization that
    /// saves those round trips.
    async fn load_entity(&self, id: &EntityId) -> Result<Vec<Statement>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(iri: &str) -> EntityId {
        EntityId::iri(iri)
    }

    #[test]
    fn test_objects_for_preserves_insertion_order() {
        let store = EntityStore::new();
        store.insert(Statement::new(id("http://ex/s"), "http://ex/p", Node::literal("a")));
        store.insert(Statement::new(id("http://ex/s"), "http://ex/q", Node::literal("x")));
        store.insert(Statement::new(id("http://ex/s"), "http://ex/p", Node::literal("b")));

        let objects = store.objects_for(&id("http://ex/s"), "http://ex/p");
        assert_eq!(objects, vec![Node::literal("a"), Node::literal("b")]);
        assert!(store.objects_for(&id("http://ex/s"), "http://ex/r").is_empty());
        assert!(store.objects_for(&id("http://ex/other"), "http://ex/p").is_empty());
    }

    #[test]
    fn test_collection_root_detection() {
        let store = EntityStore::new();
        let head = EntityId::local("l0");
        let tail = EntityId::local("l1");
        store.insert(Statement::new(head.clone(), rdf::FIRST, Node::literal("x")));
        store.insert(Statement::new(
            head.clone(),
            rdf::REST,
            Node::from_entity_id(&tail),
        ));
        store.insert(Statement::new(tail.clone(), rdf::FIRST, Node::literal("y")));
        store.insert(Statement::new(tail.clone(), rdf::REST, Node::iri(rdf::NIL)));

        assert!(store.entity_is_collection_root(&head));
        // Interior cells are not roots
        assert!(!store.entity_is_collection_root(&tail));
        // An entity without rdf:first is not a root at all
        assert!(!store.entity_is_collection_root(&EntityId::iri("http://ex/plain")));
    }

    #[test]
    fn test_loaded_bookkeeping_idempotent() {
        let store = EntityStore::new();
        let subject = id("http://ex/s");
        assert!(!store.is_loaded(&subject));
        store.mark_loaded(&subject);
        store.mark_loaded(&subject);
        assert!(store.is_loaded(&subject));
    }
}

//! Shared test support: an in-memory entity source

use async_trait::async_trait;
use graphbind_core::{EntityId, EntitySource, Result, Statement};

/// Entity source backed by a fixed statement set
///
/// Loads return the subject's statements plus every statement with a
/// locally-scoped subject, so structural nodes (list cells, compound
/// values) travel with the entities that reference them.
pub struct MemorySource {
    statements: Vec<Statement>,
}

impl MemorySource {
    pub fn new(statements: Vec<Statement>) -> Self {
        MemorySource { statements }
    }

    #[allow(dead_code)]
    pub fn empty() -> Self {
        MemorySource { statements: Vec::new() }
    }
}

#[async_trait]
impl EntitySource for MemorySource {
    async fn load_entity(&self, id: &EntityId) -> Result<Vec<Statement>> {
        Ok(self
            .statements
            .iter()
            .filter(|s| s.subject == *id || s.subject.is_local())
            .cloned()
            .collect())
    }
}

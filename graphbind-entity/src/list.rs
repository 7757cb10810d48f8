//! RDF list materializer
//!
//! Walks an `rdf:first`/`rdf:rest` chain from its head cell into an ordered
//! sequence, terminating on the well-known `rdf:nil` sentinel (matched
//! bit-exactly). Elements are converted lazily, cell by cell, through the
//! conversion engine, so nested entities and values materialize the same
//! way they would anywhere else.
//!
//! ## Well-formedness
//!
//! Each cell must carry exactly one `rdf:first` and exactly one `rdf:rest`
//! until the sentinel. Any deviation — a missing `rest` before nil,
//! multiple `first`/`rest` candidates, a `rest` pointing at a literal, or
//! a cycle in the chain — surfaces as a recoverable
//! [`Error::MalformedList`] that fails the one property being converted,
//! never a hang, a crash, or silent truncation.
//!
//! The write direction (encoding a collection as list cells) is not
//! implemented and fails fast with [`Error::UnsupportedDirection`].

use crate::engine::{self, ConvertScope};
use crate::entity::EntityHandle;
use crate::registry::ComplexConverter;
use crate::value::Value;
use graphbind_core::{EntityId, EntityStore, Error, Node, PropertyMapping, Result};
use graphbind_vocab::rdf;
use std::collections::HashSet;

/// Materializes RDF lists into ordered collections
pub struct RdfListConverter {
    nil: EntityId,
}

impl RdfListConverter {
    /// Create a converter terminating on the standard `rdf:nil` sentinel
    pub fn new() -> Self {
        RdfListConverter {
            nil: EntityId::iri(rdf::NIL),
        }
    }

    /// The single object of the cell's statement, or a malformed-list error
    fn single_object(
        store: &EntityStore,
        cell: &EntityId,
        predicate: &str,
        local_name: &str,
    ) -> Result<Node> {
        let mut objects = store.objects_for(cell, predicate);
        match objects.len() {
            1 => Ok(objects.remove(0)),
            0 => Err(Error::malformed_list(
                cell.to_string(),
                format!("list cell has no rdf:{}", local_name),
            )),
            _ => Err(Error::malformed_list(
                cell.to_string(),
                format!("list cell has multiple rdf:{} statements", local_name),
            )),
        }
    }
}

impl Default for RdfListConverter {
    fn default() -> Self {
        RdfListConverter::new()
    }
}

impl ComplexConverter for RdfListConverter {
    /// Claims entities that carry an `rdf:first` statement
    ///
    /// When the mapping declares the property list-stored, `rdf:first`
    /// alone is enough: even a head that is itself a `rest` target (a
    /// cyclic chain) must be claimed so the walk can report the cycle.
    /// Without a mapping the entity must also be the root of its chain, so
    /// interior cells reached as plain references are not re-materialized
    /// as sub-lists.
    fn can_convert(
        &self,
        entity: &EntityHandle,
        store: &EntityStore,
        mapping: Option<&PropertyMapping>,
    ) -> bool {
        if store.objects_for(entity.id(), rdf::FIRST).is_empty() {
            return false;
        }
        match mapping {
            Some(m) if m.is_rdf_list() => true,
            _ => store.entity_is_collection_root(entity.id()),
        }
    }

    fn convert(&self, entity: &EntityHandle, scope: &ConvertScope<'_>) -> Result<Value> {
        let mut elements = Vec::new();
        let mut visited = HashSet::new();
        let mut current = entity.id().clone();

        while current != self.nil {
            if !visited.insert(current.clone()) {
                return Err(Error::malformed_list(
                    current.to_string(),
                    "cyclic rdf:rest chain",
                ));
            }

            let first = Self::single_object(scope.store, &current, rdf::FIRST, "first")?;
            elements.push(engine::convert_node(&first, None, scope)?);

            let rest = Self::single_object(scope.store, &current, rdf::REST, "rest")?;
            let cell = current;
            current = rest.to_entity_id().map_err(|_| {
                Error::malformed_list(cell.to_string(), "rdf:rest points at a literal")
            })?;
        }

        Ok(Value::Collection(elements))
    }

    /// Claims collection values for properties stored as RDF lists
    fn can_convert_back(&self, value: &Value, mapping: &PropertyMapping) -> bool {
        matches!(value, Value::Collection(_)) && mapping.is_rdf_list()
    }

    fn convert_back(&self, _value: &Value) -> Result<Vec<Node>> {
        Err(Error::unsupported_direction(
            "encoding a collection as an RDF list is not implemented; \
             store the property as a simple collection instead",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::IdentityMap;
    use crate::registry::ConverterRegistry;
    use graphbind_core::{ConversionPolicy, Statement};
    use graphbind_vocab::xsd;

    struct Fixture {
        store: EntityStore,
        identity: IdentityMap,
        registry: ConverterRegistry,
        policy: ConversionPolicy,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                store: EntityStore::new(),
                identity: IdentityMap::new(),
                registry: ConverterRegistry::with_defaults(),
                policy: ConversionPolicy::default(),
            }
        }

        fn scope(&self) -> ConvertScope<'_> {
            ConvertScope {
                store: &self.store,
                identity: &self.identity,
                registry: &self.registry,
                policy: &self.policy,
            }
        }

        fn cell(&self, id: &EntityId, first: Node, rest: &EntityId) {
            self.store.insert(Statement::new(
                id.clone(),
                rdf::FIRST,
                first,
            ));
            self.store.insert(Statement::new(
                id.clone(),
                rdf::REST,
                Node::from_entity_id(rest),
            ));
        }

        fn materialize(&self, head: &EntityId) -> Result<Value> {
            let converter = RdfListConverter::new();
            let mapping = PropertyMapping::collection(
                "steps",
                "http://ex/steps",
                graphbind_core::ElementType::Any,
                graphbind_core::StorageStrategy::RdfList,
            );
            let handle = self.identity.resolve(head);
            assert!(converter.can_convert(&handle, &self.store, Some(&mapping)));
            converter.convert(&handle, &self.scope())
        }
    }

    fn nil() -> EntityId {
        EntityId::iri(rdf::NIL)
    }

    #[test]
    fn test_two_cell_chain_in_order() {
        // A --first--> "x", A --rest--> B; B --first--> "y", B --rest--> nil
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        let b = EntityId::local("B");
        fixture.cell(&a, Node::literal("x"), &b);
        fixture.cell(&b, Node::literal("y"), &nil());

        let value = fixture.materialize(&a).unwrap();
        assert_eq!(
            value,
            Value::Collection(vec![Value::from("x"), Value::from("y")])
        );
    }

    #[test]
    fn test_n_cell_chain_exact_length_and_order() {
        let fixture = Fixture::new();
        let cells: Vec<EntityId> = (0..10).map(|i| EntityId::local(format!("c{}", i))).collect();
        for (i, cell) in cells.iter().enumerate() {
            let next = cells.get(i + 1).cloned().unwrap_or_else(nil);
            fixture.cell(cell, Node::typed_literal(i.to_string(), xsd::INTEGER), &next);
        }

        let value = fixture.materialize(&cells[0]).unwrap();
        let elements = value.as_collection().unwrap();
        assert_eq!(elements.len(), 10);
        for (i, element) in elements.iter().enumerate() {
            assert_eq!(element.as_long(), Some(i as i64));
        }
    }

    #[test]
    fn test_missing_rest_errors_instead_of_hanging() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        let b = EntityId::local("B");
        fixture.cell(&a, Node::literal("x"), &b);
        // B has a first but no rest
        fixture
            .store
            .insert(Statement::new(b.clone(), rdf::FIRST, Node::literal("y")));

        let err = fixture.materialize(&a).unwrap_err();
        assert!(matches!(err, Error::MalformedList { .. }));
        assert!(err.to_string().contains("no rdf:rest"));
    }

    #[test]
    fn test_multiple_first_candidates_fail_loudly() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        fixture.cell(&a, Node::literal("x"), &nil());
        fixture
            .store
            .insert(Statement::new(a.clone(), rdf::FIRST, Node::literal("x2")));

        let err = fixture.materialize(&a).unwrap_err();
        assert!(matches!(err, Error::MalformedList { .. }));
        assert!(err.to_string().contains("multiple rdf:first"));
    }

    #[test]
    fn test_multiple_rest_candidates_fail_loudly() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        fixture.cell(&a, Node::literal("x"), &nil());
        fixture.store.insert(Statement::new(
            a.clone(),
            rdf::REST,
            Node::blank("elsewhere"),
        ));

        let err = fixture.materialize(&a).unwrap_err();
        assert!(matches!(err, Error::MalformedList { .. }));
        assert!(err.to_string().contains("multiple rdf:rest"));
    }

    #[test]
    fn test_cyclic_chain_errors_instead_of_looping() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        let b = EntityId::local("B");
        fixture.cell(&a, Node::literal("x"), &b);
        fixture.cell(&b, Node::literal("y"), &a);

        let err = fixture.materialize(&a).unwrap_err();
        assert!(matches!(err, Error::MalformedList { .. }));
        assert!(err.to_string().contains("cyclic"));
    }

    #[test]
    fn test_rest_to_literal_is_malformed() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        fixture
            .store
            .insert(Statement::new(a.clone(), rdf::FIRST, Node::literal("x")));
        fixture
            .store
            .insert(Statement::new(a.clone(), rdf::REST, Node::literal("oops")));

        let err = fixture.materialize(&a).unwrap_err();
        assert!(matches!(err, Error::MalformedList { .. }));
    }

    #[test]
    fn test_entity_elements_materialize_as_handles() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        fixture.cell(&a, Node::iri("http://ex/member"), &nil());

        let value = fixture.materialize(&a).unwrap();
        let elements = value.as_collection().unwrap();
        let entity = elements[0].as_entity().unwrap();
        assert_eq!(entity.id(), &EntityId::iri("http://ex/member"));
        // And it is the identity-mapped handle
        let again = fixture.identity.resolve(&EntityId::iri("http://ex/member"));
        assert!(std::sync::Arc::ptr_eq(entity, &again));
    }

    #[test]
    fn test_interior_cells_are_not_claimed_without_a_mapping() {
        let fixture = Fixture::new();
        let a = EntityId::local("A");
        let b = EntityId::local("B");
        fixture.cell(&a, Node::literal("x"), &b);
        fixture.cell(&b, Node::literal("y"), &nil());

        let converter = RdfListConverter::new();
        let head = fixture.identity.resolve(&a);
        let interior = fixture.identity.resolve(&b);
        assert!(converter.can_convert(&head, &fixture.store, None));
        assert!(!converter.can_convert(&interior, &fixture.store, None));
    }

    #[test]
    fn test_write_direction_unsupported() {
        let converter = RdfListConverter::new();
        let err = converter
            .convert_back(&Value::Collection(vec![Value::from("x")]))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedDirection(_)));
    }
}

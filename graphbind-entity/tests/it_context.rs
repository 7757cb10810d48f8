//! Entity context integration tests
//!
//! End-to-end load/convert/write-back against an in-memory entity source.

mod support;

use graphbind_core::{
    ElementType, EntityId, MappingSet, Node, PropertyMapping, Statement, StorageStrategy,
};
use graphbind_entity::{EntityContext, Value};
use std::collections::HashSet;
use std::sync::Arc;
use support::MemorySource;

fn person() -> EntityId {
    EntityId::iri("http://ex/person/1")
}

fn name_mapping() -> PropertyMapping {
    PropertyMapping::scalar("name", "http://xmlns.com/foaf/0.1/name", ElementType::String)
}

#[tokio::test]
async fn identity_invariant_across_loads() {
    let source = Arc::new(MemorySource::empty());
    let ctx = EntityContext::new(source, MappingSet::default());

    let a = ctx.load(&person()).await.unwrap();
    let b = ctx.load(&person()).await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn scalar_string_read() {
    let source = Arc::new(MemorySource::new(vec![Statement::new(
        person(),
        "http://xmlns.com/foaf/0.1/name",
        Node::literal("Ada"),
    )]));
    let ctx = EntityContext::new(source, MappingSet::default());

    let entity = ctx.load(&person()).await.unwrap();
    let value = ctx.get_scalar(&entity, &name_mapping()).await.unwrap();
    assert_eq!(value, Some(Value::from("Ada")));
}

#[tokio::test]
async fn iri_object_reads_verbatim_for_string_scalar() {
    let source = Arc::new(MemorySource::new(vec![Statement::new(
        person(),
        "http://xmlns.com/foaf/0.1/name",
        Node::iri("http://ex/1"),
    )]));
    let ctx = EntityContext::new(source, MappingSet::default());

    let entity = ctx.load(&person()).await.unwrap();
    let value = ctx.get_scalar(&entity, &name_mapping()).await.unwrap();
    assert_eq!(value, Some(Value::from("http://ex/1")));
}

#[tokio::test]
async fn required_scalar_absence_is_an_error_optional_is_none() {
    let source = Arc::new(MemorySource::empty());
    let ctx = EntityContext::new(source, MappingSet::default());
    let entity = ctx.load(&person()).await.unwrap();

    assert!(ctx.get_scalar(&entity, &name_mapping()).await.is_err());

    let optional = PropertyMapping::optional_scalar(
        "nick",
        "http://xmlns.com/foaf/0.1/nick",
        ElementType::String,
    );
    assert_eq!(ctx.get_scalar(&entity, &optional).await.unwrap(), None);
}

#[tokio::test]
async fn simple_collection_write_read_set_equality() {
    let source = Arc::new(MemorySource::empty());
    let ctx = EntityContext::new(source, MappingSet::default());
    let entity = ctx.create(&person());

    let mapping = PropertyMapping::collection(
        "tags",
        "http://ex/tags",
        ElementType::String,
        StorageStrategy::SimpleCollection,
    );
    let written = Value::Collection(vec![
        Value::from("alpha"),
        Value::from("beta"),
        Value::from("gamma"),
    ]);
    let statements = ctx.set(&entity, &mapping, &written).unwrap();
    assert_eq!(statements.len(), 3);
    ctx.apply(statements);

    let read = ctx.get(&entity, &mapping).await.unwrap();
    let read_set: HashSet<String> = read
        .iter()
        .map(|v| v.as_str().unwrap().to_owned())
        .collect();
    let expected: HashSet<String> =
        ["alpha", "beta", "gamma"].iter().map(|s| s.to_string()).collect();
    assert_eq!(read_set, expected);
}

#[tokio::test]
async fn nested_entity_read_is_identity_mapped() {
    let friend = EntityId::iri("http://ex/person/2");
    let source = Arc::new(MemorySource::new(vec![
        Statement::new(
            person(),
            "http://xmlns.com/foaf/0.1/knows",
            Node::from_entity_id(&friend),
        ),
        Statement::new(
            friend.clone(),
            "http://xmlns.com/foaf/0.1/name",
            Node::literal("Grace"),
        ),
    ]));
    let ctx = EntityContext::new(source, MappingSet::default());

    let entity = ctx.load(&person()).await.unwrap();
    let mapping = PropertyMapping::nested("knows", "http://xmlns.com/foaf/0.1/knows");
    let values = ctx.get(&entity, &mapping).await.unwrap();
    assert_eq!(values.len(), 1);
    let handle = values[0].as_entity().unwrap();
    assert_eq!(handle.id(), &friend);

    // The nested read pulled the friend's statements in, and the handle is
    // the same one a direct load returns
    let direct = ctx.load(&friend).await.unwrap();
    assert!(Arc::ptr_eq(handle, &direct));
    let name = ctx.get_scalar(&direct, &name_mapping()).await.unwrap();
    assert_eq!(name, Some(Value::from("Grace")));
}

#[tokio::test]
async fn id_only_properties_skip_the_full_load() {
    let friend = EntityId::iri("http://ex/person/2");
    let source = Arc::new(MemorySource::new(vec![Statement::new(
        person(),
        "http://xmlns.com/foaf/0.1/knows",
        Node::from_entity_id(&friend),
    )]));
    let ctx = EntityContext::new(source, MappingSet::default());

    let entity = ctx.load(&person()).await.unwrap();
    let mapping = PropertyMapping::collection(
        "knows",
        "http://xmlns.com/foaf/0.1/knows",
        ElementType::Id,
        StorageStrategy::SimpleCollection,
    );
    let values = ctx.get(&entity, &mapping).await.unwrap();
    assert_eq!(values[0].as_entity().unwrap().id(), &friend);
    // No full load was requested for the referenced entity
    assert!(!ctx.store().is_loaded(&friend));
}

#[tokio::test]
async fn rdf_list_write_fails_fast_through_context() {
    let source = Arc::new(MemorySource::empty());
    let ctx = EntityContext::new(source, MappingSet::default());
    let entity = ctx.create(&person());

    let mapping = PropertyMapping::collection(
        "steps",
        "http://ex/steps",
        ElementType::String,
        StorageStrategy::RdfList,
    );
    let err = ctx
        .set(&entity, &mapping, &Value::Collection(vec![Value::from("x")]))
        .unwrap_err();
    assert!(matches!(err, graphbind_core::Error::UnsupportedDirection(_)));
}

#[tokio::test]
async fn typed_scalar_write_read_round_trip() {
    let source = Arc::new(MemorySource::empty());
    let ctx = EntityContext::new(source, MappingSet::default());
    let entity = ctx.create(&person());

    let mapping = PropertyMapping::scalar("age", "http://ex/age", ElementType::Integer);
    let statements = ctx.set(&entity, &mapping, &Value::Long(37)).unwrap();
    ctx.apply(statements);

    let value = ctx.get_scalar(&entity, &mapping).await.unwrap();
    assert_eq!(value, Some(Value::Long(37)));
}

//! Conversion engine
//!
//! The dispatch core of the mapper: given raw graph nodes and an optional
//! property mapping, decide what typed value each node becomes on read, and
//! the inverse decision on write.
//!
//! ## Read direction
//!
//! Per node, in input order (order across nodes is only meaningful for
//! RdfList-encoded properties):
//!
//! 1. Classify literal-vs-reference. A node is literal-bound if it is a
//!    literal, or if the mapping declares a primitive/string element type
//!    and the shape is neither an RdfList-backed collection nor a
//!    dictionary aggregation.
//! 2. Literal path: `String` targets get the lexical (or IRI) form
//!    verbatim with no datatype validation; `Uri` targets get the IRI or
//!    lexical form as an opaque URI; everything else dispatches to the
//!    best scalar converter, falling back to the lexical string under the
//!    permissive policy.
//! 3. Reference path: resolve the node through the identity map, then give
//!    complex converters the first claim (explicit capability tag, then
//!    registration order); otherwise the entity handle itself is the value.
//!
//! The engine never mutates the store during read conversion, and all
//! reference resolution routes through the identity map so repeated reads
//! of one IRI yield reference-equal handles.
//!
//! ## Write direction
//!
//! Nested entities become single reference nodes; collections are filtered
//! by the declared element type (non-conforming elements skipped or
//! rejected per policy) with complex converters given the first claim at
//! both the collection and the element level; scalars become literals
//! through the converter registered for their runtime variant, or a plain
//! literal of their string form.

use crate::entity::IdentityMap;
use crate::registry::ConverterRegistry;
use crate::value::Value;
use graphbind_core::{
    ConversionPolicy, ElementType, EntityStore, Error, Node, NonConforming, PropertyMapping,
    Result, ReturnShape, UnknownDatatype,
};
use tracing::warn;

/// Everything one conversion call needs, passed by reference
///
/// The identity map and statement store are owned by the entity context;
/// the scope makes them explicit call inputs rather than ambient state.
pub struct ConvertScope<'a> {
    /// In-memory statements conversion runs against
    pub store: &'a EntityStore,
    /// Per-context identity map
    pub identity: &'a IdentityMap,
    /// Converter catalog
    pub registry: &'a ConverterRegistry,
    /// Strictness policies
    pub policy: &'a ConversionPolicy,
}

/// Whether the node should be converted on the literal path
///
/// A literal node always is. A reference node is literal-bound only when
/// the mapping declares a primitive/string element type and the shape is
/// neither an RdfList-backed collection nor a dictionary aggregation.
pub fn treat_as_literal(node: &Node, mapping: Option<&PropertyMapping>) -> bool {
    if node.is_literal() {
        return true;
    }
    let Some(mapping) = mapping else {
        return false;
    };
    mapping.element_type().is_literal_like()
        && !mapping.is_rdf_list()
        && !matches!(mapping.shape, ReturnShape::Dictionary)
}

/// Convert a sequence of nodes to typed values
///
/// Each node converts independently; a failure poisons only that node's
/// slot so the caller can decide property-level error policy.
pub fn convert_nodes(
    nodes: &[Node],
    mapping: Option<&PropertyMapping>,
    scope: &ConvertScope<'_>,
) -> Vec<Result<Value>> {
    nodes
        .iter()
        .map(|node| convert_node(node, mapping, scope))
        .collect()
}

/// Convert a single node to a typed value
pub fn convert_node(
    node: &Node,
    mapping: Option<&PropertyMapping>,
    scope: &ConvertScope<'_>,
) -> Result<Value> {
    if treat_as_literal(node, mapping) {
        convert_literal(node, mapping, scope)
    } else {
        convert_reference(node, mapping, scope)
    }
}

fn convert_literal(
    node: &Node,
    mapping: Option<&PropertyMapping>,
    scope: &ConvertScope<'_>,
) -> Result<Value> {
    let target = mapping.map(|m| m.element_type()).unwrap_or(ElementType::Any);
    match target {
        // Verbatim policy: the lexical form (or an IRI's string form) with
        // no datatype validation
        ElementType::String => Ok(Value::String(node.as_str().to_owned())),
        // URIs are opaque strings, absolute or relative
        ElementType::Uri => Ok(Value::Uri(node.as_str().to_owned())),
        _ => {
            // Language-tagged strings are strings; the tag does not select
            // a scalar converter
            if node.language().is_some() {
                return Ok(Value::String(node.as_str().to_owned()));
            }
            match scope.registry.best_converter_for(node) {
                Some(converter) => converter.node_to_value(node),
                None => match scope.policy.unknown_datatype {
                    UnknownDatatype::LexicalString => {
                        warn!(
                            datatype = node.datatype_iri().unwrap_or("none"),
                            "no converter for datatype, passing literal through as string"
                        );
                        Ok(Value::String(node.as_str().to_owned()))
                    }
                    UnknownDatatype::Fail => Err(Error::conversion(
                        node.as_str(),
                        node.datatype_iri().unwrap_or("unknown datatype"),
                        "no converter registered for datatype",
                    )),
                },
            }
        }
    }
}

fn convert_reference(
    node: &Node,
    mapping: Option<&PropertyMapping>,
    scope: &ConvertScope<'_>,
) -> Result<Value> {
    let id = node.to_entity_id()?;
    let handle = scope.identity.resolve(&id);

    // An explicitly named converter gets the first claim
    if let Some(tag) = mapping.and_then(|m| m.converter.as_deref()) {
        if let Some(converter) = scope.registry.complex_by_tag(tag) {
            if converter.can_convert(&handle, scope.store, mapping) {
                return converter.convert(&handle, scope);
            }
        }
    }

    // Then registration order, first match wins
    for (_, converter) in scope.registry.complex_converters() {
        if converter.can_convert(&handle, scope.store, mapping) {
            return converter.convert(&handle, scope);
        }
    }

    Ok(Value::Entity(handle))
}

/// Convert a value back to the nodes to persist
pub fn convert_back(
    value: &Value,
    mapping: &PropertyMapping,
    registry: &ConverterRegistry,
    policy: &ConversionPolicy,
) -> Result<Vec<Node>> {
    match (&mapping.shape, value) {
        (ReturnShape::NestedEntity, Value::Entity(entity)) => {
            Ok(vec![Node::from_entity_id(entity.id())])
        }
        (_, Value::Collection(items)) => {
            // Whole-collection claims first: list-stored collections are
            // claimed by the registered list converter, which fails fast on
            // the unsupported write direction instead of silently writing
            // repeated triples.
            if let Some(converter) = registry.complex_back_for(value, mapping) {
                return converter.convert_back(value);
            }

            let element_type = mapping.element_type();
            let mut nodes = Vec::new();
            for item in items {
                if !item.conforms_to(element_type) {
                    match policy.non_conforming {
                        NonConforming::Skip => {
                            warn!(
                                property = %mapping.name,
                                element = item.type_name(),
                                "skipping collection element failing the declared type constraint"
                            );
                            continue;
                        }
                        NonConforming::Fail => {
                            return Err(Error::conversion(
                                item.lexical_form(),
                                format!("{:?}", element_type),
                                "collection element fails the declared type constraint",
                            ));
                        }
                    }
                }
                if let Some(converter) = registry.complex_back_for(item, mapping) {
                    nodes.extend(converter.convert_back(item)?);
                } else {
                    nodes.push(convert_one_back(item, registry)?);
                }
            }
            Ok(nodes)
        }
        _ => Ok(vec![convert_one_back(value, registry)?]),
    }
}

/// Convert a single value to a single node
///
/// Entities become reference nodes carrying their id, URI values become
/// IRI nodes, scalars become typed literals through the converter for
/// their runtime variant, and anything else becomes a plain literal of its
/// string form.
fn convert_one_back(value: &Value, registry: &ConverterRegistry) -> Result<Node> {
    match value {
        Value::Entity(entity) => Ok(Node::from_entity_id(entity.id())),
        Value::Uri(uri) => Ok(Node::iri(uri.clone())),
        Value::Collection(_) => Err(Error::conversion(
            value.lexical_form(),
            "node",
            "a nested collection cannot be written as a single node",
        )),
        scalar => match registry.scalar_for_value(scalar) {
            Some(converter) => converter.value_to_node(scalar),
            None => Ok(Node::literal(scalar.lexical_form())),
        },
    }
}

//! Small constructors and accessors shared by the production objects.

use twin_model::{DataType, Lookup, Node, NodeId, Reference, Tree};

pub(crate) fn semantic(uri: &str) -> Reference {
    Reference::external(uri)
}

pub(crate) fn append(tree: &mut Tree, parent: NodeId, node: Node) -> Option<NodeId> {
    tree.append(parent, node)
}

pub(crate) fn append_string(
    tree: &mut Tree,
    parent: NodeId,
    id_short: &str,
    value: impl Into<String>,
    semantic_id: Reference,
) -> Option<NodeId> {
    append(tree, parent, Node::string_property(id_short, value).with_semantic_id(semantic_id))
}

pub(crate) fn append_collection(
    tree: &mut Tree,
    parent: NodeId,
    id_short: &str,
    semantic_id: Reference,
) -> Option<NodeId> {
    append(tree, parent, Node::collection(id_short).with_semantic_id(semantic_id))
}

pub(crate) fn child(tree: &Tree, parent: NodeId, id_short: &str) -> Option<NodeId> {
    tree.find(parent, Lookup::IdShort(id_short))
}

/// Scalar text of the direct child `id_short`.
pub(crate) fn scalar<'t>(tree: &'t Tree, parent: NodeId, id_short: &str) -> Option<&'t str> {
    child(tree, parent, id_short).and_then(|id| tree.get(id)).and_then(Node::scalar)
}

/// Overwrites the text of child `id_short`, creating an `xs:string` property when missing.
pub(crate) fn upsert_string(
    tree: &mut Tree,
    parent: NodeId,
    id_short: &str,
    value: impl Into<String>,
    semantic_id: Reference,
) -> bool {
    let value = value.into();
    match child(tree, parent, id_short) {
        Some(existing) => tree.get_mut(existing).is_some_and(|node| node.set_scalar(value)),
        None => append_string(tree, parent, id_short, value, semantic_id).is_some(),
    }
}

/// Replaces every child of `collection` with plain string properties.
pub(crate) fn refill<K, V>(
    tree: &mut Tree,
    collection: NodeId,
    values: impl IntoIterator<Item = (K, V)>,
) -> usize
where
    K: AsRef<str>,
    V: Into<String>,
{
    tree.clear(collection);
    values
        .into_iter()
        .filter_map(|(key, value)| {
            append(tree, collection, Node::property(key.as_ref(), DataType::String, value))
        })
        .count()
}

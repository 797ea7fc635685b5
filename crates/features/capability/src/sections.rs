use crate::definition::{
    CONSTRAINT_SET_ID, CUSTOM_CONSTRAINT_ID, PROPERTY_RELATIONS_ID, PROPERTY_SET_ID, RELATIONS_ID,
};
use crate::error::{CapabilityErrorExt, CapabilityResult};
use serde_json::Value as Json;
use twin_domain::semantics::{
    CAPABILITY_CONSTRAINT_SET, CAPABILITY_CUSTOM_CONSTRAINT, CAPABILITY_PROPERTY_SET,
    CAPABILITY_RELATIONS,
};
use twin_model::{LangString, ModelType, Node, NodeId, Reference, Scalar, Tree, Value};

const CONTAINER_SUFFIX: &str = "Container";
const UNNAMED_CAPABILITY: &str = "Capability";
const CONDITIONAL_TYPE: &str = "ConditionalType";
const CONSTRAINT_TYPE: &str = "ConstraintType";

/// Key-wise equality with case-insensitive key values.
fn same_reference(left: &Reference, right: &Reference) -> bool {
    !left.keys.is_empty()
        && left.keys.len() == right.keys.len()
        && left
            .keys
            .iter()
            .zip(&right.keys)
            .all(|(l, r)| l.key_type == r.key_type && l.value.eq_ignore_ascii_case(&r.value))
}

fn children_of(tree: &Tree, parent: NodeId, model_type: ModelType) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(parent)
        .iter()
        .copied()
        .filter(move |id| tree.get(*id).is_some_and(|node| node.model_type == model_type))
}

fn first_of(tree: &Tree, parent: NodeId, model_type: ModelType) -> Option<NodeId> {
    children_of(tree, parent, model_type).next()
}

fn named(tree: &Tree, id: NodeId, id_short: &str) -> bool {
    tree.get(id).is_some_and(|node| node.id_short().eq_ignore_ascii_case(id_short))
}

/// A child collection found by semantic id, falling back to its idShort.
fn section(tree: &Tree, parent: NodeId, semantic_uri: &str, fallback: &str) -> Option<NodeId> {
    let wanted = Reference::external(semantic_uri);
    children_of(tree, parent, ModelType::SubmodelElementCollection)
        .find(|id| tree.get(*id).is_some_and(|node| same_reference(&node.semantic_id, &wanted)))
        .or_else(|| {
            children_of(tree, parent, ModelType::SubmodelElementCollection).find(|id| named(tree, *id, fallback))
        })
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let at = text.len().checked_sub(suffix.len())?;
    text.get(at..).filter(|tail| tail.eq_ignore_ascii_case(suffix)).and_then(|_| text.get(..at))
}

fn collections(tree: &Tree, parent: NodeId) -> Vec<NodeId> {
    children_of(tree, parent, ModelType::SubmodelElementCollection).collect()
}

fn texts(tree: &Tree, id: NodeId) -> Vec<LangString> {
    match tree.get(id).map(|node| &node.value) {
        Some(Value::Scalar(Scalar::MultiLanguage(texts))) => texts.clone(),
        _ => Vec::new(),
    }
}

macro_rules! section_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NodeId);

        impl $name {
            #[must_use]
            pub const fn id(self) -> NodeId {
                self.0
            }

            #[must_use]
            pub fn id_short(self, tree: &Tree) -> &str {
                tree.get(self.0).map_or("", Node::id_short)
            }
        }
    };
}

section_handle! {
    /// One capability with its comment, relations and property set.
    CapabilityContainer
}
section_handle! {
    /// Relationships of a capability and its constraint set.
    Relations
}
section_handle!(ConstraintSet);
section_handle! {
    /// One property constraint.
    ConstraintContainer
}
section_handle!(CustomConstraint);
section_handle!(PropertySet);
section_handle! {
    /// One property of a capability: a range, a fixed value or a list of values.
    PropertyContainer
}

impl CapabilityContainer {
    /// Wraps any collection, including one parsed from a foreign document.
    #[must_use]
    pub fn from_node(tree: &Tree, id: NodeId) -> Option<Self> {
        tree.get(id)
            .is_some_and(|node| node.model_type == ModelType::SubmodelElementCollection)
            .then_some(Self(id))
    }

    #[must_use]
    pub fn capability(self, tree: &Tree) -> Option<NodeId> {
        first_of(tree, self.0, ModelType::Capability)
    }

    /// The capability idShort, else the container idShort without its `Container` suffix.
    #[must_use]
    pub fn capability_name(self, tree: &Tree) -> String {
        let capability = self.capability(tree).and_then(|id| tree.get(id)).map(Node::id_short);
        if let Some(name) = capability.filter(|name| !name.trim().is_empty()) {
            return name.to_owned();
        }
        let own = self.id_short(tree);
        if own.trim().is_empty() {
            return UNNAMED_CAPABILITY.to_owned();
        }
        strip_suffix_ignore_case(own, CONTAINER_SUFFIX).unwrap_or(own).to_owned()
    }

    /// Texts of the first multi-language property.
    #[must_use]
    pub fn comment(self, tree: &Tree) -> Vec<LangString> {
        first_of(tree, self.0, ModelType::MultiLanguageProperty).map(|id| texts(tree, id)).unwrap_or_default()
    }

    #[must_use]
    pub fn relations(self, tree: &Tree) -> Option<Relations> {
        section(tree, self.0, CAPABILITY_RELATIONS, RELATIONS_ID).map(Relations)
    }

    #[must_use]
    pub fn property_set(self, tree: &Tree) -> Option<PropertySet> {
        section(tree, self.0, CAPABILITY_PROPERTY_SET, PROPERTY_SET_ID).map(PropertySet)
    }

    /// Relationships named `RealizedBy`.
    #[must_use]
    pub fn realized_by(self, tree: &Tree) -> Vec<NodeId> {
        self.relations(tree).map(|relations| relations.realized_by(tree)).unwrap_or_default()
    }

    #[must_use]
    pub fn constraints(self, tree: &Tree) -> Vec<ConstraintContainer> {
        self.relations(tree)
            .and_then(|relations| relations.constraint_set(tree))
            .map(|set| set.containers(tree))
            .unwrap_or_default()
    }

    /// Case-insensitive lookup of a constraint by idShort.
    #[must_use]
    pub fn constraint(self, tree: &Tree, id_short: &str) -> Option<ConstraintContainer> {
        self.constraints(tree).into_iter().find(|constraint| named(tree, constraint.0, id_short))
    }

    #[must_use]
    pub fn property_containers(self, tree: &Tree) -> Vec<PropertyContainer> {
        self.property_set(tree).map(|set| set.containers(tree)).unwrap_or_default()
    }

    #[must_use]
    pub fn property_container(self, tree: &Tree, id_short: &str) -> Option<PropertyContainer> {
        self.property_set(tree).and_then(|set| set.container(tree, id_short))
    }

    /// The relations collection, added with the given idShort when missing.
    pub fn ensure_relations(self, tree: &mut Tree, id_short: &str) -> Option<Relations> {
        if let Some(relations) = self.relations(tree) {
            return Some(relations);
        }
        let id_short = if id_short.trim().is_empty() { RELATIONS_ID } else { id_short };
        tree.append(
            self.0,
            Node::collection(id_short).with_semantic_id(Reference::external(CAPABILITY_RELATIONS)),
        )
        .map(Relations)
    }

    /// The property set, added with the given idShort when missing.
    pub fn ensure_property_set(self, tree: &mut Tree, id_short: &str) -> Option<PropertySet> {
        if let Some(set) = self.property_set(tree) {
            return Some(set);
        }
        let id_short = if id_short.trim().is_empty() { PROPERTY_SET_ID } else { id_short };
        tree.append(
            self.0,
            Node::collection(id_short).with_semantic_id(Reference::external(CAPABILITY_PROPERTY_SET)),
        )
        .map(PropertySet)
    }

    /// The container alone, in its wire form.
    ///
    /// # Errors
    /// [`CapabilityError::Codec`](crate::CapabilityError::Codec) if the container is gone.
    pub fn to_value(self, tree: &Tree) -> CapabilityResult<Json> {
        twin_codec::write(tree, self.0).context("Writing capability container")
    }
}

impl Relations {
    #[must_use]
    pub fn relationships(self, tree: &Tree) -> Vec<NodeId> {
        children_of(tree, self.0, ModelType::RelationshipElement).collect()
    }

    /// Relationships whose idShort matches, ignoring case. Blank names match nothing.
    #[must_use]
    pub fn relationships_by_id(self, tree: &Tree, id_short: &str) -> Vec<NodeId> {
        if id_short.trim().is_empty() {
            return Vec::new();
        }
        children_of(tree, self.0, ModelType::RelationshipElement)
            .filter(|id| named(tree, *id, id_short))
            .collect()
    }

    #[must_use]
    pub fn realized_by(self, tree: &Tree) -> Vec<NodeId> {
        self.relationships_by_id(tree, "RealizedBy")
    }

    #[must_use]
    pub fn requires(self, tree: &Tree) -> Vec<NodeId> {
        self.relationships_by_id(tree, "Requires")
    }

    #[must_use]
    pub fn provides(self, tree: &Tree) -> Vec<NodeId> {
        self.relationships_by_id(tree, "Provides")
    }

    #[must_use]
    pub fn constraint_set(self, tree: &Tree) -> Option<ConstraintSet> {
        section(tree, self.0, CAPABILITY_CONSTRAINT_SET, CONSTRAINT_SET_ID).map(ConstraintSet)
    }
}

impl ConstraintSet {
    #[must_use]
    pub fn containers(self, tree: &Tree) -> Vec<ConstraintContainer> {
        collections(tree, self.0).into_iter().map(ConstraintContainer).collect()
    }
}

impl ConstraintContainer {
    #[must_use]
    pub fn conditional_type(self, tree: &Tree) -> Option<&str> {
        self.property_value(tree, CONDITIONAL_TYPE)
    }

    #[must_use]
    pub fn constraint_type(self, tree: &Tree) -> Option<&str> {
        self.property_value(tree, CONSTRAINT_TYPE)
    }

    #[must_use]
    pub fn custom_constraint(self, tree: &Tree) -> Option<CustomConstraint> {
        section(tree, self.0, CAPABILITY_CUSTOM_CONSTRAINT, CUSTOM_CONSTRAINT_ID).map(CustomConstraint)
    }

    /// Relationships inside the `ConstraintPropertyRelations` collection.
    #[must_use]
    pub fn property_relations(self, tree: &Tree) -> Vec<NodeId> {
        collections(tree, self.0)
            .into_iter()
            .find(|id| named(tree, *id, PROPERTY_RELATIONS_ID))
            .map(|relations| children_of(tree, relations, ModelType::RelationshipElement).collect())
            .unwrap_or_default()
    }

    fn property_value<'t>(self, tree: &'t Tree, id_short: &str) -> Option<&'t str> {
        children_of(tree, self.0, ModelType::Property)
            .find(|id| named(tree, *id, id_short))
            .and_then(|id| tree.get(id))
            .and_then(Node::scalar)
    }
}

impl CustomConstraint {
    #[must_use]
    pub fn properties(self, tree: &Tree) -> Vec<NodeId> {
        children_of(tree, self.0, ModelType::Property).collect()
    }

    /// Value of the named property. Blank names match nothing.
    #[must_use]
    pub fn property<'t>(self, tree: &'t Tree, id_short: &str) -> Option<&'t str> {
        if id_short.trim().is_empty() {
            return None;
        }
        children_of(tree, self.0, ModelType::Property)
            .find(|id| named(tree, *id, id_short))
            .and_then(|id| tree.get(id))
            .and_then(Node::scalar)
    }
}

impl PropertySet {
    #[must_use]
    pub fn containers(self, tree: &Tree) -> Vec<PropertyContainer> {
        collections(tree, self.0).into_iter().map(PropertyContainer).collect()
    }

    #[must_use]
    pub fn container(self, tree: &Tree, id_short: &str) -> Option<PropertyContainer> {
        if id_short.trim().is_empty() {
            return None;
        }
        collections(tree, self.0).into_iter().find(|id| named(tree, *id, id_short)).map(PropertyContainer)
    }
}

impl PropertyContainer {
    #[must_use]
    pub fn comment(self, tree: &Tree) -> Vec<LangString> {
        first_of(tree, self.0, ModelType::MultiLanguageProperty).map(|id| texts(tree, id)).unwrap_or_default()
    }

    #[must_use]
    pub fn range(self, tree: &Tree) -> Option<&Node> {
        first_of(tree, self.0, ModelType::Range).and_then(|id| tree.get(id))
    }

    #[must_use]
    pub fn property(self, tree: &Tree) -> Option<&Node> {
        first_of(tree, self.0, ModelType::Property).and_then(|id| tree.get(id))
    }

    #[must_use]
    pub fn property_list(self, tree: &Tree) -> Option<NodeId> {
        first_of(tree, self.0, ModelType::SubmodelElementList)
    }

    #[must_use]
    pub fn fixed_value(self, tree: &Tree) -> Option<&str> {
        self.property(tree).and_then(Node::scalar)
    }

    /// Values of the items of the property list, in list order.
    #[must_use]
    pub fn list_values(self, tree: &Tree) -> Vec<&str> {
        self.property_list(tree)
            .map(|list| tree.children(list).iter().filter_map(|id| tree.get(*id).and_then(Node::scalar)).collect())
            .unwrap_or_default()
    }
}

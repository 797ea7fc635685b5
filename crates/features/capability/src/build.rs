//! Turns definitions into detached element subtrees.

use crate::definition::{
    CapabilitySetDefinition, ConstraintContainerDefinition, ConstraintSetDefinition,
    ContainerDefinition, CustomConstraintDefinition, PROPERTY_RELATIONS_ID, PropertyContainerDefinition,
    PropertyContent, PropertyDefinition, PropertySetDefinition, RelationsDefinition,
    RelationshipDefinition, TextDefinition,
};
use twin_domain::semantics::{
    CAPABILITY, CAPABILITY_CONSTRAINT_SET, CAPABILITY_CONTAINER, CAPABILITY_CUSTOM_CONSTRAINT,
    CAPABILITY_PROPERTY_CONSTRAINT_CONTAINER, CAPABILITY_PROPERTY_CONTAINER,
    CAPABILITY_PROPERTY_SET, CAPABILITY_RELATIONS, CAPABILITY_SET,
};
use twin_model::{LangString, ListSpec, Node, NodeId, Qualifier, Reference, Tree, Value};

fn semantic(given: Option<&Reference>, fallback: &str) -> Reference {
    given.cloned().unwrap_or_else(|| Reference::external(fallback))
}

fn section(
    id_short: &str,
    semantic_id: Reference,
    description: &[LangString],
    qualifiers: &[Qualifier],
) -> Node {
    let mut node = Node::collection(id_short).with_semantic_id(semantic_id);
    node.description = description.to_vec();
    node.qualifiers = qualifiers.to_vec();
    node
}

/// Builds the capability set. Container definitions must be valid.
pub(crate) fn capability_set(tree: &mut Tree, definition: &CapabilitySetDefinition) -> NodeId {
    let set = tree.insert(section(
        &definition.id_short,
        semantic(definition.semantic_id.as_ref(), CAPABILITY_SET),
        &definition.description,
        &definition.qualifiers,
    ));
    for container in &definition.containers {
        let id = capability_container(tree, container);
        if !tree.add(set, id) {
            tree.destroy(id);
        }
    }
    set
}

pub(crate) fn capability_container(tree: &mut Tree, definition: &ContainerDefinition) -> NodeId {
    let container = tree.insert(section(
        &definition.id_short,
        semantic(definition.semantic_id.as_ref(), CAPABILITY_CONTAINER),
        &definition.description,
        &definition.qualifiers,
    ));

    let capability = &definition.capability;
    let mut element = Node::capability(capability.id_short.as_str())
        .with_semantic_id(semantic(capability.semantic_id.as_ref(), CAPABILITY));
    element.qualifiers.clone_from(&capability.qualifiers);
    tree.append(container, element);

    if let Some(comment) = &definition.comment {
        tree.append(container, text(comment));
    }
    if let Some(relations_definition) = &definition.relations {
        relations(tree, container, relations_definition);
    }
    if let Some(property_set_definition) = &definition.property_set {
        property_set(tree, container, property_set_definition);
    }
    container
}

fn text(definition: &TextDefinition) -> Node {
    let mut node = Node::multi_language(definition.id_short.as_str(), definition.value.clone());
    node.description.clone_from(&definition.description);
    node.qualifiers.clone_from(&definition.qualifiers);
    if let Some(semantic_id) = &definition.semantic_id {
        node.semantic_id = semantic_id.clone();
    }
    node
}

fn relationship(definition: &RelationshipDefinition) -> Node {
    let mut node = Node::relationship(
        definition.id_short.as_str(),
        definition.first.clone(),
        definition.second.clone(),
    );
    node.category.clone_from(&definition.category);
    node.description.clone_from(&definition.description);
    node.qualifiers.clone_from(&definition.qualifiers);
    if let Some(semantic_id) = &definition.semantic_id {
        node.semantic_id = semantic_id.clone();
    }
    node
}

fn property(definition: &PropertyDefinition) -> Node {
    let node = Node::property(
        definition.id_short.clone().unwrap_or_default(),
        definition.value_type,
        definition.value.as_str(),
    );
    let node = with_optional_semantic(node, definition.semantic_id.as_ref());
    if definition.id_short.is_some() { node } else { node.anonymous() }
}

fn relations(tree: &mut Tree, container: NodeId, definition: &RelationsDefinition) {
    let Some(relations) = tree.append(
        container,
        section(
            &definition.id_short,
            semantic(definition.semantic_id.as_ref(), CAPABILITY_RELATIONS),
            &definition.description,
            &definition.qualifiers,
        ),
    ) else {
        return;
    };

    for relationship_definition in &definition.relationships {
        tree.append(relations, relationship(relationship_definition));
    }
    for extra in &definition.collections {
        let node = Node::collection(extra.id_short.as_str());
        tree.append(relations, with_optional_semantic(node, extra.semantic_id.as_ref()));
    }
    if let Some(constraint_set_definition) = &definition.constraint_set {
        constraint_set(tree, relations, constraint_set_definition);
    }
}

fn constraint_set(tree: &mut Tree, relations: NodeId, definition: &ConstraintSetDefinition) {
    let Some(set) = tree.append(
        relations,
        Node::collection(definition.id_short.as_str())
            .with_semantic_id(semantic(definition.semantic_id.as_ref(), CAPABILITY_CONSTRAINT_SET)),
    ) else {
        return;
    };
    for container in &definition.containers {
        constraint_container(tree, set, container);
    }
}

fn constraint_container(tree: &mut Tree, set: NodeId, definition: &ConstraintContainerDefinition) {
    let own_semantic = semantic(definition.semantic_id.as_ref(), CAPABILITY_PROPERTY_CONSTRAINT_CONTAINER);
    let Some(container) = tree.append(
        set,
        Node::collection(definition.id_short.as_str()).with_semantic_id(own_semantic.clone()),
    ) else {
        return;
    };

    tree.append(container, property(&definition.conditional_type));
    tree.append(container, property(&definition.constraint_type));
    custom_constraint(tree, container, &definition.custom_constraint);

    if definition.property_relations.is_empty() {
        return;
    }
    let id_short = definition.property_relations_id_short.as_deref().unwrap_or(PROPERTY_RELATIONS_ID);
    let relations_semantic = definition.property_relations_semantic_id.clone().unwrap_or(own_semantic);
    if let Some(relations) =
        tree.append(container, Node::collection(id_short).with_semantic_id(relations_semantic))
    {
        for relationship_definition in &definition.property_relations {
            tree.append(relations, relationship(relationship_definition));
        }
    }
}

fn custom_constraint(tree: &mut Tree, container: NodeId, definition: &CustomConstraintDefinition) {
    let Some(custom) = tree.append(
        container,
        Node::collection(definition.id_short.as_str())
            .with_semantic_id(semantic(definition.semantic_id.as_ref(), CAPABILITY_CUSTOM_CONSTRAINT)),
    ) else {
        return;
    };
    for property_definition in &definition.properties {
        tree.append(custom, property(property_definition));
    }
}

fn property_set(tree: &mut Tree, container: NodeId, definition: &PropertySetDefinition) {
    let Some(set) = tree.append(
        container,
        section(
            &definition.id_short,
            semantic(definition.semantic_id.as_ref(), CAPABILITY_PROPERTY_SET),
            &definition.description,
            &definition.qualifiers,
        ),
    ) else {
        return;
    };
    for property_container_definition in &definition.containers {
        property_container(tree, set, property_container_definition);
    }
}

fn property_container(tree: &mut Tree, set: NodeId, definition: &PropertyContainerDefinition) {
    let Some(container) = tree.append(
        set,
        section(
            &definition.id_short,
            semantic(definition.semantic_id.as_ref(), CAPABILITY_PROPERTY_CONTAINER),
            &[],
            &definition.qualifiers,
        ),
    ) else {
        return;
    };
    if let Some(comment) = &definition.comment {
        tree.append(container, text(comment));
    }

    match &definition.content {
        PropertyContent::Range { id_short, min, max, value_type, semantic_id } => {
            let node = Node::range(id_short.as_str(), *value_type, min.as_str(), max.as_str());
            tree.append(container, with_optional_semantic(node, semantic_id.as_ref()));
        },
        PropertyContent::Fixed { id_short, value, value_type, semantic_id } => {
            let node = Node::property(id_short.as_str(), *value_type, value.as_str());
            tree.append(container, with_optional_semantic(node, semantic_id.as_ref()));
        },
        PropertyContent::List { id_short, entries, order_relevant, element_type, value_type, semantic_id } => {
            let mut node = Node::list(id_short.as_str(), *element_type);
            node.value = Value::OrderedList(ListSpec {
                element_type: *element_type,
                value_type: Some(*value_type),
                order_relevant: Some(*order_relevant),
            });
            let Some(list) = tree.append(container, with_optional_semantic(node, semantic_id.as_ref()))
            else {
                return;
            };
            for entry in entries {
                tree.append(list, property(entry));
            }
        },
    }
}

fn with_optional_semantic(node: Node, semantic_id: Option<&Reference>) -> Node {
    match semantic_id {
        Some(semantic_id) => node.with_semantic_id(semantic_id.clone()),
        None => node,
    }
}

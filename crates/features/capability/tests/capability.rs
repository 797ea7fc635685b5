use serde_json::json;
use twin_capability::{
    CapabilityDescription, CapabilityElementDefinition, CapabilityError, CapabilitySetDefinition,
    CapabilityTemplate, ConstraintContainerDefinition, ConstraintSetDefinition, ContainerDefinition,
    CustomConstraintDefinition, DEFAULT_ID_SHORT, PropertyContainerDefinition, PropertyContent,
    PropertyDefinition, PropertySetDefinition, RelationsDefinition, RelationshipDefinition,
    TextDefinition, multiplicity,
};
use twin_domain::semantics::{CAPABILITY, CAPABILITY_DESCRIPTION, CAPABILITY_PROPERTY_CONTAINER};
use twin_model::{
    DataType, Key, KeyType, LangString, ModelType, Multiplicity, Node, Reference, ReferenceType, Value,
};

const IDENTIFIER: &str = "https://smartfactory.de/submodels/0fb7f0f5-2eb4-43d1-b7a0-8415d34a41e9";

fn en(text: &str) -> Vec<LangString> {
    vec![LangString::new("en", text)]
}

fn realized_by() -> RelationshipDefinition {
    RelationshipDefinition::builder()
        .id_short("RealizedBy")
        .first(Reference::model([
            Key::new(KeyType::Submodel, IDENTIFIER),
            Key::new(KeyType::SubmodelElementCollection, "CapabilitySet"),
            Key::new(KeyType::SubmodelElementCollection, "FullyAutomatedAssemblyContainer"),
        ]))
        .second(Reference::model([
            Key::new(KeyType::Submodel, "https://smartfactory.de/submodels/skills"),
            Key::new(KeyType::SubmodelElementCollection, "SkillSet"),
            Key::new(KeyType::SubmodelElementCollection, "Skill_0001"),
        ]))
        .category("PARAMETER")
        .qualifiers(vec![multiplicity(Multiplicity::OneToMany)])
        .build()
}

fn storage_constraint() -> ConstraintContainerDefinition {
    ConstraintContainerDefinition::builder()
        .id_short("StorageConstraint")
        .conditional_type(PropertyDefinition::new("ConditionalType", "Pre"))
        .constraint_type(PropertyDefinition::new("ConstraintType", "CustomConstraint"))
        .custom_constraint(
            CustomConstraintDefinition::builder()
                .properties(vec![
                    PropertyDefinition::new("ConstraintName", "StorageConstraint"),
                    PropertyDefinition::new("MinimumFillLevel", "3").with_value_type(DataType::Integer),
                ])
                .build(),
        )
        .property_relations(vec![RelationshipDefinition::builder()
            .id_short("ConstrainsFillLevel")
            .first(Reference::external("urn:twin:storage"))
            .second(Reference::external("urn:twin:fill-level"))
            .build()])
        .build()
}

fn property_container(id_short: &str, content: PropertyContent) -> PropertyContainerDefinition {
    PropertyContainerDefinition::builder()
        .id_short(id_short)
        .content(content)
        .comment(TextDefinition::builder().id_short("Comment").value(en("blank")).build())
        .qualifiers(vec![multiplicity(Multiplicity::OneToMany)])
        .build()
}

fn assembly() -> ContainerDefinition {
    ContainerDefinition::builder()
        .id_short("FullyAutomatedAssemblyContainer")
        .capability(
            CapabilityElementDefinition::builder()
                .id_short("FullyAutomatedAssembly")
                .qualifiers(vec![multiplicity(Multiplicity::One)])
                .build(),
        )
        .description(en("Container for one specific capability and its relations and attributes."))
        .comment(
            TextDefinition::builder()
                .id_short("Comment")
                .value(en("Capability to fully-automate an assembly of different parts."))
                .description(en("Human readable description of the capability."))
                .build(),
        )
        .relations(
            RelationsDefinition::builder()
                .id_short("CapabilityRelations")
                .relationships(vec![realized_by()])
                .constraint_set(ConstraintSetDefinition::builder().containers(vec![storage_constraint()]).build())
                .build(),
        )
        .property_set(
            PropertySetDefinition::builder()
                .containers(vec![
                    property_container("PropertyContainer01", PropertyContent::range("HeightOfTheProduct", "0", "1000")),
                    property_container(
                        "PropertyContainer05",
                        PropertyContent::fixed("JoiningTechnique", "Positive locking connection - detachable"),
                    ),
                    property_container(
                        "PropertyContainer07",
                        PropertyContent::list("ManufacturableMaterialOfProduct", ["Metal", "NonMetal", "Composites"]),
                    ),
                ])
                .build(),
        )
        .build()
}

fn template() -> CapabilityTemplate {
    CapabilityTemplate::builder()
        .identifier(IDENTIFIER)
        .capability_set(CapabilitySetDefinition::builder().containers(vec![assembly()]).build())
        .build()
}

fn applied() -> CapabilityDescription {
    let mut description = CapabilityDescription::builder().identifier("urn:twin:placeholder").build();
    description.apply(&template()).expect("valid template");
    description
}

#[test]
fn builder_starts_with_an_empty_capability_set() {
    let description = CapabilityDescription::builder().build();
    let tree = description.tree();

    assert_eq!(description.id_short(), DEFAULT_ID_SHORT);
    assert!(description.identifier().starts_with("https://smartfactory.de/submodels/"));
    assert_eq!(
        tree.get(description.root()).map(|root| &root.semantic_id),
        Some(&Reference::external(CAPABILITY_DESCRIPTION))
    );
    assert_eq!(tree.children(description.root()), [description.capability_set()]);
    assert!(description.containers().is_empty());
}

#[test]
fn apply_takes_identity_and_rebuilds_the_set() {
    let description = applied();
    let tree = description.tree();

    assert_eq!(description.identifier(), IDENTIFIER);
    assert_eq!(description.capability_names(), ["FullyAutomatedAssembly"]);
    let container = description.find_container("fullyautomatedassemblycontainer").expect("container");
    assert_eq!(container.capability_name(tree), "FullyAutomatedAssembly");
    assert_eq!(container.comment(tree), en("Capability to fully-automate an assembly of different parts."));

    let capability = container.capability(tree).and_then(|id| tree.get(id)).expect("capability");
    assert_eq!(capability.semantic_id, Reference::external(CAPABILITY));
    assert_eq!(capability.qualifiers[0].qualifier_type, "Multiplicity");
    assert_eq!(capability.qualifiers[0].value.as_deref(), Some("One"));
}

#[test]
fn apply_twice_frees_the_previous_set() {
    let mut description = applied();
    let before = description.tree().len();

    description.apply(&template()).expect("valid template");

    assert_eq!(description.tree().len(), before);
    assert_eq!(description.containers().len(), 1);
}

#[test]
fn invalid_templates_change_nothing() {
    let mut description = applied();
    let before = description.tree().len();

    let mut blank = template();
    blank.identifier = "  ".to_owned();
    assert!(matches!(description.apply(&blank), Err(CapabilityError::Definition { .. })));

    let mut broken = assembly();
    if let Some(set) = broken.relations.as_mut().and_then(|relations| relations.constraint_set.as_mut()) {
        set.containers[0].conditional_type = PropertyDefinition::anonymous("Pre");
    }
    let invalid = CapabilityTemplate::builder()
        .identifier("urn:twin:other")
        .capability_set(CapabilitySetDefinition::builder().containers(vec![broken]).build())
        .build();
    assert!(matches!(description.apply(&invalid), Err(CapabilityError::Definition { .. })));

    assert_eq!(description.identifier(), IDENTIFIER);
    assert_eq!(description.tree().len(), before);
}

#[test]
fn relations_expose_relationships_and_constraints() {
    let description = applied();
    let tree = description.tree();
    let container = description.find_container("FullyAutomatedAssemblyContainer").expect("container");

    let realized = container.realized_by(tree);
    assert_eq!(realized.len(), 1);
    let (first, second) = tree.get(realized[0]).and_then(Node::relationship_value).expect("relationship");
    assert_eq!(first.reference_type, ReferenceType::ModelReference);
    assert_eq!(second.keys.last().map(|key| key.value.as_str()), Some("Skill_0001"));
    let relations = container.relations(tree).expect("relations");
    assert!(relations.requires(tree).is_empty());
    assert!(relations.relationships_by_id(tree, " ").is_empty());

    let constraint = container.constraint(tree, "storageconstraint").expect("constraint");
    assert_eq!(constraint.conditional_type(tree), Some("Pre"));
    assert_eq!(constraint.constraint_type(tree), Some("CustomConstraint"));
    let custom = constraint.custom_constraint(tree).expect("custom constraint");
    assert_eq!(custom.property(tree, "ConstraintName"), Some("StorageConstraint"));
    assert_eq!(custom.property(tree, "MinimumFillLevel"), Some("3"));
    assert_eq!(custom.properties(tree).len(), 2);
    assert_eq!(constraint.property_relations(tree).len(), 1);
}

#[test]
fn property_containers_hold_ranges_values_and_lists() {
    let description = applied();
    let tree = description.tree();
    let container = description.containers()[0];
    assert_eq!(container.property_containers(tree).len(), 3);

    let height = container.property_container(tree, "PropertyContainer01").expect("range container");
    let range = height.range(tree).expect("range");
    assert_eq!(range.id_short(), "HeightOfTheProduct");
    assert_eq!(range.value_type(), Some(DataType::Double));
    assert_eq!(range.range_bounds(), Some((Some("0"), Some("1000"))));
    assert_eq!(height.comment(tree), en("blank"));
    assert_eq!(
        tree.get(height.id()).map(|node| &node.semantic_id),
        Some(&Reference::external(CAPABILITY_PROPERTY_CONTAINER))
    );

    let joining = container.property_container(tree, "PropertyContainer05").expect("fixed container");
    assert_eq!(joining.fixed_value(tree), Some("Positive locking connection - detachable"));
    assert!(joining.range(tree).is_none());

    let materials = container.property_container(tree, "PropertyContainer07").expect("list container");
    assert_eq!(materials.list_values(tree), ["Metal", "NonMetal", "Composites"]);
    let list = materials.property_list(tree).expect("list");
    assert!(tree.children(list).iter().all(|item| tree.get(*item).is_some_and(|node| node.id_short.is_none())));
    assert!(matches!(
        tree.get(list).map(|node| &node.value),
        Some(Value::OrderedList(spec)) if spec.element_type == ModelType::Property
            && spec.value_type == Some(DataType::String)
    ));
}

#[test]
fn add_container_appends_to_the_set() {
    let mut description = applied();
    let drilling = ContainerDefinition::builder()
        .id_short("DrillingContainer")
        .capability(CapabilityElementDefinition::builder().id_short("Drilling").build())
        .build();

    let container = description.add_container(&drilling).expect("valid container");

    assert_eq!(description.capability_names(), ["FullyAutomatedAssembly", "Drilling"]);
    assert_eq!(description.find_container("drillingcontainer"), Some(container));
    assert!(container.relations(description.tree()).is_none());
    assert_eq!(description.find_container(""), None);

    let nameless = ContainerDefinition::builder()
        .id_short("Nameless")
        .capability(CapabilityElementDefinition::builder().id_short("").build())
        .build();
    assert!(description.add_container(&nameless).is_err());
    assert_eq!(description.containers().len(), 2);
}

#[test]
fn capability_name_falls_back_to_the_container_id() {
    let mut description = applied();
    let container = description.containers()[0];
    let capability = container.capability(description.tree()).expect("capability");
    if let Some(node) = description.tree_mut().get_mut(capability) {
        node.id_short = None;
    }

    assert_eq!(container.capability_name(description.tree()), "FullyAutomatedAssembly");
    assert!(description.capability_names().is_empty());
}

#[test]
fn ensure_sections_adds_them_once() {
    let mut description = CapabilityDescription::builder().build();
    let container = description
        .add_container(
            &ContainerDefinition::builder()
                .id_short("Welding")
                .capability(CapabilityElementDefinition::builder().id_short("Weld").build())
                .build(),
        )
        .expect("valid container");

    let tree = description.tree_mut();
    let relations = container.ensure_relations(tree, "").expect("relations");
    let property_set = container.ensure_property_set(tree, "Properties").expect("property set");

    assert_eq!(container.ensure_relations(tree, "Other"), Some(relations));
    assert_eq!(container.ensure_property_set(tree, ""), Some(property_set));
    assert_eq!(relations.id_short(tree), "Relations");
    assert_eq!(property_set.id_short(tree), "Properties");
    assert_eq!(container.capability_name(tree), "Weld");
}

#[test]
fn sections_are_found_by_id_short_in_foreign_documents() {
    let document = json!({
        "modelType": "Submodel",
        "id": "urn:twin:foreign",
        "idShort": "Capabilities",
        "submodelElements": [{
            "modelType": "SubmodelElementCollection",
            "idShort": "CapabilitySet",
            "value": [{
                "modelType": "SubmodelElementCollection",
                "idShort": "AssembleContainer",
                "value": [
                    { "modelType": "Capability" },
                    {
                        "modelType": "SubmodelElementCollection",
                        "idShort": "relations",
                        "value": [{
                            "modelType": "SubmodelElementCollection",
                            "idShort": "ConstraintSet",
                            "value": [{
                                "modelType": "SubmodelElementCollection",
                                "idShort": "StorageConstraint",
                                "value": [
                                    { "modelType": "Property", "idShort": "ConditionalType", "valueType": "xs:string", "value": "Pre" },
                                    { "modelType": "SubmodelElementCollection", "idShort": "CustomConstraint", "value": [
                                        { "modelType": "Property", "idShort": "ConstraintName", "valueType": "xs:string", "value": "StorageConstraint" }
                                    ]}
                                ]
                            }]
                        }]
                    },
                    {
                        "modelType": "SubmodelElementCollection",
                        "idShort": "PropertySet",
                        "value": [{
                            "modelType": "SubmodelElementCollection",
                            "idShort": "ProductIdFixed",
                            "value": [{ "modelType": "Property", "idShort": "ProductId", "valueType": "xs:string", "value": "*" }]
                        }]
                    }
                ]
            }]
        }]
    });

    let description = CapabilityDescription::parse(&document).expect("parsed");
    let tree = description.tree();
    let container = description.find_container("AssembleContainer").expect("container");

    assert_eq!(container.capability_name(tree), "Assemble");
    let constraint = container.constraint(tree, "StorageConstraint").expect("constraint");
    assert_eq!(constraint.conditional_type(tree), Some("Pre"));
    assert_eq!(constraint.constraint_type(tree), None);
    assert_eq!(
        constraint.custom_constraint(tree).and_then(|custom| custom.property(tree, "constraintname")),
        Some("StorageConstraint")
    );
    let fixed = container.property_container(tree, "productidfixed").expect("property container");
    assert_eq!(fixed.fixed_value(tree), Some("*"));
}

#[test]
fn parse_adds_a_missing_capability_set() {
    let document = json!({ "modelType": "Submodel", "id": "urn:twin:bare", "idShort": "Bare" });

    let description = CapabilityDescription::parse(&document).expect("parsed");

    assert_eq!(description.tree().children(description.root()), [description.capability_set()]);
    assert!(description.capability_names().is_empty());
}

#[test]
fn json_form_round_trips_through_parse() {
    let description = applied();

    let text = description.to_json().expect("json");
    let document: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let parsed = CapabilityDescription::parse(&document).expect("parsed");
    let tree = parsed.tree();

    assert_eq!(parsed.identifier(), IDENTIFIER);
    assert_eq!(parsed.id_short(), DEFAULT_ID_SHORT);
    assert_eq!(parsed.capability_names(), ["FullyAutomatedAssembly"]);
    let container = parsed.containers()[0];
    assert_eq!(container.realized_by(tree).len(), 1);
    let materials = container.property_container(tree, "PropertyContainer07").expect("list container");
    assert_eq!(materials.list_values(tree), ["Metal", "NonMetal", "Composites"]);

    let single = container.to_value(tree).expect("container json");
    assert_eq!(single["modelType"], "SubmodelElementCollection");
    assert_eq!(single["idShort"], "FullyAutomatedAssemblyContainer");
}

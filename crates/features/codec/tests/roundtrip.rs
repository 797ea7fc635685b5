use proptest::prelude::*;
use serde_json::{Value, json};
use twin_codec::{Canonicalizer, read, read_str, to_canonical_string, write};
use twin_model::{
    DataType, Key, KeyType, LangString, Lookup, ModelType, ModelingKind, Multiplicity, Node,
    NodeId, Qualifier, Reference, Scalar, Tree, Value as NodeValue,
};

fn canonical_cycle(tree: &Tree, root: NodeId) -> (Value, Value) {
    let canonicalizer = Canonicalizer::default();
    let first = canonicalizer.canonicalize(write(tree, root).unwrap()).unwrap();
    let (parsed, parsed_root) = read(&first).unwrap();
    let second = canonicalizer.canonicalize(write(&parsed, parsed_root).unwrap()).unwrap();
    (first, second)
}

fn sample_submodel() -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let submodel = tree.insert(
        Node::submodel("Nameplate", "https://example.org/submodels/1", ModelingKind::Instance)
            .with_semantic_id(Reference::model([Key::new(KeyType::Submodel, "urn:nameplate")])),
    );

    let manufacturer = tree.insert(
        Node::multi_language(
            "ManufacturerName",
            vec![LangString::new("de", "Muster GmbH"), LangString::new("en", "Sample Ltd")],
        )
        .with_qualifier(Qualifier::multiplicity(Multiplicity::One))
        .with_description(LangString::new("en", "Legal name")),
    );
    let year = tree.insert(Node::property("YearOfConstruction", DataType::Integer, "2024"));
    let endpoint = tree.insert(Node::property("Endpoint", DataType::AnyUri, "http://plc:4840/"));
    let empty = tree.insert(Node::empty_property("Notes", DataType::String));
    let link = tree.insert(Node::reference("Manual", Reference::external("https://example.org/manual")));

    let readings = tree.insert(Node::list("Readings", ModelType::Property));
    for value in ["1.5", "2.5"] {
        let item = tree.insert(Node::property("", DataType::Double, value).anonymous());
        tree.add(readings, item);
    }

    let operation = tree.insert(Node::operation("Calibrate"));
    let inputs = tree.insert(Node::list("inputVariables", ModelType::Property));
    let offset = tree.insert(Node::property("Offset", DataType::Double, "0.1"));
    tree.add(operation, inputs);
    tree.add(inputs, offset);

    for child in [manufacturer, year, endpoint, empty, link, readings, operation] {
        tree.add(submodel, child);
    }
    (tree, submodel)
}

#[test]
fn round_trip_is_stable_for_every_node_kind() {
    let (tree, root) = sample_submodel();

    let (first, second) = canonical_cycle(&tree, root);

    assert_eq!(first, second);
    assert_eq!(first["id"], "https://example.org/submodels/1");
    assert_eq!(first["kind"], "Instance");
    assert_eq!(first["submodelElements"][2]["value"], "http://plc:4840");
}

#[test]
fn submodel_without_identity_stays_without_one() {
    let mut tree = Tree::new();
    let mut node = Node::submodel("S", "", ModelingKind::Instance);
    node.identity = None;
    let root = tree.insert(node);

    let (first, second) = canonical_cycle(&tree, root);

    assert_eq!(first, second);
    assert!(first.get("id").is_none());
    assert!(first.get("kind").is_none());
}

#[test]
fn capability_element_kinds_round_trip() {
    let mut tree = Tree::new();
    let container = tree.insert(Node::collection("DrillContainer"));
    let capability = tree.insert(Node::capability("Drill"));
    let range = tree.insert(Node::range("Diameter", DataType::Double, "2", "12"));
    let realized_by = tree.insert(Node::relationship(
        "RealizedBy",
        Reference::model([Key::new(KeyType::Capability, "Drill")]),
        Reference::model([Key::new(KeyType::Submodel, "urn:skills")]),
    ));
    for child in [capability, range, realized_by] {
        assert!(tree.add(container, child));
    }

    let (first, second) = canonical_cycle(&tree, container);

    assert_eq!(first, second);
    assert_eq!(first["value"][0], json!({ "idShort": "Drill", "modelType": "Capability" }));
    assert_eq!(first["value"][1]["valueType"], "xs:double");
    assert_eq!(first["value"][1]["min"], "2");
    assert_eq!(first["value"][1]["max"], "12");
    assert_eq!(first["value"][2]["first"]["keys"][0]["type"], "Capability");
    assert_eq!(first["value"][2]["second"]["keys"][0]["value"], "urn:skills");
}

#[test]
fn round_trip_preserves_rendered_text() {
    let (tree, root) = sample_submodel();

    let first = to_canonical_string(&tree, root, true).unwrap();
    let (parsed, parsed_root) = read_str(&first).unwrap();

    assert_eq!(to_canonical_string(&parsed, parsed_root, true).unwrap(), first);
}

#[test]
fn reader_rebuilds_structure() {
    let (tree, root) = sample_submodel();
    let (parsed, parsed_root) = read(&write(&tree, root).unwrap()).unwrap();

    // The operation gains its empty output and inoutput variable sets.
    assert_eq!(parsed.len(), tree.len() + 2);
    let readings = parsed.find(parsed_root, Lookup::IdShort("Readings")).unwrap();
    assert_eq!(parsed.children(readings).len(), 2);

    let operation = parsed.find(parsed_root, Lookup::IdShort("Calibrate")).unwrap();
    let inputs = parsed.find_path(operation, &["inputVariables", "Offset"]);
    assert!(inputs.is_some());

    let notes = parsed.find(parsed_root, Lookup::IdShort("Notes")).unwrap();
    assert_eq!(parsed.get(notes).unwrap().scalar(), None);
}

#[test]
fn operations_always_emit_three_variable_sets() {
    let mut tree = Tree::new();
    let operation = tree.insert(Node::operation("Noop"));

    let out = Canonicalizer::default().canonicalize(write(&tree, operation).unwrap()).unwrap();

    assert_eq!(out["inputVariables"], json!([]));
    assert_eq!(out["outputVariables"], json!([]));
    assert_eq!(out["inoutputVariables"], json!([]));
}

#[test]
fn external_document_with_legacy_shapes_reaches_a_fixed_point() {
    let input = json!({
        "idShort": "Skills",
        "submodelElements": [
            {
                "idShort": "Drill",
                "modelType": "Operation",
                "inOutputVariables": [{ "value": { "idShort": "Depth", "valueType": "double", "value": 12.5 } }]
            },
            { "idShort": "Title", "modelType": "MultiLanguageProperty", "value": [{ "en": "Drill" }] },
            { "idShort": "Mystery", "modelType": "Capability" },
            { "idShort": "Group", "value": [{ "idShort": "Flag", "value": true }] }
        ]
    });

    let (tree, root) = read(&input).unwrap();
    let (first, second) = canonical_cycle(&tree, root);

    assert_eq!(first, second);
    assert!(!first.to_string().contains("inOutputVariables"));
    let drill = &first["submodelElements"][0];
    assert_eq!(drill["inoutputVariables"][0]["value"]["value"], "12.5");
    assert_eq!(drill["inoutputVariables"][0]["value"]["valueType"], "xs:double");
    assert_eq!(first["submodelElements"][1]["value"][0]["language"], "en");
    assert_eq!(first["submodelElements"][2]["modelType"], "Property");
    assert_eq!(first["submodelElements"][3]["value"][0]["value"], "true");
}

#[test]
fn unparsable_value_type_degrades_to_string() {
    let (tree, root) = read(&json!({ "idShort": "X", "valueType": "xs:colour", "value": "red" })).unwrap();

    match &tree.get(root).unwrap().value {
        NodeValue::Scalar(Scalar::Typed { value_type, value }) => {
            assert_eq!(*value_type, DataType::String);
            assert_eq!(value.as_deref(), Some("red"));
        },
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn reading_a_non_object_fails() {
    assert!(read(&json!([1, 2, 3])).is_err());
    assert!(read_str("not json").is_err());
}

fn id_short() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,12}"
}

proptest! {
    #[test]
    fn round_trip_law_holds_for_flat_collections(
        entries in proptest::collection::vec((id_short(), "[ -~]{0,24}", any::<bool>()), 0..16)
    ) {
        let mut tree = Tree::new();
        let root = tree.insert(Node::collection("Generated"));
        for (name, value, as_uri) in entries {
            let data_type = if as_uri { DataType::AnyUri } else { DataType::String };
            let child = tree.insert(Node::property(name, data_type, value));
            prop_assert!(tree.add(root, child));
        }

        let (first, second) = canonical_cycle(&tree, root);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn round_trip_law_holds_for_nested_lists(depth in 1usize..6, width in 0usize..4) {
        let mut tree = Tree::new();
        let root = tree.insert(Node::collection("Root"));
        let mut parent = root;
        for level in 0..depth {
            let list = tree.insert(Node::list(format!("L{level}"), ModelType::SubmodelElementCollection));
            prop_assert!(tree.add(parent, list));
            let mut last = None;
            for _ in 0..width {
                let item = tree.insert(Node::collection("").anonymous());
                prop_assert!(tree.add(list, item));
                last = Some(item);
            }
            parent = last.unwrap_or(list);
        }

        let (first, second) = canonical_cycle(&tree, root);
        prop_assert_eq!(first, second);
    }
}

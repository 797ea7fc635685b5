use serde_json::{Value, json};
use twin_codec::{Canonicalizer, CodecError, to_canonical_string, write};
use twin_domain::rules::CanonicalRules;
use twin_model::{DataType, LangString, ModelType, Node, Reference, Tree};

fn canonical(document: Value) -> Value {
    Canonicalizer::default().canonicalize(document).unwrap()
}

#[test]
fn empty_semantic_id_is_omitted() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let tagged = tree.insert(
        Node::string_property("Tagged", "x").with_semantic_id(Reference::external("urn:concept")),
    );
    let plain = tree.insert(Node::string_property("Plain", "y"));
    tree.add(root, tagged);
    tree.add(root, plain);

    let raw = write(&tree, root).unwrap();
    assert_eq!(raw["semanticId"], json!({ "type": "ExternalReference", "keys": [] }));

    let out = canonical(raw);
    assert!(out.get("semanticId").is_none());
    assert!(out["value"][1].get("semanticId").is_none());
    assert_eq!(out["value"][0]["semanticId"]["keys"][0]["value"], "urn:concept");
}

#[test]
fn empty_metadata_arrays_are_omitted() {
    let mut tree = Tree::new();
    let root = tree.insert(
        Node::string_property("Described", "x").with_description(LangString::new("en", "A value")),
    );

    let out = canonical(write(&tree, root).unwrap());
    let object = out.as_object().unwrap();

    for key in ["qualifiers", "displayName", "supplementalSemanticIds", "embeddedDataSpecifications"] {
        assert!(!object.contains_key(key), "{key} should be omitted");
    }
    assert_eq!(out["description"], json!([{ "language": "en", "text": "A value" }]));
}

#[test]
fn ordered_list_items_lose_their_id_short() {
    let mut tree = Tree::new();
    let list = tree.insert(Node::list("Readings", ModelType::Property));
    for value in ["1.0", "2.5"] {
        let item = tree.insert(Node::property("", DataType::Double, value).anonymous());
        tree.add(list, item);
    }

    let out = canonical(write(&tree, list).unwrap());

    assert_eq!(out["idShort"], "Readings");
    for item in out["value"].as_array().unwrap() {
        assert!(item.get("idShort").is_none());
    }
    assert_eq!(out["typeValueListElement"], "Property");
}

#[test]
fn any_uri_bare_authority_loses_one_slash() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Endpoints"));
    let bare = tree.insert(Node::property("Bare", DataType::AnyUri, "http://host:1234/"));
    let with_path = tree.insert(Node::property("Path", DataType::AnyUri, "http://host:1234/api/"));
    let text = tree.insert(Node::string_property("Text", "http://host:1234/"));
    tree.add(root, bare);
    tree.add(root, with_path);
    tree.add(root, text);

    let out = canonical(write(&tree, root).unwrap());

    assert_eq!(out["value"][0]["value"], "http://host:1234");
    assert_eq!(out["value"][1]["value"], "http://host:1234/api/");
    assert_eq!(out["value"][2]["value"], "http://host:1234/", "only anyURI values are trimmed");
}

#[test]
fn any_uri_without_prefix_is_recognized() {
    let out = canonical(json!({ "valueType": "anyURI", "value": "opc.tcp://plc:4840/" }));

    assert_eq!(out["value"], "opc.tcp://plc:4840");
}

#[test]
fn legacy_key_is_renamed_in_place() {
    let document = json!({
        "idShort": "Drill",
        "inputVariables": [],
        "inOutputVariables": [{ "value": { "idShort": "inOutputVariables", "modelType": "Property" } }],
        "outputVariables": [],
        "modelType": "Operation"
    });

    let out = canonical(document);
    let rendered = out.to_string();

    assert!(!rendered.contains("inOutputVariables"));
    assert!(rendered.contains("inoutputVariables"));
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["idShort", "inputVariables", "inoutputVariables", "outputVariables", "modelType"]);
    assert_eq!(out["inoutputVariables"][0]["value"]["idShort"], "inoutputVariables");
}

#[test]
fn surviving_legacy_key_is_fatal() {
    let canonicalizer = Canonicalizer::new(CanonicalRules::ALL - CanonicalRules::LEGACY_KEYS);
    let document = json!({ "value": [{ "inOutputVariables": [] }] });

    let err = canonicalizer.canonicalize(document).unwrap_err();

    match err {
        CodecError::LegacyKeyRemains { message, .. } => {
            assert_eq!(message, "$.value[0].inOutputVariables");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn legacy_substrings_inside_longer_text_are_kept() {
    let out = canonical(json!({ "value": "see inOutputVariables docs" }));

    assert_eq!(out["value"], "see inOutputVariables docs");
}

#[test]
fn ad_hoc_language_strings_are_rewritten() {
    let out = canonical(json!({
        "idShort": "Title",
        "value": [{ "de": "Bohren" }, { "language": "en", "text": "Drilling" }],
        "modelType": "MultiLanguageProperty"
    }));

    assert_eq!(
        out["value"],
        json!([{ "language": "de", "text": "Bohren" }, { "language": "en", "text": "Drilling" }])
    );
}

#[test]
fn language_rewrite_is_limited_to_multi_language_properties() {
    let out = canonical(json!({ "value": [{ "de": "Bohren" }], "modelType": "SubmodelElementCollection" }));

    assert_eq!(out["value"], json!([{ "de": "Bohren" }]));
}

#[test]
fn list_value_type_gets_xs_prefix() {
    let out = canonical(json!({
        "valueTypeListElement": "double",
        "value": [{ "valueTypeListElement": "xs:int" }, { "valueTypeListElement": "" }]
    }));

    assert_eq!(out["valueTypeListElement"], "xs:double");
    assert_eq!(out["value"][0]["valueTypeListElement"], "xs:int");
    assert_eq!(out["value"][1]["valueTypeListElement"], "");
}

#[test]
fn disabled_rules_leave_the_document_alone() {
    let document = json!({ "idShort": "", "semanticId": { "keys": [] }, "qualifiers": [] });

    let out = Canonicalizer::new(CanonicalRules::empty()).canonicalize(document.clone()).unwrap();

    assert_eq!(out, document);
}

#[test]
fn canonicalize_str_reports_invalid_json() {
    let err = Canonicalizer::default().canonicalize_str("{ not json").unwrap_err();

    assert!(matches!(err, CodecError::Json { context: Some(_), .. }));
}

#[test]
fn is_canonical_detects_pending_rewrites() {
    let canonicalizer = Canonicalizer::default();

    assert!(canonicalizer.is_canonical(r#"{"idShort":"A","modelType":"Property"}"#).unwrap());
    assert!(!canonicalizer.is_canonical(r#"{"idShort":"","modelType":"Property"}"#).unwrap());
}

#[test]
fn compact_and_pretty_output_differ_only_in_layout() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::string_property("Name", "Twin"));

    let compact = to_canonical_string(&tree, root, false).unwrap();
    let pretty = to_canonical_string(&tree, root, true).unwrap();

    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    assert_eq!(
        serde_json::from_str::<Value>(&compact).unwrap(),
        serde_json::from_str::<Value>(&pretty).unwrap()
    );
    assert_eq!(compact, r#"{"idShort":"Name","valueType":"xs:string","value":"Twin","modelType":"Property"}"#);
}

#[test]
fn writing_an_unknown_root_fails() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Gone"));
    tree.destroy(root);

    assert!(matches!(write(&tree, root), Err(CodecError::Structure { .. })));
}

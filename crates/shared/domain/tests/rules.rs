use twin_domain::rules::CanonicalRules;

#[test]
fn rule_names_map_to_flags() {
    assert_eq!(CanonicalRules::from("any-uri-slash"), CanonicalRules::ANY_URI_SLASH);
    assert_eq!(CanonicalRules::from(" lang-strings "), CanonicalRules::LANG_STRINGS);
    assert_eq!(CanonicalRules::from("*"), CanonicalRules::ALL);
    assert!(CanonicalRules::from("unknown").is_empty());
}

#[test]
fn rules_deserialize_from_bits_text_and_names() {
    let bits: CanonicalRules = serde_json::from_str("3").expect("bits");
    assert_eq!(bits, CanonicalRules::EMPTY_SEMANTIC_ID | CanonicalRules::EMPTY_ARRAYS);

    let text: CanonicalRules =
        serde_json::from_str("\"empty-id-short,list-value-type\"").expect("text");
    assert_eq!(text, CanonicalRules::EMPTY_ID_SHORT | CanonicalRules::LIST_VALUE_TYPE);

    let names: CanonicalRules = serde_json::from_str("[\"all\"]").expect("names");
    assert_eq!(names, CanonicalRules::ALL);
}

#[test]
fn rules_serialize_as_bits() {
    let raw = serde_json::to_string(&CanonicalRules::ANY_URI_SLASH).expect("serialize");
    assert_eq!(raw, "8");
}

//! Tolerant reader from interchange JSON into a [`Tree`].
//!
//! Unexpected shapes never abort the parse. Elements are reconstructed as a generic
//! collection or property, and unusable scalars are kept as text.

use crate::error::{CodecError, CodecErrorExt, CodecResult};
use crate::fields::{
    CATEGORY, DESCRIPTION, DISPLAY_NAME, FIRST, ID, ID_SHORT, KEYS, KIND, LANGUAGE, MAX, MIN,
    MODEL_TYPE, ORDER_RELEVANT, QUALIFIERS, SECOND, SEMANTIC_ID, SUBMODEL_ELEMENTS,
    SUPPLEMENTAL_SEMANTIC_IDS, TEXT, TYPE, TYPE_VALUE_LIST_ELEMENT, VALUE, VALUE_TYPE,
    VALUE_TYPE_LIST_ELEMENT,
};
use serde_json::{Map, Value as Json};
use tracing::debug;
use twin_domain::constants::{
    INOUTPUT_VARIABLES, INPUT_VARIABLES, LEGACY_INOUTPUT_VARIABLES, OUTPUT_VARIABLES,
};
use twin_model::{
    DataType, Identity, Key, KeyType, LangString, ListSpec, ModelType, ModelingKind, Node, NodeId,
    Qualifier, Reference, ReferenceType, Scalar, Tree, Value,
};

/// Reads a document into a fresh tree and returns it with its root.
///
/// # Errors
/// [`CodecError::Structure`] when the document is not a JSON object.
pub fn read(document: &Json) -> CodecResult<(Tree, NodeId)> {
    let mut tree = Tree::new();
    let root = read_into(&mut tree, document)?;
    Ok((tree, root))
}

/// Parses and reads `input`.
///
/// # Errors
/// Invalid JSON, or the failures of [`read`].
pub fn read_str(input: &str) -> CodecResult<(Tree, NodeId)> {
    let document: Json = serde_json::from_str(input).context("Failed to parse document")?;
    read(&document)
}

/// Reads a document into an existing tree. The returned root is detached.
///
/// # Errors
/// [`CodecError::Structure`] when the document is not a JSON object.
pub fn read_into(tree: &mut Tree, document: &Json) -> CodecResult<NodeId> {
    let Json::Object(map) = document else {
        return Err(CodecError::Structure {
            message: "document root must be a JSON object".into(),
            context: None,
        });
    };
    Ok(Reader { tree }.element(map))
}

struct Reader<'a> {
    tree: &'a mut Tree,
}

impl Reader<'_> {
    fn element(&mut self, map: &Map<String, Json>) -> NodeId {
        let model_type = model_type(map);
        let id_short =
            map.get(ID_SHORT).and_then(Json::as_str).filter(|s| !s.is_empty()).map(str::to_owned);

        let mut node = Node {
            id_short,
            model_type,
            category: map.get(CATEGORY).and_then(Json::as_str).map(str::to_owned),
            display_name: lang_strings(map.get(DISPLAY_NAME)),
            description: lang_strings(map.get(DESCRIPTION)),
            semantic_id: map.get(SEMANTIC_ID).map_or_else(Reference::empty, reference),
            supplemental_semantic_ids: array(map.get(SUPPLEMENTAL_SEMANTIC_IDS))
                .iter()
                .map(reference)
                .collect(),
            qualifiers: array(map.get(QUALIFIERS)).iter().filter_map(qualifier).collect(),
            value: Value::NamedCollection,
            identity: None,
        };

        match model_type {
            ModelType::Submodel => {
                node.identity = map.get(ID).and_then(Json::as_str).map(|id| Identity {
                    id: id.to_owned(),
                    kind: map
                        .get(KIND)
                        .and_then(Json::as_str)
                        .and_then(|kind| kind.parse().ok())
                        .unwrap_or(ModelingKind::Instance),
                });
                let id = self.tree.insert(node);
                self.children(id, map.get(SUBMODEL_ELEMENTS));
                id
            },
            ModelType::SubmodelElementCollection => {
                let id = self.tree.insert(node);
                self.children(id, map.get(VALUE));
                id
            },
            ModelType::SubmodelElementList => {
                let items = array(map.get(VALUE));
                node.value = Value::OrderedList(ListSpec {
                    element_type: map
                        .get(TYPE_VALUE_LIST_ELEMENT)
                        .and_then(Json::as_str)
                        .and_then(|raw| raw.parse().ok())
                        .unwrap_or_else(|| first_model_type(items)),
                    value_type: map
                        .get(VALUE_TYPE_LIST_ELEMENT)
                        .and_then(Json::as_str)
                        .and_then(DataType::parse_lenient),
                    order_relevant: map.get(ORDER_RELEVANT).and_then(Json::as_bool),
                });
                let id = self.tree.insert(node);
                self.children(id, map.get(VALUE));
                id
            },
            ModelType::Operation => self.operation(node, map),
            ModelType::ReferenceElement => {
                node.value = Value::Reference(map.get(VALUE).map_or_else(Reference::empty, reference));
                self.tree.insert(node)
            },
            ModelType::RelationshipElement => {
                let end = |name: &str| map.get(name).map_or_else(Reference::empty, reference);
                node.value = Value::Relationship { first: end(FIRST), second: end(SECOND) };
                self.tree.insert(node)
            },
            ModelType::Range => {
                node.value = Value::Scalar(Scalar::Range {
                    value_type: value_type(map),
                    min: map.get(MIN).and_then(scalar_text),
                    max: map.get(MAX).and_then(scalar_text),
                });
                self.tree.insert(node)
            },
            ModelType::Capability => {
                node.value = Value::Empty;
                self.tree.insert(node)
            },
            ModelType::MultiLanguageProperty => {
                node.value = Value::Scalar(Scalar::MultiLanguage(lang_strings(map.get(VALUE))));
                self.tree.insert(node)
            },
            ModelType::Property => {
                node.value = Value::Scalar(Scalar::Typed {
                    value_type: value_type(map),
                    value: map.get(VALUE).and_then(scalar_text),
                });
                self.tree.insert(node)
            },
        }
    }

    fn children(&mut self, parent: NodeId, items: Option<&Json>) {
        for item in array(items) {
            let Json::Object(child) = item else {
                debug!(?item, "skipping non-object element");
                continue;
            };
            let child = self.element(child);
            self.tree.add(parent, child);
        }
    }

    /// Variable sets become ordered-list children; each item is unwrapped from `{"value": ..}`.
    fn operation(&mut self, node: Node, map: &Map<String, Json>) -> NodeId {
        let id = self.tree.insert(node);
        let sets = [
            (INPUT_VARIABLES, map.get(INPUT_VARIABLES)),
            (OUTPUT_VARIABLES, map.get(OUTPUT_VARIABLES)),
            (INOUTPUT_VARIABLES, map.get(INOUTPUT_VARIABLES).or_else(|| map.get(LEGACY_INOUTPUT_VARIABLES))),
        ];

        for (name, variables) in sets {
            let Some(variables) = variables else {
                continue;
            };
            let items: Vec<&Json> = array(Some(variables))
                .iter()
                .map(|item| match item.get(VALUE) {
                    Some(inner @ Json::Object(_)) => inner,
                    _ => item,
                })
                .collect();
            let element_type = items
                .first()
                .and_then(|item| item.as_object())
                .map_or(ModelType::Property, model_type);

            let list = self.tree.insert(Node::list(name, element_type));
            self.tree.add(id, list);
            for item in items {
                if let Json::Object(child) = item {
                    let child = self.element(child);
                    self.tree.add(list, child);
                }
            }
        }
        id
    }
}

fn array(value: Option<&Json>) -> &[Json] {
    value.and_then(Json::as_array).map_or(&[], Vec::as_slice)
}

/// Explicit `modelType`, otherwise inferred from the shape.
fn model_type(map: &Map<String, Json>) -> ModelType {
    let declared = map.get(MODEL_TYPE).and_then(|model_type| match model_type {
        Json::String(name) => Some(name.as_str()),
        // Older documents wrap the discriminator as {"name": ".."}.
        Json::Object(inner) => inner.get("name").and_then(Json::as_str),
        _ => None,
    });

    if let Some(declared) = declared {
        if let Ok(model_type) = declared.parse() {
            return model_type;
        }
        debug!(model_type = declared, "unknown model type, reconstructing generically");
    }

    if map.contains_key(SUBMODEL_ELEMENTS) {
        ModelType::Submodel
    } else if map.get(VALUE).is_some_and(Json::is_array) {
        ModelType::SubmodelElementCollection
    } else {
        ModelType::Property
    }
}

fn first_model_type(items: &[Json]) -> ModelType {
    items
        .iter()
        .find_map(Json::as_object)
        .map_or(ModelType::SubmodelElementCollection, model_type)
}

fn value_type(map: &Map<String, Json>) -> DataType {
    map.get(VALUE_TYPE)
        .and_then(Json::as_str)
        .and_then(DataType::parse_lenient)
        .unwrap_or_default()
}

/// Strings as-is, other scalars stringified, `null` and containers as absent.
fn scalar_text(value: &Json) -> Option<String> {
    match value {
        Json::String(text) => Some(text.clone()),
        Json::Number(number) => Some(number.to_string()),
        Json::Bool(flag) => Some(flag.to_string()),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

/// Accepts `[{"language", "text"}]`, ad hoc `[{"<lang>": "<text>"}]` and a bare
/// `{"<lang>": "<text>", ..}` map.
fn lang_strings(value: Option<&Json>) -> Vec<LangString> {
    match value {
        Some(Json::Array(entries)) => entries.iter().filter_map(lang_string).collect(),
        Some(Json::Object(map)) => map
            .iter()
            .map(|(language, text)| LangString::new(language.as_str(), scalar_text(text).unwrap_or_default()))
            .collect(),
        _ => Vec::new(),
    }
}

fn lang_string(entry: &Json) -> Option<LangString> {
    let map = entry.as_object()?;
    if let (Some(language), Some(text)) = (map.get(LANGUAGE), map.get(TEXT)) {
        return Some(LangString::new(
            language.as_str().unwrap_or_default(),
            scalar_text(text).unwrap_or_default(),
        ));
    }
    map.iter()
        .next()
        .map(|(language, text)| LangString::new(language.as_str(), scalar_text(text).unwrap_or_default()))
}

fn reference(value: &Json) -> Reference {
    let Some(map) = value.as_object() else {
        return Reference::empty();
    };
    let reference_type = map
        .get(TYPE)
        .and_then(Json::as_str)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(ReferenceType::ExternalReference);
    let keys = array(map.get(KEYS))
        .iter()
        .filter_map(|key| {
            let value = key.get(VALUE).and_then(scalar_text)?;
            let key_type = key
                .get(TYPE)
                .and_then(Json::as_str)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(KeyType::GlobalReference);
            Some(Key::new(key_type, value))
        })
        .collect();
    Reference { reference_type, keys }
}

fn qualifier(value: &Json) -> Option<Qualifier> {
    let map = value.as_object()?;
    let mut qualifier = Qualifier::new(
        map.get(TYPE).and_then(Json::as_str).unwrap_or_default(),
        value_type(map),
        map.get(VALUE).and_then(scalar_text),
    );
    qualifier.kind = map.get(KIND).and_then(Json::as_str).and_then(|raw| raw.parse().ok());
    qualifier.semantic_id = map.get(SEMANTIC_ID).map_or_else(Reference::empty, reference);
    Some(qualifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infers_missing_model_type() {
        let collection = json!({ "value": [] });
        let property = json!({ "value": "x" });

        assert_eq!(model_type(collection.as_object().unwrap()), ModelType::SubmodelElementCollection);
        assert_eq!(model_type(property.as_object().unwrap()), ModelType::Property);
    }

    #[test]
    fn unknown_model_type_falls_back_by_shape() {
        let blob = json!({ "modelType": "Blob", "value": "AAEC" });
        let entity = json!({ "modelType": { "name": "Entity" }, "value": [] });

        assert_eq!(model_type(blob.as_object().unwrap()), ModelType::Property);
        assert_eq!(model_type(entity.as_object().unwrap()), ModelType::SubmodelElementCollection);
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(scalar_text(&json!(42)), Some("42".to_owned()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_owned()));
        assert_eq!(scalar_text(&json!(null)), None);
    }

    #[test]
    fn unknown_key_type_degrades_to_global_reference() {
        let parsed = reference(&json!({ "keys": [{ "type": "Nope", "value": "urn:x" }] }));

        assert_eq!(parsed.reference_type, ReferenceType::ExternalReference);
        assert_eq!(parsed.keys, vec![Key::global("urn:x")]);
    }

    #[test]
    fn accepts_ad_hoc_language_strings() {
        let texts = lang_strings(Some(&json!([{ "de": "Hallo" }, { "language": "en", "text": "Hi" }])));

        assert_eq!(texts, vec![LangString::new("de", "Hallo"), LangString::new("en", "Hi")]);
    }
}

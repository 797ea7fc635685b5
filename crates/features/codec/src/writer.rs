//! Verbatim projection of a [`Tree`] onto the interchange JSON.
//!
//! Nothing is dropped or normalized here: empty arrays, empty semantic ids and
//! missing idShorts are all written out. [`Canonicalizer`](crate::Canonicalizer)
//! turns this projection into the canonical document.

use crate::error::{CodecError, CodecResult};
use crate::fields::{
    CATEGORY, DESCRIPTION, DISPLAY_NAME, EMBEDDED_DATA_SPECIFICATIONS, FIRST, ID, ID_SHORT, KEYS,
    KIND, LANGUAGE, MAX, MIN, MODEL_TYPE, ORDER_RELEVANT, QUALIFIERS, SECOND, SEMANTIC_ID,
    SUBMODEL_ELEMENTS, SUPPLEMENTAL_SEMANTIC_IDS, TEXT, TYPE, TYPE_VALUE_LIST_ELEMENT, VALUE,
    VALUE_TYPE, VALUE_TYPE_LIST_ELEMENT,
};
use serde_json::{Map, Value as Json, json};
use twin_domain::constants::{INOUTPUT_VARIABLES, INPUT_VARIABLES, OUTPUT_VARIABLES};
use twin_model::{
    LangString, Lookup, ModelType, Node, NodeId, Qualifier, Reference, Scalar, Tree, Value,
};

/// Writes `root` and its subtree.
///
/// # Errors
/// [`CodecError::Structure`] when `root` is not a live node of `tree`.
pub fn write(tree: &Tree, root: NodeId) -> CodecResult<Json> {
    if !tree.contains(root) {
        return Err(CodecError::Structure {
            message: format!("unknown root node {root:?}").into(),
            context: None,
        });
    }
    Ok(Writer { tree }.element(root))
}

struct Writer<'a> {
    tree: &'a Tree,
}

impl Writer<'_> {
    fn element(&self, id: NodeId) -> Json {
        let Some(node) = self.tree.get(id) else {
            return Json::Null;
        };

        let mut out = Map::new();
        out.insert(ID_SHORT.into(), node.id_short().into());
        if let Some(category) = &node.category {
            out.insert(CATEGORY.into(), category.as_str().into());
        }
        out.insert(DISPLAY_NAME.into(), lang_strings(&node.display_name));
        out.insert(DESCRIPTION.into(), lang_strings(&node.description));
        out.insert(SEMANTIC_ID.into(), reference(&node.semantic_id));
        out.insert(
            SUPPLEMENTAL_SEMANTIC_IDS.into(),
            node.supplemental_semantic_ids.iter().map(reference).collect(),
        );
        out.insert(QUALIFIERS.into(), node.qualifiers.iter().map(qualifier).collect());
        out.insert(EMBEDDED_DATA_SPECIFICATIONS.into(), Json::Array(Vec::new()));

        self.kind_fields(id, node, &mut out);

        out.insert(MODEL_TYPE.into(), node.model_type.to_string().into());
        Json::Object(out)
    }

    fn kind_fields(&self, id: NodeId, node: &Node, out: &mut Map<String, Json>) {
        match (node.model_type, &node.value) {
            (ModelType::Submodel, _) => {
                if let Some(identity) = &node.identity {
                    out.insert(ID.into(), identity.id.as_str().into());
                    out.insert(KIND.into(), identity.kind.to_string().into());
                }
                out.insert(SUBMODEL_ELEMENTS.into(), self.children(id));
            },
            (ModelType::Operation, _) => {
                for name in [INPUT_VARIABLES, OUTPUT_VARIABLES, INOUTPUT_VARIABLES] {
                    out.insert(name.into(), self.variables(id, name));
                }
            },
            (_, Value::Scalar(Scalar::Typed { value_type, value })) => {
                out.insert(VALUE_TYPE.into(), value_type.as_str().into());
                if let Some(value) = value {
                    out.insert(VALUE.into(), value.as_str().into());
                }
            },
            (_, Value::Scalar(Scalar::MultiLanguage(texts))) => {
                out.insert(VALUE.into(), lang_strings(texts));
            },
            (_, Value::Scalar(Scalar::Range { value_type, min, max })) => {
                out.insert(VALUE_TYPE.into(), value_type.as_str().into());
                if let Some(min) = min {
                    out.insert(MIN.into(), min.as_str().into());
                }
                if let Some(max) = max {
                    out.insert(MAX.into(), max.as_str().into());
                }
            },
            (_, Value::OrderedList(spec)) => {
                if let Some(order_relevant) = spec.order_relevant {
                    out.insert(ORDER_RELEVANT.into(), order_relevant.into());
                }
                out.insert(TYPE_VALUE_LIST_ELEMENT.into(), spec.element_type.to_string().into());
                if let Some(value_type) = spec.value_type {
                    out.insert(VALUE_TYPE_LIST_ELEMENT.into(), value_type.as_str().into());
                }
                out.insert(VALUE.into(), self.children(id));
            },
            (_, Value::NamedCollection) => {
                out.insert(VALUE.into(), self.children(id));
            },
            (_, Value::Reference(target)) => {
                out.insert(VALUE.into(), reference(target));
            },
            (_, Value::Relationship { first, second }) => {
                out.insert(FIRST.into(), reference(first));
                out.insert(SECOND.into(), reference(second));
            },
            (_, Value::Empty) => {},
        }
    }

    fn children(&self, id: NodeId) -> Json {
        self.tree.children(id).iter().map(|child| self.element(*child)).collect()
    }

    /// Operation variables are wrapped as `{"value": <element>}`.
    fn variables(&self, operation: NodeId, name: &str) -> Json {
        let Some(list) = self.tree.find(operation, Lookup::IdShort(name)) else {
            return Json::Array(Vec::new());
        };
        self.tree
            .children(list)
            .iter()
            .map(|child| json!({ VALUE: self.element(*child) }))
            .collect()
    }
}

fn reference(reference: &Reference) -> Json {
    let keys: Vec<Json> = reference
        .keys
        .iter()
        .map(|key| json!({ TYPE: key.key_type.to_string(), VALUE: key.value }))
        .collect();
    json!({ TYPE: reference.reference_type.to_string(), KEYS: keys })
}

fn lang_strings(texts: &[LangString]) -> Json {
    texts.iter().map(|text| json!({ LANGUAGE: text.language, TEXT: text.text })).collect()
}

fn qualifier(qualifier: &Qualifier) -> Json {
    let mut out = Map::new();
    if let Some(kind) = qualifier.kind {
        out.insert(KIND.into(), kind.to_string().into());
    }
    out.insert(SEMANTIC_ID.into(), reference(&qualifier.semantic_id));
    out.insert(TYPE.into(), qualifier.qualifier_type.as_str().into());
    out.insert(VALUE_TYPE.into(), qualifier.value_type.as_str().into());
    if let Some(value) = &qualifier.value {
        out.insert(VALUE.into(), value.as_str().into());
    }
    Json::Object(out)
}

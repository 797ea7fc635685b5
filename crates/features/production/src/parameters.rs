//! Key/value collections of an action (`InputParameters`, `FinalResultData`).
//!
//! Keys match case-insensitively. Every entry is a typed property whose
//! `valueType` follows the Rust value it was set from.

use crate::elements::{append, child, semantic};
use crate::error::{ProductionError, ProductionResult};
use std::str::FromStr;
use twin_domain::semantics::{ACTION_FINAL_RESULT_END_TIME, ACTION_FINAL_RESULT_START_TIME};
use twin_model::{DataType, Node, NodeId, Reference, Tree};

/// A parameter value together with the `valueType` it is stored under.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Integer(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl ParameterValue {
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Long(_) => DataType::Long,
            Self::Double(_) => DataType::Double,
            Self::Boolean(_) => DataType::Boolean,
            Self::String(_) => DataType::String,
        }
    }

    /// Wire text; booleans are `"true"` / `"false"`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Long(value) => value.to_string(),
            Self::Double(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::String(value) => value.clone(),
        }
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterSet {
    Input,
    FinalResult,
}

impl ParameterSet {
    fn semantic_for(self, key: &str) -> Reference {
        match (self, key) {
            (Self::FinalResult, "EndTime") => semantic(ACTION_FINAL_RESULT_END_TIME),
            (Self::FinalResult, "StartTime") => semantic(ACTION_FINAL_RESULT_START_TIME),
            _ => Reference::empty(),
        }
    }
}

/// Handle to a parameter collection inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameters {
    node: NodeId,
    set: ParameterSet,
}

impl Parameters {
    #[must_use]
    pub const fn new(node: NodeId, set: ParameterSet) -> Self {
        Self { node, set }
    }

    #[must_use]
    pub const fn id(self) -> NodeId {
        self.node
    }

    /// Sets `key`, replacing the type and text of an existing entry in place.
    ///
    /// # Errors
    /// [`ProductionError::InvalidKey`] for an empty or whitespace key.
    pub fn set(
        self,
        tree: &mut Tree,
        key: &str,
        value: impl Into<ParameterValue>,
    ) -> ProductionResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ProductionError::InvalidKey {
                message: "key must not be blank".into(),
                context: None,
            });
        }
        let value = value.into();

        if let Some(existing) = child(tree, self.node, key) {
            let replaced = tree
                .get_mut(existing)
                .is_some_and(|node| node.set_typed_scalar(value.data_type(), value.to_text()));
            if replaced {
                return Ok(());
            }
            // Not a property (e.g. parsed as a collection): swap the node out.
            tree.destroy(existing);
        }

        let node = Node::property(key, value.data_type(), value.to_text())
            .with_semantic_id(self.set.semantic_for(key));
        append(tree, self.node, node).map(|_| ()).ok_or_else(|| ProductionError::Internal {
            message: format!("parameter '{key}' could not be added").into(),
            context: None,
        })
    }

    #[must_use]
    pub fn get<'t>(self, tree: &'t Tree, key: &str) -> Option<&'t str> {
        child(tree, self.node, key.trim()).and_then(|id| tree.get(id)).and_then(Node::scalar)
    }

    /// Parses the stored text as `T`. Coercion failures read as absence.
    #[must_use]
    pub fn get_as<T: FromStr>(self, tree: &Tree, key: &str) -> Option<T> {
        self.get(tree, key).and_then(|text| text.trim().parse().ok())
    }

    pub fn remove(self, tree: &mut Tree, key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && tree.remove(self.node, |node| node.id_short().eq_ignore_ascii_case(key))
    }

    /// Every `(key, text)` pair in collection order. Entries without text are skipped.
    #[must_use]
    pub fn entries(self, tree: &Tree) -> Vec<(String, String)> {
        tree.children(self.node)
            .iter()
            .filter_map(|id| tree.get(*id))
            .filter_map(|node| Some((node.id_short().to_owned(), node.scalar()?.to_owned())))
            .collect()
    }

    #[must_use]
    pub fn len(self, tree: &Tree) -> usize {
        tree.children(self.node).len()
    }
}

use crate::qualifier::Qualifier;
use crate::reference::Reference;
use crate::value::{DataType, LangString, ListSpec, Scalar, Value};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Wire discriminator of a node (`modelType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ModelType {
    Submodel,
    Property,
    MultiLanguageProperty,
    SubmodelElementCollection,
    SubmodelElementList,
    ReferenceElement,
    RelationshipElement,
    Range,
    Capability,
    Operation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
pub enum ModelingKind {
    #[default]
    Instance,
    Template,
}

/// Global identity of an identifiable root (a submodel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub kind: ModelingKind,
}

/// One element of a submodel. Structure (parent, children) is kept by the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id_short: Option<String>,
    pub model_type: ModelType,
    pub category: Option<String>,
    pub display_name: Vec<LangString>,
    pub description: Vec<LangString>,
    pub semantic_id: Reference,
    pub supplemental_semantic_ids: Vec<Reference>,
    pub qualifiers: Vec<Qualifier>,
    pub value: Value,
    pub identity: Option<Identity>,
}

impl Node {
    fn with_kind(id_short: Option<String>, model_type: ModelType, value: Value) -> Self {
        Self {
            id_short,
            model_type,
            category: None,
            display_name: Vec::new(),
            description: Vec::new(),
            semantic_id: Reference::empty(),
            supplemental_semantic_ids: Vec::new(),
            qualifiers: Vec::new(),
            value,
            identity: None,
        }
    }

    pub fn property(id_short: impl Into<String>, value_type: DataType, value: impl Into<String>) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::Property,
            Value::Scalar(Scalar::Typed { value_type, value: Some(value.into()) }),
        )
    }

    /// A property without a value (`"value"` is left out on the wire).
    pub fn empty_property(id_short: impl Into<String>, value_type: DataType) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::Property,
            Value::Scalar(Scalar::Typed { value_type, value: None }),
        )
    }

    pub fn string_property(id_short: impl Into<String>, value: impl Into<String>) -> Self {
        Self::property(id_short, DataType::String, value)
    }

    pub fn multi_language(id_short: impl Into<String>, texts: Vec<LangString>) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::MultiLanguageProperty,
            Value::Scalar(Scalar::MultiLanguage(texts)),
        )
    }

    pub fn collection(id_short: impl Into<String>) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::SubmodelElementCollection,
            Value::NamedCollection,
        )
    }

    /// An ordered list whose items are all of `element_type`.
    pub fn list(id_short: impl Into<String>, element_type: ModelType) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::SubmodelElementList,
            Value::OrderedList(ListSpec { element_type, value_type: None, order_relevant: None }),
        )
    }

    pub fn reference(id_short: impl Into<String>, target: Reference) -> Self {
        Self::with_kind(Some(id_short.into()), ModelType::ReferenceElement, Value::Reference(target))
    }

    /// An operation; its variable sets are ordered-list children added by the caller.
    pub fn operation(id_short: impl Into<String>) -> Self {
        Self::with_kind(Some(id_short.into()), ModelType::Operation, Value::NamedCollection)
    }

    pub fn range(
        id_short: impl Into<String>,
        value_type: DataType,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::Range,
            Value::Scalar(Scalar::Range {
                value_type,
                min: Some(min.into()),
                max: Some(max.into()),
            }),
        )
    }

    pub fn relationship(id_short: impl Into<String>, first: Reference, second: Reference) -> Self {
        Self::with_kind(
            Some(id_short.into()),
            ModelType::RelationshipElement,
            Value::Relationship { first, second },
        )
    }

    pub fn capability(id_short: impl Into<String>) -> Self {
        Self::with_kind(Some(id_short.into()), ModelType::Capability, Value::Empty)
    }

    pub fn submodel(id_short: impl Into<String>, id: impl Into<String>, kind: ModelingKind) -> Self {
        let mut node =
            Self::with_kind(Some(id_short.into()), ModelType::Submodel, Value::NamedCollection);
        node.identity = Some(Identity { id: id.into(), kind });
        node
    }

    #[must_use]
    pub fn with_semantic_id(mut self, semantic_id: Reference) -> Self {
        self.semantic_id = semantic_id;
        self
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    #[must_use]
    pub fn with_description(mut self, text: LangString) -> Self {
        self.description.push(text);
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, text: LangString) -> Self {
        self.display_name.push(text);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Drops the idShort, as required for ordered-list items.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.id_short = None;
        self
    }

    /// The idShort, or `""` when unset.
    #[must_use]
    pub fn id_short(&self) -> &str {
        self.id_short.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.value.is_container()
    }

    /// The raw text of a typed scalar.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        match &self.value {
            Value::Scalar(Scalar::Typed { value, .. }) => value.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value_type(&self) -> Option<DataType> {
        match &self.value {
            Value::Scalar(Scalar::Typed { value_type, .. } | Scalar::Range { value_type, .. }) => {
                Some(*value_type)
            },
            _ => None,
        }
    }

    /// `(min, max)` of a range.
    #[must_use]
    pub fn range_bounds(&self) -> Option<(Option<&str>, Option<&str>)> {
        match &self.value {
            Value::Scalar(Scalar::Range { min, max, .. }) => Some((min.as_deref(), max.as_deref())),
            _ => None,
        }
    }

    #[must_use]
    pub const fn relationship_value(&self) -> Option<(&Reference, &Reference)> {
        match &self.value {
            Value::Relationship { first, second } => Some((first, second)),
            _ => None,
        }
    }

    /// Replaces the text of a typed scalar, keeping its type. Returns `false` for other kinds.
    pub fn set_scalar(&mut self, text: impl Into<String>) -> bool {
        match &mut self.value {
            Value::Scalar(Scalar::Typed { value, .. }) => {
                *value = Some(text.into());
                true
            },
            _ => false,
        }
    }

    /// Replaces both the type and the text of a typed scalar.
    pub fn set_typed_scalar(&mut self, value_type: DataType, text: impl Into<String>) -> bool {
        match &mut self.value {
            Value::Scalar(scalar @ Scalar::Typed { .. }) => {
                *scalar = Scalar::Typed { value_type, value: Some(text.into()) };
                true
            },
            _ => false,
        }
    }

    #[must_use]
    pub const fn reference_value(&self) -> Option<&Reference> {
        match &self.value {
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

use crate::error::{CapabilityError, CapabilityResult};
use twin_model::{DataType, LangString, ModelType, Multiplicity, Qualifier, Reference};
use typed_builder::TypedBuilder;

pub const DEFAULT_ID_SHORT: &str = "OfferedCapabilitiyDescription";
pub(crate) const CAPABILITY_SET_ID: &str = "CapabilitySet";
pub(crate) const RELATIONS_ID: &str = "Relations";
pub(crate) const PROPERTY_SET_ID: &str = "PropertySet";
pub(crate) const CONSTRAINT_SET_ID: &str = "ConstraintSet";
pub(crate) const CUSTOM_CONSTRAINT_ID: &str = "CustomConstraint";
pub(crate) const PROPERTY_RELATIONS_ID: &str = "ConstraintPropertyRelations";

const MULTIPLICITY: &str = "Multiplicity";

/// A `Multiplicity` qualifier as written by capability templates.
#[must_use]
pub fn multiplicity(value: Multiplicity) -> Qualifier {
    Qualifier::new(MULTIPLICITY, DataType::String, Some(value.to_string()))
}

/// Replaces identity and content of a capability description.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CapabilityTemplate {
    #[builder(setter(into))]
    pub identifier: String,
    pub capability_set: CapabilitySetDefinition,
    /// Submodel idShort; the current one is kept when blank.
    #[builder(default = Some(DEFAULT_ID_SHORT.to_owned()), setter(strip_option, into))]
    pub id_short: Option<String>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct CapabilitySetDefinition {
    #[builder(default = CAPABILITY_SET_ID.to_owned(), setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub containers: Vec<ContainerDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// One offered capability with its comment, relations and properties.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ContainerDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    pub capability: CapabilityElementDefinition,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
    #[builder(default, setter(strip_option))]
    pub comment: Option<TextDefinition>,
    #[builder(default, setter(strip_option))]
    pub relations: Option<RelationsDefinition>,
    #[builder(default, setter(strip_option))]
    pub property_set: Option<PropertySetDefinition>,
}

impl ContainerDefinition {
    /// Checks what element construction cannot recover from.
    ///
    /// # Errors
    /// [`CapabilityError::Definition`] for a blank container or capability idShort, or a
    /// constraint whose `ConditionalType`/`ConstraintType` property has no idShort.
    pub fn validate(&self) -> CapabilityResult<()> {
        if self.id_short.trim().is_empty() {
            return Err(definition_error("capability container needs an idShort"));
        }
        if self.capability.id_short.trim().is_empty() {
            return Err(definition_error(format!("capability in {} needs an idShort", self.id_short)));
        }
        let constraints = self
            .relations
            .iter()
            .filter_map(|relations| relations.constraint_set.as_ref())
            .flat_map(|set| &set.containers);
        for constraint in constraints {
            for property in [&constraint.conditional_type, &constraint.constraint_type] {
                if property.id_short.as_deref().is_none_or(|id| id.trim().is_empty()) {
                    return Err(definition_error(format!(
                        "constraint {} has a property without idShort",
                        constraint.id_short
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct CapabilityElementDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// A multi-language property such as a comment.
#[derive(Debug, Clone, TypedBuilder)]
pub struct TextDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub value: Vec<LangString>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RelationsDefinition {
    #[builder(default = RELATIONS_ID.to_owned(), setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub relationships: Vec<RelationshipDefinition>,
    #[builder(default, setter(strip_option))]
    pub constraint_set: Option<ConstraintSetDefinition>,
    /// Empty collections placed between the relationships and the constraint set.
    #[builder(default)]
    pub collections: Vec<SectionDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDefinition {
    pub id_short: String,
    pub semantic_id: Option<Reference>,
}

impl SectionDefinition {
    pub fn new(id_short: impl Into<String>) -> Self {
        Self { id_short: id_short.into(), semantic_id: None }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RelationshipDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    pub first: Reference,
    pub second: Reference,
    #[builder(default, setter(strip_option, into))]
    pub category: Option<String>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct ConstraintSetDefinition {
    #[builder(default = CONSTRAINT_SET_ID.to_owned(), setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub containers: Vec<ConstraintContainerDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
}

/// A property constraint: when it applies, what kind it is, and its custom values.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ConstraintContainerDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    pub conditional_type: PropertyDefinition,
    pub constraint_type: PropertyDefinition,
    pub custom_constraint: CustomConstraintDefinition,
    #[builder(default)]
    pub property_relations: Vec<RelationshipDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default, setter(strip_option, into))]
    pub property_relations_id_short: Option<String>,
    /// Falls back to the container's own semantic id.
    #[builder(default, setter(strip_option))]
    pub property_relations_semantic_id: Option<Reference>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct CustomConstraintDefinition {
    #[builder(default = CUSTOM_CONSTRAINT_ID.to_owned(), setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub properties: Vec<PropertyDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct PropertySetDefinition {
    #[builder(default = PROPERTY_SET_ID.to_owned(), setter(into))]
    pub id_short: String,
    #[builder(default)]
    pub containers: Vec<PropertyContainerDefinition>,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default)]
    pub description: Vec<LangString>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// One property of the capability, with an optional comment.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PropertyContainerDefinition {
    #[builder(setter(into))]
    pub id_short: String,
    pub content: PropertyContent,
    #[builder(default, setter(strip_option))]
    pub semantic_id: Option<Reference>,
    #[builder(default, setter(strip_option))]
    pub comment: Option<TextDefinition>,
    #[builder(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// The element a property container holds next to its comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyContent {
    /// A closed interval, `xs:double` unless stated otherwise.
    Range { id_short: String, min: String, max: String, value_type: DataType, semantic_id: Option<Reference> },
    /// One fixed value.
    Fixed { id_short: String, value: String, value_type: DataType, semantic_id: Option<Reference> },
    /// An enumeration of admissible values.
    List {
        id_short: String,
        entries: Vec<PropertyDefinition>,
        order_relevant: bool,
        element_type: ModelType,
        value_type: DataType,
        semantic_id: Option<Reference>,
    },
}

impl PropertyContent {
    pub fn range(id_short: impl Into<String>, min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::Range {
            id_short: id_short.into(),
            min: min.into(),
            max: max.into(),
            value_type: DataType::Double,
            semantic_id: None,
        }
    }

    pub fn fixed(id_short: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Fixed { id_short: id_short.into(), value: value.into(), value_type: DataType::String, semantic_id: None }
    }

    /// A list of anonymous string properties.
    pub fn list<I, S>(id_short: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            id_short: id_short.into(),
            entries: values.into_iter().map(PropertyDefinition::anonymous).collect(),
            order_relevant: true,
            element_type: ModelType::Property,
            value_type: DataType::String,
            semantic_id: None,
        }
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: DataType) -> Self {
        match &mut self {
            Self::Range { value_type: current, .. }
            | Self::Fixed { value_type: current, .. }
            | Self::List { value_type: current, .. } => *current = value_type,
        }
        self
    }

    #[must_use]
    pub fn with_semantic_id(mut self, semantic_id: Reference) -> Self {
        match &mut self {
            Self::Range { semantic_id: current, .. }
            | Self::Fixed { semantic_id: current, .. }
            | Self::List { semantic_id: current, .. } => *current = Some(semantic_id),
        }
        self
    }
}

/// A plain property. List entries and custom constraint values may be anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub id_short: Option<String>,
    pub value: String,
    pub value_type: DataType,
    pub semantic_id: Option<Reference>,
}

impl PropertyDefinition {
    pub fn new(id_short: impl Into<String>, value: impl Into<String>) -> Self {
        Self { id_short: Some(id_short.into()), value: value.into(), value_type: DataType::String, semantic_id: None }
    }

    pub fn anonymous(value: impl Into<String>) -> Self {
        Self { id_short: None, value: value.into(), value_type: DataType::String, semantic_id: None }
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: DataType) -> Self {
        self.value_type = value_type;
        self
    }
}

fn definition_error(message: impl Into<std::borrow::Cow<'static, str>>) -> CapabilityError {
    CapabilityError::Definition { message: message.into(), context: None }
}

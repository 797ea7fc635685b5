use crate::reference::Reference;
use crate::value::DataType;
use strum_macros::{Display, EnumString, IntoStaticStr};

pub const CARDINALITY: &str = "Cardinality";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum QualifierKind {
    ValueQualifier,
    ConceptQualifier,
    TemplateQualifier,
}

/// How many instances of an element a template expects. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Multiplicity {
    One,
    ZeroToOne,
    ZeroToMany,
    OneToMany,
}

/// A constraint annotation on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    pub kind: Option<QualifierKind>,
    pub qualifier_type: String,
    pub value_type: DataType,
    pub value: Option<String>,
    pub semantic_id: Reference,
}

impl Qualifier {
    pub fn new(
        qualifier_type: impl Into<String>,
        value_type: DataType,
        value: Option<String>,
    ) -> Self {
        Self {
            kind: None,
            qualifier_type: qualifier_type.into(),
            value_type,
            value,
            semantic_id: Reference::empty(),
        }
    }

    #[must_use]
    pub fn multiplicity(multiplicity: Multiplicity) -> Self {
        Self::new(CARDINALITY, DataType::String, Some(multiplicity.to_string()))
    }

    /// The multiplicity carried by a `Cardinality` qualifier, if this is one.
    #[must_use]
    pub fn as_multiplicity(&self) -> Option<Multiplicity> {
        if self.qualifier_type != CARDINALITY {
            return None;
        }
        self.value.as_deref().and_then(|value| value.parse().ok())
    }
}

use std::hash::{Hash, Hasher};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Type tag of a single reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
pub enum KeyType {
    #[default]
    GlobalReference,
    FragmentReference,
    AssetAdministrationShell,
    ConceptDescription,
    Identifiable,
    Submodel,
    Referable,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
    Property,
    MultiLanguageProperty,
    Range,
    ReferenceElement,
    RelationshipElement,
    AnnotatedRelationshipElement,
    File,
    Blob,
    Capability,
    Entity,
    Operation,
    DataElement,
    EventElement,
    BasicEventElement,
}

/// One link of a reference key chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub key_type: KeyType,
    pub value: String,
}

impl Key {
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self { key_type, value: value.into() }
    }

    pub fn global(value: impl Into<String>) -> Self {
        Self::new(KeyType::GlobalReference, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
pub enum ReferenceType {
    #[default]
    ExternalReference,
    ModelReference,
}

/// An ordered chain of typed keys.
///
/// Equality and hashing look at the key chain only: two references with the
/// same keys are equal whatever their [`ReferenceType`].
#[derive(Debug, Clone, Default)]
pub struct Reference {
    pub reference_type: ReferenceType,
    pub keys: Vec<Key>,
}

impl Reference {
    /// The empty external reference used for "no semantic id".
    #[must_use]
    pub const fn empty() -> Self {
        Self { reference_type: ReferenceType::ExternalReference, keys: Vec::new() }
    }

    /// External reference with a single `GlobalReference` key.
    pub fn external(uri: impl Into<String>) -> Self {
        Self { reference_type: ReferenceType::ExternalReference, keys: vec![Key::global(uri)] }
    }

    pub fn model(keys: impl IntoIterator<Item = Key>) -> Self {
        Self { reference_type: ReferenceType::ModelReference, keys: keys.into_iter().collect() }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value of the first key, typically the concept URI.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.keys.first().map(|key| key.value.as_str())
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.keys.hash(state);
    }
}

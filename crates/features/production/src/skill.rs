use twin_model::{Key, KeyType, Reference};

/// Placeholder key value of a skill reference without a usable chain.
pub const EMPTY_SKILL: &str = "EMPTY";

/// Key types a skill reference chain may hold.
const SKILL_KEY_TYPES: [KeyType; 3] =
    [KeyType::Submodel, KeyType::SubmodelElementCollection, KeyType::Property];

/// The model reference from an action to the skill that executes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillReference {
    keys: Vec<Key>,
}

impl SkillReference {
    /// Keeps entries with a supported key type and a non-blank value, in order.
    pub fn new<V>(chain: impl IntoIterator<Item = (KeyType, V)>) -> Self
    where
        V: Into<String>,
    {
        let keys = chain
            .into_iter()
            .map(|(key_type, value)| Key::new(key_type, value.into().trim()))
            .filter(|key| SKILL_KEY_TYPES.contains(&key.key_type) && !key.value.is_empty())
            .collect();
        Self { keys }
    }

    /// Recovers the chain from a stored reference; the placeholder reads as empty.
    #[must_use]
    pub fn from_reference(reference: &Reference) -> Self {
        Self::new(reference.keys.iter().map(|key| (key.key_type, key.value.as_str())))
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The wire reference. An empty chain becomes a single `GlobalReference` key `EMPTY`.
    #[must_use]
    pub fn to_reference(&self) -> Reference {
        if self.keys.is_empty() {
            Reference::model([Key::global(EMPTY_SKILL)])
        } else {
            Reference::model(self.keys.iter().cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_model::ReferenceType;

    #[test]
    fn blank_and_foreign_keys_are_dropped() {
        let skill = SkillReference::new([
            (KeyType::Submodel, "https://example.com/sm"),
            (KeyType::SubmodelElementCollection, "  "),
            (KeyType::GlobalReference, "ignored"),
            (KeyType::Property, "Drill"),
        ]);

        let values: Vec<_> = skill.keys().iter().map(|key| key.value.as_str()).collect();
        assert_eq!(values, ["https://example.com/sm", "Drill"]);
    }

    #[test]
    fn empty_chain_uses_placeholder() {
        let reference = SkillReference::default().to_reference();

        assert_eq!(reference.reference_type, ReferenceType::ModelReference);
        assert_eq!(reference.keys, vec![Key::global(EMPTY_SKILL)]);
        assert!(SkillReference::from_reference(&reference).is_empty());
    }
}

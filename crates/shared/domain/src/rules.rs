use crate::constants::{
    RULE_ANY_URI_SLASH, RULE_EMPTY_ARRAYS, RULE_EMPTY_ID_SHORT, RULE_EMPTY_SEMANTIC_ID,
    RULE_LANG_STRINGS, RULE_LEGACY_KEYS, RULE_LIST_VALUE_TYPE,
};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

bitflags! {
    /// Rewrites applied by the canonical serializer.
    ///
    /// The legacy-key invariant check runs regardless of these flags; disabling
    /// [`CanonicalRules::LEGACY_KEYS`] turns any legacy input into a hard failure.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CanonicalRules: u32 {
        const EMPTY_SEMANTIC_ID = 1 << 0;
        const EMPTY_ARRAYS = 1 << 1;
        const EMPTY_ID_SHORT = 1 << 2;
        const ANY_URI_SLASH = 1 << 3;
        const LANG_STRINGS = 1 << 4;
        const LEGACY_KEYS = 1 << 5;
        const LIST_VALUE_TYPE = 1 << 6;

        const ALL = Self::EMPTY_SEMANTIC_ID.bits()
            | Self::EMPTY_ARRAYS.bits()
            | Self::EMPTY_ID_SHORT.bits()
            | Self::ANY_URI_SLASH.bits()
            | Self::LANG_STRINGS.bits()
            | Self::LEGACY_KEYS.bits()
            | Self::LIST_VALUE_TYPE.bits();
    }
}

impl Default for CanonicalRules {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&str> for CanonicalRules {
    fn from(s: &str) -> Self {
        match s.trim() {
            RULE_EMPTY_SEMANTIC_ID => Self::EMPTY_SEMANTIC_ID,
            RULE_EMPTY_ARRAYS => Self::EMPTY_ARRAYS,
            RULE_EMPTY_ID_SHORT => Self::EMPTY_ID_SHORT,
            RULE_ANY_URI_SLASH => Self::ANY_URI_SLASH,
            RULE_LANG_STRINGS => Self::LANG_STRINGS,
            RULE_LEGACY_KEYS => Self::LEGACY_KEYS,
            RULE_LIST_VALUE_TYPE => Self::LIST_VALUE_TYPE,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for CanonicalRules {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for CanonicalRules {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

/// Accepts raw bits, a comma separated string, or a list of rule names.
#[derive(Deserialize)]
#[serde(untagged)]
enum RulesRepr {
    Bits(u32),
    Text(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for CanonicalRules {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RulesRepr::deserialize(deserializer)? {
            RulesRepr::Bits(bits) => Self::from_bits_truncate(bits),
            RulesRepr::Text(text) => text.split(',').map(Self::from).collect(),
            RulesRepr::Names(names) => names.iter().map(|n| Self::from(n.as_str())).collect(),
        })
    }
}

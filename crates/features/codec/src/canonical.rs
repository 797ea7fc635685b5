//! Canonical rewrite of serialized submodel JSON.
//!
//! The pass runs over an already-serialized document, so every element kind gets
//! the same treatment without per-type code. Each rule is gated by a
//! [`CanonicalRules`] flag; the legacy-key check at the end is not.

use crate::error::{CodecError, CodecErrorExt, CodecResult};
use crate::fields::{
    ID_SHORT, KEYS, LANGUAGE, MODEL_TYPE, OPTIONAL_ARRAYS, SEMANTIC_ID, TEXT, VALUE, VALUE_TYPE,
    VALUE_TYPE_LIST_ELEMENT,
};
use crate::writer;
use serde_json::{Map, Value as Json};
use tracing::{error, trace};
use twin_domain::config::SerializerConfig;
use twin_domain::constants::{INOUTPUT_VARIABLES, LEGACY_INOUTPUT_VARIABLES, XS_PREFIX};
use twin_domain::rules::CanonicalRules;
use twin_model::{ModelType, NodeId, Tree};

const ANY_URI: &str = "anyURI";

/// Rewrites serialized documents into their canonical form.
///
/// ```rust
/// use twin_codec::Canonicalizer;
///
/// let out = Canonicalizer::default()
///     .canonicalize_str(r#"{"idShort":"","semanticId":{"keys":[]},"modelType":"Property"}"#)
///     .unwrap();
/// assert_eq!(out.to_string(), r#"{"modelType":"Property"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonicalizer {
    rules: CanonicalRules,
    pretty: bool,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(CanonicalRules::ALL)
    }
}

impl Canonicalizer {
    #[must_use]
    pub const fn new(rules: CanonicalRules) -> Self {
        Self { rules, pretty: true }
    }

    #[must_use]
    pub const fn from_config(config: &SerializerConfig) -> Self {
        Self { rules: config.rules, pretty: config.pretty }
    }

    /// Indented (default) or compact output from [`Canonicalizer::format`].
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub const fn rules(&self) -> CanonicalRules {
        self.rules
    }

    /// Applies every enabled rule, then verifies the legacy key is gone.
    ///
    /// # Errors
    /// [`CodecError::LegacyKeyRemains`] when `inOutputVariables` still appears as a
    /// key or a string value after the pass.
    pub fn canonicalize(&self, mut document: Json) -> CodecResult<Json> {
        self.rewrite(&mut document, "$");
        verify(&document, "$")?;
        Ok(document)
    }

    /// Parses `input` and canonicalizes it.
    ///
    /// # Errors
    /// Invalid JSON, or the failures of [`Canonicalizer::canonicalize`].
    pub fn canonicalize_str(&self, input: &str) -> CodecResult<Json> {
        let document = serde_json::from_str(input).context("Failed to parse document")?;
        self.canonicalize(document)
    }

    /// Renders a canonical document.
    ///
    /// # Errors
    /// [`CodecError::Json`] if rendering fails.
    pub fn format(&self, document: &Json) -> CodecResult<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        rendered.context("Failed to render document")
    }

    /// Writes, canonicalizes and renders the subtree at `root`.
    ///
    /// # Errors
    /// See [`writer::write`] and [`Canonicalizer::canonicalize`].
    pub fn serialize(&self, tree: &Tree, root: NodeId) -> CodecResult<String> {
        let document = self.canonicalize(writer::write(tree, root)?)?;
        self.format(&document)
    }

    /// `true` when canonicalizing `input` would not change its content.
    ///
    /// # Errors
    /// Same as [`Canonicalizer::canonicalize_str`].
    pub fn is_canonical(&self, input: &str) -> CodecResult<bool> {
        let original: Json = serde_json::from_str(input).context("Failed to parse document")?;
        let canonical = self.canonicalize(original.clone())?;
        Ok(original == canonical)
    }

    fn rewrite(&self, node: &mut Json, path: &str) {
        match node {
            Json::Object(map) => {
                self.rewrite_object(map, path);
                for (key, child) in map.iter_mut() {
                    self.rewrite(child, &format!("{path}.{key}"));
                }
            },
            Json::Array(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    self.rewrite(item, &format!("{path}[{index}]"));
                }
            },
            Json::String(text) if self.rules.contains(CanonicalRules::LEGACY_KEYS) => {
                if text.as_str() == LEGACY_INOUTPUT_VARIABLES {
                    trace!(path, "renamed legacy value");
                    INOUTPUT_VARIABLES.clone_into(text);
                }
            },
            _ => {},
        }
    }

    fn rewrite_object(&self, map: &mut Map<String, Json>, path: &str) {
        if self.rules.contains(CanonicalRules::LEGACY_KEYS) && map.contains_key(LEGACY_INOUTPUT_VARIABLES)
        {
            trace!(path, "renamed legacy key");
            *map = std::mem::take(map)
                .into_iter()
                .map(|(key, value)| {
                    if key == LEGACY_INOUTPUT_VARIABLES {
                        (INOUTPUT_VARIABLES.to_owned(), value)
                    } else {
                        (key, value)
                    }
                })
                .collect();
        }

        if self.rules.contains(CanonicalRules::LANG_STRINGS)
            && is_multi_language(map)
            && let Some(Json::Array(entries)) = map.get_mut(VALUE)
        {
            entries.iter_mut().for_each(normalize_lang_string);
        }

        if self.rules.contains(CanonicalRules::LIST_VALUE_TYPE)
            && let Some(Json::String(value_type)) = map.get_mut(VALUE_TYPE_LIST_ELEMENT)
            && !value_type.is_empty()
            && !starts_with_ignore_case(value_type, XS_PREFIX)
        {
            trace!(path, value_type = value_type.as_str(), "prefixed list value type");
            *value_type = format!("{XS_PREFIX}{value_type}");
        }

        if self.rules.contains(CanonicalRules::ANY_URI_SLASH)
            && is_any_uri(map)
            && let Some(Json::String(value)) = map.get_mut(VALUE)
            && let Some(trimmed) = trim_bare_authority(value).map(str::to_owned)
        {
            trace!(path, value = value.as_str(), "trimmed trailing slash");
            *value = trimmed;
        }

        if self.rules.contains(CanonicalRules::EMPTY_SEMANTIC_ID)
            && map.get(SEMANTIC_ID).is_some_and(is_empty_reference)
        {
            map.shift_remove(SEMANTIC_ID);
        }

        if self.rules.contains(CanonicalRules::EMPTY_ARRAYS) {
            for key in OPTIONAL_ARRAYS {
                if map.get(key).is_some_and(is_empty_array) {
                    map.shift_remove(key);
                }
            }
        }

        if self.rules.contains(CanonicalRules::EMPTY_ID_SHORT)
            && map.get(ID_SHORT).is_some_and(|id_short| id_short.is_null() || id_short == "")
        {
            map.shift_remove(ID_SHORT);
        }
    }
}

/// Writes, canonicalizes with every rule enabled and renders `root`.
///
/// # Errors
/// See [`Canonicalizer::serialize`].
pub fn to_canonical_string(tree: &Tree, root: NodeId, pretty: bool) -> CodecResult<String> {
    Canonicalizer::default().pretty(pretty).serialize(tree, root)
}

fn verify(node: &Json, path: &str) -> CodecResult<()> {
    let found = match node {
        Json::Object(map) => {
            if map.contains_key(LEGACY_INOUTPUT_VARIABLES) {
                Some(format!("{path}.{LEGACY_INOUTPUT_VARIABLES}"))
            } else {
                for (key, child) in map {
                    verify(child, &format!("{path}.{key}"))?;
                }
                None
            }
        },
        Json::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                verify(item, &format!("{path}[{index}]"))?;
            }
            None
        },
        Json::String(text) if text == LEGACY_INOUTPUT_VARIABLES => Some(path.to_owned()),
        _ => None,
    };

    match found {
        Some(path) => {
            error!(path = path.as_str(), "legacy key survived canonicalization");
            Err(CodecError::LegacyKeyRemains { message: path.into(), context: None })
        },
        None => Ok(()),
    }
}

fn is_multi_language(map: &Map<String, Json>) -> bool {
    map.get(MODEL_TYPE)
        .and_then(Json::as_str)
        .is_some_and(|model_type| model_type.eq_ignore_ascii_case(ModelType::MultiLanguageProperty.into()))
}

fn is_any_uri(map: &Map<String, Json>) -> bool {
    map.get(VALUE_TYPE).and_then(Json::as_str).is_some_and(|value_type| {
        let bare = value_type.strip_prefix(XS_PREFIX).unwrap_or(value_type);
        bare.eq_ignore_ascii_case(ANY_URI)
    })
}

fn is_empty_reference(reference: &Json) -> bool {
    match reference {
        Json::Null => true,
        Json::Object(map) => map.get(KEYS).is_none_or(|keys| keys.as_array().is_none_or(Vec::is_empty)),
        _ => false,
    }
}

fn is_empty_array(value: &Json) -> bool {
    value.is_null() || value.as_array().is_some_and(Vec::is_empty)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Rewrites `{"<lang>": "<text>"}` into `{"language": .., "text": ..}`.
fn normalize_lang_string(entry: &mut Json) {
    let Json::Object(map) = entry else {
        return;
    };
    if map.contains_key(LANGUAGE) && map.contains_key(TEXT) {
        return;
    }
    let Some((language, text)) = map.iter().next() else {
        return;
    };
    let (language, text) = (language.clone(), text.as_str().unwrap_or_default().to_owned());
    trace!(language = language.as_str(), "rewrote ad hoc language string");
    *entry = serde_json::json!({ LANGUAGE: language, TEXT: text });
}

/// For `scheme://host:port/` returns the URI without the final `/`.
///
/// Anything with a path, a query, a missing port or more than one trailing slash
/// is left alone.
fn trim_bare_authority(uri: &str) -> Option<&str> {
    let trimmed = uri.strip_suffix('/')?;
    let (scheme, authority) = trimmed.split_once("://")?;
    let scheme_ok = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok || authority.contains(['/', '?', '#']) {
        return None;
    }
    let (host, port) = authority.rsplit_once(':')?;
    let port_ok = !port.is_empty() && port.chars().all(|c| c.is_ascii_digit());
    (port_ok && !host.is_empty()).then_some(trimmed)
}

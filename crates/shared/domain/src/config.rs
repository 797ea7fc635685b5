use crate::rules::CanonicalRules;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the CLI and library consumers.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwinConfigInner {
    pub logging: LoggingConfig,
    pub serializer: SerializerConfig,
    pub repository: RepositoryConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct TwinConfig {
    #[serde(flatten, default)]
    inner: Arc<TwinConfigInner>,
}

impl Deref for TwinConfig {
    type Target = TwinConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TwinConfig {
    fn deref_mut(&mut self) -> &mut TwinConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logger settings. `level` accepts `trace`, `debug`, `info`, `warn`, `error` or `off`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
    pub filter: Option<String>,
    pub console: bool,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Output settings for the canonical serializer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    pub pretty: bool,
    pub rules: CanonicalRules,
}

/// Remote repository settings consumed by sync adapters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub base_url: Option<String>,
    pub submodel_prefix: String,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "twin".to_owned(),
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self { pretty: true, rules: CanonicalRules::ALL }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self { base_url: None, submodel_prefix: "https://smartfactory.de/submodels/".to_owned() }
    }
}

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Environment prefix for overrides, e.g. `TWIN__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "TWIN";

/// Base name of the configuration file probed when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "twin";

/// Custom error type for config loading.
#[twin_derive::twin_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration by layering a file with environment overrides.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, a `twin.{toml,json,yaml}`
///    file in the working directory is used when present and skipped otherwise.
/// 2. **Environment Overrides**: variables prefixed with `TWIN__`, nested keys separated
///    by double underscores (`TWIN__SERIALIZER__PRETTY` maps to `serializer.pretty`).
///
/// Fields absent from every source fall back to the target type's serde defaults.
///
/// # Errors
/// * The explicit configuration file cannot be found or parsed.
/// * The merged content does not match the structure of `T`.
///
/// # Example
/// ```rust
/// use twin_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     pretty: bool,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            info!("Loading config from {}", path.as_ref().display());
            File::from(path.as_ref()).required(true)
        },
        None => {
            debug!("No config path given, probing '{DEFAULT_CONFIG_FILE}'");
            File::with_name(DEFAULT_CONFIG_FILE).required(false)
        },
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

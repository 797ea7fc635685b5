use serde_json::json;
use twin_domain::config::{LoggingConfig, RepositoryConfig, SerializerConfig, TwinConfig};
use twin_domain::rules::CanonicalRules;

#[test]
fn config_defaults_are_sane() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "twin");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.directory.is_none());

    let serializer = SerializerConfig::default();
    assert!(serializer.pretty);
    assert_eq!(serializer.rules, CanonicalRules::ALL);

    let repository = RepositoryConfig::default();
    assert_eq!(repository.submodel_prefix, "https://smartfactory.de/submodels/");
}

#[test]
fn twin_config_deserializes() {
    let raw = json!({
        "logging": { "level": "debug", "directory": "/tmp/logs" },
        "serializer": { "pretty": false, "rules": ["empty-semantic-id", "legacy-keys"] },
        "repository": { "base_url": "http://localhost:8081" }
    });

    let cfg: TwinConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.name, "twin");
    assert!(!cfg.serializer.pretty);
    assert_eq!(
        cfg.serializer.rules,
        CanonicalRules::EMPTY_SEMANTIC_ID | CanonicalRules::LEGACY_KEYS
    );
    assert_eq!(cfg.repository.base_url.as_deref(), Some("http://localhost:8081"));
}

#[test]
fn twin_config_clone_is_copy_on_write() {
    let original = TwinConfig::default();
    let mut copy = original.clone();
    copy.logging.level = "trace".to_owned();

    assert_eq!(original.logging.level, "info");
    assert_eq!(copy.logging.level, "trace");
}

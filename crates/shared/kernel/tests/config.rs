use serial_test::serial;
use std::fs;
use tempfile::tempdir;
use twin_kernel::config::{ConfigError, load_config};
use twin_kernel::domain::config::TwinConfig;

#[test]
#[serial]
fn loads_file_and_keeps_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("twin.toml");
    fs::write(&path, "[logging]\nlevel = \"debug\"\n\n[serializer]\npretty = false\n")
        .expect("write config");

    let cfg: TwinConfig = load_config(Some(&path)).expect("config loads");
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.serializer.pretty);
    assert_eq!(cfg.repository.submodel_prefix, "https://smartfactory.de/submodels/");
}

#[test]
#[serial]
fn no_path_without_default_file_yields_defaults() {
    let cfg: TwinConfig = load_config(None::<&str>).expect("defaults load");
    assert_eq!(cfg.logging.name, "twin");
    assert!(cfg.serializer.pretty);
}

#[test]
#[serial]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config::<TwinConfig>(Some(dir.path().join("absent.toml")))
        .expect_err("explicit file is required");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

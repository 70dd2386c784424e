// Configuration loading from explicit files

mod common;

use common::{object, publish_records};
use semstore_core::errors::ExErrorKind;
use semstore_core::logging_facility::Profile;
use semstore_engine::{EngineConfig, VersionStore};
use semstore_store::StoreBackend;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_explicit_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("semstore-test.toml");
    fs::write(
        &config_path,
        format!(
            "[logging]\nprofile = \"test\"\n\n[storage]\nbackend = \"filesystem\"\npath = \"{}\"\n",
            data_dir.display()
        ),
    )
    .unwrap();

    let config = EngineConfig::load(Some(&config_path)).unwrap();

    assert_eq!(config.logging.profile, Profile::Test);
    assert_eq!(config.storage.backend, StoreBackend::Filesystem);
    assert_eq!(config.storage.path.as_deref(), Some(data_dir.as_path()));

    let store = VersionStore::from_config(&config).unwrap();
    assert_eq!(store.backend(), StoreBackend::Filesystem);
    publish_records(&store, &[object("bo_cfg", "Configured", &[])], "from config");
    assert!(data_dir.join("semantic_versions.json").exists());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("partial.toml");
    fs::write(&config_path, "[logging]\nprofile = \"production\"\n").unwrap();

    let config = EngineConfig::load(Some(&config_path)).unwrap();

    assert_eq!(config.logging.profile, Profile::Production);
    assert_eq!(config.storage.backend, StoreBackend::Memory);
    assert!(config.storage.path.is_none());
}

#[test]
fn test_missing_explicit_file_is_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = EngineConfig::load(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_unknown_backend_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[storage]\nbackend = \"postgres\"\n").unwrap();

    assert!(EngineConfig::load(Some(&config_path)).is_err());
}

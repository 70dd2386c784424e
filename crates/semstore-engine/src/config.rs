//! Engine configuration
//!
//! Sources, later overriding earlier:
//! 1. `semstore.toml` in the current directory (if it exists)
//! 2. The file passed to [`EngineConfig::load`] (if any)
//! 3. The file named by `SEMSTORE_CONFIG` (if set)
//! 4. `SEMSTORE__*` environment variables, `__` separating sections
//!    (`SEMSTORE__STORAGE__BACKEND=sqlite`)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use semstore_core::errors::{Result, SemStoreError};
use semstore_core::logging_facility::Profile;
use semstore_store::StoreBackend;

pub const DEFAULT_CONFIG_FILE: &str = "semstore";
pub const CONFIG_ENV_VAR: &str = "SEMSTORE_CONFIG";
pub const CONFIG_ENV_PREFIX: &str = "SEMSTORE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

/// Where the version history is persisted
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// Root directory (`filesystem`) or database file (`sqlite`)
    pub path: Option<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// `Configuration` when an explicitly named file is missing or a value
    /// does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        use ::config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::from(config_path).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::from(PathBuf::from(config_path)).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(config_error)?;

        config.try_deserialize().map_err(config_error)
    }

    /// Memory-backed configuration with logging left to the test harness
    pub fn for_test() -> Self {
        Self {
            logging: LoggingConfig {
                profile: Profile::Test,
            },
            storage: StorageConfig::default(),
        }
    }
}

fn config_error(err: ::config::ConfigError) -> SemStoreError {
    SemStoreError::Configuration {
        message: err.to_string(),
    }
}

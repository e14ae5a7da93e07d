//! Configuration for the memtab shell and binary.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `MEMTAB__*` environment variables (e.g. `MEMTAB__LOG_FILTER=debug`).

use crate::IndexKind;
use config::{Config, Environment, File, FileFormat, Map};
use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Prefix of the environment variables read by [`ShellConfig::load`].
pub const ENV_PREFIX: &str = "MEMTAB";

/// Maximum number of entries kept in the shell history file by default.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] config::ConfigError),
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Setters, TypedBuilder,
)]
#[getset(get = "pub", set = "pub")]
pub struct ShellConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set.
    #[builder(default = "warn".to_string())]
    log_filter: String,
    #[builder(default = PathBuf::from(".memtab_history"))]
    history_file: PathBuf,
    #[builder(default = DEFAULT_HISTORY_SIZE)]
    history_size: usize,
    /// Stop at the first failing command.
    #[builder(default = false)]
    bail_on_error: bool,
    /// Print the elapsed time of every command.
    #[builder(default = false)]
    timer: bool,
    /// Index implementation used when `.index` names none (`ordered` or `hash`).
    #[builder(default)]
    default_index: IndexKind,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig::builder().build()
    }
}

impl ShellConfig {
    /// Loads the configuration from the optional file and the process environment.
    pub fn load(file_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file_path, None)
    }

    /// Same as [`ShellConfig::load`], reading environment overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        file_path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = ShellConfig::default();

        let mut builder = Config::builder()
            .set_default("log_filter", defaults.log_filter.clone())?
            .set_default(
                "history_file",
                defaults.history_file.to_string_lossy().into_owned(),
            )?
            .set_default("history_size", defaults.history_size as i64)?
            .set_default("bail_on_error", defaults.bail_on_error)?
            .set_default("timer", defaults.timer)?
            .set_default("default_index", defaults.default_index.to_string())?;

        if let Some(path) = file_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(config.try_deserialize::<ShellConfig>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_defaults_without_file() {
        let config = ShellConfig::load_with_env(None, Some(Map::new())).unwrap();

        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.history_size(), &DEFAULT_HISTORY_SIZE);
        assert_eq!(config.default_index(), &IndexKind::Ordered);
    }

    #[test]
    fn load_valid_config_from_file() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
        log_filter = "debug"
        history_file = "/tmp/memtab_history"
        history_size = 10
        bail_on_error = true
        default_index = "hash"
    "#
        )
        .unwrap();

        let config = ShellConfig::load_with_env(Some(temp_file.path()), Some(Map::new())).unwrap();

        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.history_file(), &PathBuf::from("/tmp/memtab_history"));
        assert_eq!(config.history_size(), &10);
        assert!(*config.bail_on_error());
        assert!(!*config.timer());
        assert_eq!(config.default_index(), &IndexKind::Hash);
    }

    #[test]
    fn override_config_with_env_vars() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"log_filter = "info""#).unwrap();

        let mut env = Map::new();
        env.insert("MEMTAB__LOG_FILTER".to_string(), "trace".to_string());
        env.insert("MEMTAB__TIMER".to_string(), "true".to_string());

        let config = ShellConfig::load_with_env(Some(temp_file.path()), Some(env)).unwrap();

        assert_eq!(config.log_filter(), "trace");
        assert!(*config.timer());
    }

    #[test]
    fn unknown_default_index_fails_to_load() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"default_index = "bitmap""#).unwrap();

        let result = ShellConfig::load_with_env(Some(temp_file.path()), Some(Map::new()));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));

        let mut env = Map::new();
        env.insert("MEMTAB__DEFAULT_INDEX".to_string(), "btree".to_string());
        let config = ShellConfig::load_with_env(None, Some(env)).unwrap();
        assert_eq!(config.default_index(), &IndexKind::Ordered);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = ShellConfig::load_with_env(
            Some(Path::new("/nonexistent/memtab.toml")),
            Some(Map::new()),
        );
        assert!(result.is_err());
    }
}

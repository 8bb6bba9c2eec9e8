//! Config loading facade: assembles sources in precedence order.

use super::merge;
use super::sources::{environment, explicit_file, global_file};
use super::FimConfig;
use config::ConfigError;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file if present, then environment overrides
    pub fn load() -> Result<FimConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load defaults, the given file (required), then environment overrides
    pub fn load_from_file(path: &Path) -> Result<FimConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load from an explicit path when given, otherwise from the default sources
    pub fn load_optional(path: Option<&Path>) -> Result<FimConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

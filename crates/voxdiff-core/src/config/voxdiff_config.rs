//! Top-level voxdiff configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EngineConfig, SourceConfig};
use crate::errors::ConfigError;
use crate::nifti::OffsetPolicy;
use crate::ssd::Strategy;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "voxdiff.toml";

const MAX_THREADS: usize = 1024;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VOXDIFF_*`)
/// 3. Config file (`--config`, else `voxdiff.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VoxdiffConfig {
    pub engine: EngineConfig,
    pub source: SourceConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub strategy: Option<Strategy>,
    pub threads: Option<usize>,
    pub repeat: Option<u32>,
    pub offset_policy: Option<OffsetPolicy>,
}

impl VoxdiffConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_file` must exist; the implicit `voxdiff.toml` in
    /// `root` is optional.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: config file
        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let implicit = root.join(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Self::merge_toml_file(&mut config, &implicit)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VoxdiffConfig) -> Result<(), ConfigError> {
        if let Some(repeat) = config.engine.repeat {
            if repeat == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.repeat".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(threads) = config.engine.threads {
            if threads > MAX_THREADS {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.threads".to_string(),
                    message: format!("must be at most {}", MAX_THREADS),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VoxdiffConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: VoxdiffConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut VoxdiffConfig, other: &VoxdiffConfig) {
        // Engine
        if other.engine.strategy.is_some() {
            base.engine.strategy = other.engine.strategy;
        }
        if other.engine.threads.is_some() {
            base.engine.threads = other.engine.threads;
        }
        if other.engine.repeat.is_some() {
            base.engine.repeat = other.engine.repeat;
        }

        // Source
        if other.source.offset_policy.is_some() {
            base.source.offset_policy = other.source.offset_policy;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VOXDIFF_STRATEGY`, `VOXDIFF_THREADS`, etc. Unparseable
    /// values are errors rather than silently falling back.
    fn apply_env_overrides(config: &mut VoxdiffConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<Strategy>("VOXDIFF_STRATEGY")? {
            config.engine.strategy = Some(v);
        }
        if let Some(v) = env_value::<usize>("VOXDIFF_THREADS")? {
            config.engine.threads = Some(v);
        }
        if let Some(v) = env_value::<u32>("VOXDIFF_REPEAT")? {
            config.engine.repeat = Some(v);
        }
        if let Some(v) = env_value::<OffsetPolicy>("VOXDIFF_OFFSET_POLICY")? {
            config.source.offset_policy = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut VoxdiffConfig, cli: &CliOverrides) {
        if let Some(v) = cli.strategy {
            config.engine.strategy = Some(v);
        }
        if let Some(v) = cli.threads {
            config.engine.threads = Some(v);
        }
        if let Some(v) = cli.repeat {
            config.engine.repeat = Some(v);
        }
        if let Some(v) = cli.offset_policy {
            config.source.offset_policy = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                value: val,
            }),
        Err(_) => Ok(None),
    }
}

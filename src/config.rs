//! Generator configuration, persisted as JSON.
//!
//! Every section is `#[serde(default)]`, so a file only needs the values it
//! changes; anything missing keeps its built-in default.

use crate::builder::BuildOptions;
use crate::heaviness::BucketTable;
use crate::params::{Limits, SignRequest};
use crate::predict::PredictorTuning;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {} is not valid: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where exported files go when no directory is given explicitly.
    pub directory: PathBuf,
    /// Append the weight label (`_bold`, ...) to exported file stems.
    pub include_weight_label: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            include_weight_label: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Values used for anything a request leaves out.
    pub defaults: SignRequest,
    pub limits: Limits,
    pub predictor: PredictorTuning,
    pub buckets: BucketTable,
    pub build: BuildOptions,
    pub output: OutputConfig,
    /// Named requests saved by the user.
    pub presets: BTreeMap<String, SignRequest>,
}

impl GeneratorConfig {
    /// Read `path`, or return the defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            },
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            },
        };
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Store `request` under `name`, replacing any preset of that name.
    pub fn save_preset(&mut self, name: impl Into<String>, request: SignRequest) {
        self.presets.insert(name.into(), request);
    }

    pub fn preset(&self, name: &str) -> Option<&SignRequest> {
        self.presets.get(name)
    }

    pub fn remove_preset(&mut self, name: &str) -> Option<SignRequest> {
        self.presets.remove(name)
    }
}

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yml;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::record::FieldMap;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read the config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse the config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
    #[error("No device address given, use --ip or set ip in the config file")]
    MissingAddress,
}

fn ip_default() -> Option<String> { None }
fn fields_default() -> FieldMap { FieldMap::new() }

/// Contents of the optional YAML config file
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default="ip_default")]
    pub ip: Option<String>,
    #[serde(default="fields_default")]
    pub fields: FieldMap,
}

impl Config {
    pub fn from_yaml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yml::from_str(contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_yaml(&contents, path)?;
        info!("Loaded config from {:?} with {} field(s)", path, config.fields.len());
        Ok(config)
    }
}

/// Effective settings of one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub address: Option<String>,
    pub fields: FieldMap,
}

impl From<Config> for Settings {
    fn from(config: Config) -> Self {
        Settings { address: config.ip, fields: config.fields }
    }
}

impl Settings {
    /// Layers `other` on top of `self`, values present in `other` win.
    pub fn merge(mut self, other: Settings) -> Settings {
        if other.address.is_some() {
            self.address = other.address;
        }
        for (field, identifier) in other.fields {
            debug!("Identifier for {} set to '{}'", field.json_name(), identifier);
            self.fields.insert(field, identifier);
        }
        self
    }

    pub fn require_address(&self) -> Result<&str, ConfigError> {
        match self.address.as_deref() {
            Some(address) if !address.is_empty() => Ok(address),
            _ => Err(ConfigError::MissingAddress),
        }
    }
}

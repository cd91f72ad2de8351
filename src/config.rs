use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AppError;

const CONFIG_FILE_NAME: &str = ".timetrack.yml";

/// Contents of `~/.timetrack.yml`.
///
/// ```yaml
/// editor: nvim
/// defaults:
///   email: me@example.com
///   project: internal
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    defaults: Option<BTreeMap<String, serde_yml::Value>>,
}

impl ConfigFile {
    /// Default option values as strings. Null entries are skipped.
    pub fn defaults(&self, path: &Path) -> Result<BTreeMap<String, String>, AppError> {
        let mut resolved = BTreeMap::new();
        let Some(defaults) = &self.defaults else {
            return Ok(resolved);
        };
        for (key, value) in defaults {
            if let Some(value) = scalar_to_string(value).map_err(|kind| AppError::Config {
                path: path.to_path_buf(),
                message: format!("defaults.{key} must be a scalar, found a {kind}"),
            })? {
                resolved.insert(key.clone(), value);
            }
        }
        Ok(resolved)
    }
}

pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

/// Reads the config file. A missing file yields `None`.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>, AppError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        Err(err) => {
            return Err(AppError::Config {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };
    tracing::debug!(path = %path.display(), "loading config");
    parse_config(&contents, path).map(Some)
}

fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, AppError> {
    // An empty document deserializes as null.
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yml::from_str(contents).map_err(|err| AppError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn scalar_to_string(value: &serde_yml::Value) -> Result<Option<String>, &'static str> {
    match value {
        serde_yml::Value::Null => Ok(None),
        serde_yml::Value::Bool(flag) => Ok(Some(flag.to_string())),
        serde_yml::Value::Number(number) => Ok(Some(number.to_string())),
        serde_yml::Value::String(text) => Ok(Some(text.clone())),
        serde_yml::Value::Sequence(_) => Err("sequence"),
        serde_yml::Value::Mapping(_) => Err("mapping"),
        serde_yml::Value::Tagged(tagged) => scalar_to_string(tagged.value()),
    }
}

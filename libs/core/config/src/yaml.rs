//! YAML config file discovery and loose string lookups.
//!
//! Keys are matched case-insensitively. Scalars are rendered as strings and
//! anything missing (or not a scalar) reads as an empty string, so callers
//! decide for themselves which keys are mandatory.

use crate::ConfigError;
use serde_yaml_ng::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried, in order, when looking for a config file
pub const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Locate `<dir>/<name>.yaml` or `<dir>/<name>.yml`, first match wins.
pub fn find_config_file(dir: impl AsRef<Path>, name: &str) -> Result<PathBuf, ConfigError> {
    let dir = dir.as_ref();
    let searched: Vec<PathBuf> = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .collect();

    match searched.iter().find(|path| path.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(ConfigError::FileNotFound { searched }),
    }
}

/// A parsed YAML document whose root is a mapping
#[derive(Clone, Debug, Default)]
pub struct YamlSource {
    path: Option<PathBuf>,
    root: Mapping,
}

impl YamlSource {
    /// Discover `config.{yaml,yml}` in `dir` and load it
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = find_config_file(dir, "config")?;
        Self::from_file(path)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let mut source = Self::parse(&content).map_err(|details| ConfigError::Parse {
            path: path.clone(),
            details,
        })?;

        debug!(path = %path.display(), keys = source.root.len(), "Loaded config file");
        source.path = Some(path);
        Ok(source)
    }

    /// Parse a YAML document from a string.
    ///
    /// An empty document is accepted and behaves as an empty mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content).map_err(|details| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            details,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let value: Value = serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?;

        let root = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => {
                return Err(format!(
                    "expected a mapping at the document root, found {}",
                    kind_of(&other)
                ))
            }
        };

        Ok(Self { path: None, root })
    }

    /// Path the document was loaded from, if it came from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up `key` and render it as a string, `""` when absent
    pub fn get_string(&self, key: &str) -> String {
        self.lookup(key).map(scalar_to_string).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.root.iter().find_map(|(k, v)| match k {
            Value::String(name) if name.eq_ignore_ascii_case(key) => Some(v),
            _ => None,
        })
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

pub mod tracing;
pub mod yaml;

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub use yaml::{find_config_file, YamlSource};

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found (searched: {})", display_paths(.searched))]
    FileNotFound { searched: Vec<PathBuf> },

    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {details}", .path.display())]
    Parse { path: PathBuf, details: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application environment, selects the log format
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Pretty, human-readable logs
    Production,  // JSON logs for aggregation
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be built from a loaded YAML document
pub trait FromYaml: Sized {
    fn from_yaml(source: &YamlSource) -> Result<Self, ConfigError>;
}

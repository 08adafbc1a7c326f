use core_config::{ConfigError, FromYaml, YamlSource};
use std::path::Path;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Keys read from the config file
pub const KNOWN_KEYS: [&str; 5] = ["host", "database", "collection", "username", "password"];

/// Application configuration, loaded once at startup and passed down explicitly
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub collection: String,
    pub environment: Environment,
}

impl Config {
    /// Load `config.yaml` / `config.yml` from `dir`
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = YamlSource::discover(dir)?;
        Self::from_yaml(&source)
    }

    /// Known keys absent from `source`; they read as empty strings
    pub fn missing_keys(source: &YamlSource) -> Vec<&'static str> {
        KNOWN_KEYS
            .into_iter()
            .filter(|key| !source.contains_key(key))
            .collect()
    }
}

impl FromYaml for Config {
    fn from_yaml(source: &YamlSource) -> Result<Self, ConfigError> {
        Ok(Self {
            mongodb: MongoConfig::from_yaml(source)?.with_app_name(env!("CARGO_PKG_NAME")),
            collection: source.get_string("collection"),
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "host: localhost:27017\ndatabase: testdb\ncollection: probe\nusername: u\npassword: p\n";

    #[test]
    fn test_config_from_yaml() {
        let source = YamlSource::from_yaml_str(EXAMPLE).unwrap();
        let config = Config::from_yaml(&source).unwrap();

        assert_eq!(config.mongodb.host(), "localhost:27017");
        assert_eq!(config.mongodb.database(), "testdb");
        assert_eq!(config.mongodb.username, "u");
        assert_eq!(config.mongodb.password, "p");
        assert_eq!(config.collection, "probe");
        assert_eq!(config.mongodb.app_name.as_deref(), Some("psmdb_tester"));
        assert!(Config::missing_keys(&source).is_empty());
    }

    #[test]
    fn test_config_missing_keys_are_empty() {
        let source = YamlSource::from_yaml_str("host: localhost:27017\n").unwrap();
        let config = Config::from_yaml(&source).unwrap();

        assert_eq!(config.collection, "");
        assert_eq!(config.mongodb.database(), "");
        assert_eq!(
            Config::missing_keys(&source),
            vec!["database", "collection", "username", "password"]
        );
    }

    #[test]
    fn test_config_discover() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), EXAMPLE).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.mongodb.uri(), "mongodb://localhost:27017/testdb");
    }

    #[test]
    fn test_config_discover_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_config_discover_unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "host: [oops\n").unwrap();

        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_config_environment_from_app_env() {
        temp_env::with_var("APP_ENV", Some("production"), || {
            let source = YamlSource::from_yaml_str(EXAMPLE).unwrap();
            let config = Config::from_yaml(&source).unwrap();
            assert!(config.environment.is_production());
        });
    }
}

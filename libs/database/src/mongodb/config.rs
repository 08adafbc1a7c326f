#[cfg(feature = "config")]
use core_config::{ConfigError, FromYaml, YamlSource};

/// Default bound on connecting and pinging at startup
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 10;

/// MongoDB connection settings
///
/// Built from the individual `host`/`database`/credential values rather
/// than a full connection string; [`MongoConfig::uri`] assembles the URI.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("localhost:27017", "testdb")
///     .with_credentials("u", "p");
/// assert_eq!(config.uri(), "mongodb://localhost:27017/testdb");
///
/// // From a YAML source (requires `config` feature)
/// let config = MongoConfig::from_yaml(&source)?;
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// Network address, `host[:port]`
    pub host: String,

    /// Database name, also the path component of the URI
    pub database: String,

    /// Username; empty means no credential is attached
    pub username: String,

    pub password: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connect, server selection and startup-ping bound in seconds
    pub startup_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            username: String::new(),
            password: String::new(),
            app_name: None,
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_startup_timeout(mut self, secs: u64) -> Self {
        self.startup_timeout_secs = secs;
        self
    }

    /// Connection URI in the form `mongodb://{host}/{database}`
    pub fn uri(&self) -> String {
        format!("mongodb://{}/{}", self.host, self.database)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

// Keeps the password out of logs
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("app_name", &self.app_name)
            .field("startup_timeout_secs", &self.startup_timeout_secs)
            .finish()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("localhost:27017", "")
    }
}

/// Load MongoConfig from a YAML source
///
/// Keys: `host`, `database`, `username`, `password`. Missing keys read as
/// empty strings; nothing is rejected here, a bad value surfaces when the
/// connection is attempted.
#[cfg(feature = "config")]
impl FromYaml for MongoConfig {
    fn from_yaml(source: &YamlSource) -> Result<Self, ConfigError> {
        Ok(Self::new(source.get_string("host"), source.get_string("database"))
            .with_credentials(source.get_string("username"), source.get_string("password")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("localhost:27017", "testdb");
        assert_eq!(config.host(), "localhost:27017");
        assert_eq!(config.database(), "testdb");
        assert!(!config.has_credentials());
        assert_eq!(config.startup_timeout_secs, DEFAULT_STARTUP_TIMEOUT_SECS);
    }

    #[test]
    fn test_mongo_config_uri() {
        let config = MongoConfig::new("db.internal:27018", "probes");
        assert_eq!(config.uri(), "mongodb://db.internal:27018/probes");
    }

    #[test]
    fn test_mongo_config_uri_keeps_credentials_out() {
        let config = MongoConfig::new("localhost", "testdb").with_credentials("u", "secret");
        assert!(config.has_credentials());
        assert!(!config.uri().contains("secret"));
    }

    #[test]
    fn test_mongo_config_debug_redacts_password() {
        let config = MongoConfig::new("localhost", "testdb").with_credentials("u", "secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_mongo_config_with_app_name() {
        let config = MongoConfig::default().with_app_name("psmdb-tester");
        assert_eq!(config.app_name, Some("psmdb-tester".to_string()));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_yaml() {
        let source = YamlSource::from_yaml_str(
            "host: localhost:27017\ndatabase: testdb\nusername: u\npassword: p\n",
        )
        .unwrap();

        let config = MongoConfig::from_yaml(&source).unwrap();
        assert_eq!(config.uri(), "mongodb://localhost:27017/testdb");
        assert_eq!(config.username, "u");
        assert_eq!(config.password, "p");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_yaml_missing_keys_are_empty() {
        let source = YamlSource::from_yaml_str("host: localhost\n").unwrap();

        let config = MongoConfig::from_yaml(&source).unwrap();
        assert_eq!(config.database, "");
        assert!(!config.has_credentials());
        assert_eq!(config.uri(), "mongodb://localhost/");
    }
}

//! Configuration management for the guestbook.
//!
//! Parses `guestbook.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Values without `${` are taken literally, bare `$VAR` included.
//!
//! Expanded fields:
//! - `server.host`
//! - `storage.data_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override data directory.
    pub data_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "guestbook.toml";

/// Default guest list document name.
const DEFAULT_GUESTS_FILE: &str = "guests.json";

/// Default visit ledger document name.
const DEFAULT_VISITS_FILE: &str = "visits.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration (data dir is a relative string from TOML).
    storage: StorageConfigRaw,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Raw storage configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    data_dir: Option<String>,
    guests_file: Option<String>,
    visits_file: Option<String>,
}

/// Resolved storage configuration with an absolute data directory.
#[derive(Debug)]
pub struct StorageConfig {
    /// Directory holding both documents.
    pub data_dir: PathBuf,
    /// Guest list document name.
    pub guests_file: String,
    /// Visit ledger document name.
    pub visits_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            guests_file: DEFAULT_GUESTS_FILE.to_owned(),
            visits_file: DEFAULT_VISITS_FILE.to_owned(),
        }
    }
}

impl StorageConfig {
    /// Full path of the guest list document.
    #[must_use]
    pub fn guests_path(&self) -> PathBuf {
        self.data_dir.join(&self.guests_file)
    }

    /// Full path of the visit ledger document.
    #[must_use]
    pub fn visits_path(&self) -> PathBuf {
        self.data_dir.join(&self.visits_file)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`GUESTBOOK_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a document name to be a bare file name.
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name without directories"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `guestbook.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.storage_resolved.data_dir.clone_from(data_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfigRaw::default(),
            storage_resolved: StorageConfig {
                data_dir: base.to_path_buf(),
                ..StorageConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_storage()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate storage configuration.
    fn validate_storage(&self) -> Result<(), ConfigError> {
        let storage = &self.storage_resolved;
        require_file_name(&storage.guests_file, "storage.guests_file")?;
        require_file_name(&storage.visits_file, "storage.visits_file")?;

        if storage.guests_file == storage.visits_file {
            return Err(ConfigError::Validation(
                "storage.guests_file and storage.visits_file must differ".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref data_dir) = self.storage.data_dir {
            self.storage.data_dir = Some(expand::expand_env(data_dir, "storage.data_dir")?);
        }

        Ok(())
    }

    /// Resolve the data directory relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = StorageConfig::default();
        self.storage_resolved = StorageConfig {
            data_dir: self
                .storage
                .data_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
            guests_file: self
                .storage
                .guests_file
                .clone()
                .unwrap_or(defaults.guests_file),
            visits_file: self
                .storage
                .visits_file
                .clone()
                .unwrap_or(defaults.visits_file),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/test"));
        assert_eq!(
            config.storage_resolved.guests_path(),
            PathBuf::from("/test/guests.json")
        );
        assert_eq!(
            config.storage_resolved.visits_path(),
            PathBuf::from("/test/visits.json")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[storage]
data_dir = "data"
guests_file = "book.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/project/data")
        );
        assert_eq!(config.storage_resolved.guests_file, "book.json");
        assert_eq!(config.storage_resolved.visits_file, "visits.json");
    }

    #[test]
    fn test_resolve_paths_defaults_to_config_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/project"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("guestbook.toml");
        std::fs::write(&path, "[server]\nport = 8081\n[storage]\ndata_dir = \"state\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(
            config.storage_resolved.data_dir,
            temp_dir.path().join("state")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/guestbook.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("guestbook.toml");
        std::fs::write(&path, "[server\nport = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            data_dir: Some(PathBuf::from("/srv/guestbook")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/srv/guestbook")
        );
        assert_eq!(config.storage_resolved.guests_file, "guests.json");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/test"));
    }

    #[test]
    fn test_expand_env_vars() {
        let toml = r#"
[server]
host = "${GUESTBOOK_TEST_CONFIG_HOST_NEVER_SET:-0.0.0.0}"

[storage]
data_dir = "${GUESTBOOK_TEST_CONFIG_DATA_NEVER_SET:-state}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.data_dir.as_deref(), Some("state"));
    }

    #[test]
    fn test_expand_env_vars_missing_names_field() {
        let toml = r#"
[server]
host = "${GUESTBOOK_TEST_CONFIG_HOST_NEVER_SET}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(err.to_string().contains("server.host"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_guests_file_with_directory() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.storage_resolved.guests_file = "../guests.json".to_owned();
        assert_validation_error(&config, &["storage.guests_file", "file name"]);
    }

    #[test]
    fn test_validate_visits_file_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.storage_resolved.visits_file = String::new();
        assert_validation_error(&config, &["storage.visits_file", "empty"]);
    }

    #[test]
    fn test_validate_same_file_for_both_documents() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.storage_resolved.visits_file = "guests.json".to_owned();
        assert_validation_error(&config, &["must differ"]);
    }
}

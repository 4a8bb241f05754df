//! Configuration management for Shelf.
//!
//! Parses `shelf.toml` configuration files with serde and provides
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
//! Expanded fields:
//! - `server.host`
//! - `server.base_url`
//! - `corpus.path`

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
    /// Override public base URL.
    pub base_url: Option<String>,
    /// Override corpus file path.
    pub corpus_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "shelf.toml";

/// Default corpus filename, relative to the config directory.
const DEFAULT_CORPUS: &str = "corpus.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Corpus configuration (path is a relative string from TOML).
    corpus: CorpusConfigRaw,

    /// Resolved corpus configuration (set after loading).
    #[serde(skip)]
    pub corpus_resolved: CorpusConfig,
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
    /// Public URL used in generated links instead of the request `Host` header.
    pub base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            base_url: None,
        }
    }
}

/// Raw corpus configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CorpusConfigRaw {
    path: Option<String>,
}

/// Resolved corpus configuration with an absolute path.
#[derive(Debug, Default)]
pub struct CorpusConfig {
    /// Corpus JSON file.
    pub path: PathBuf,
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
        /// Config field path (e.g., "`corpus.path`").
        field: String,
        /// Error message (e.g., "${`SHELF_CORPUS`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Strip trailing slashes so `{base_url}/{id}` never doubles them.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `shelf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the result does not validate.
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
        if let Some(base_url) = &settings.base_url {
            self.server.base_url = Some(normalize_base_url(base_url));
        }
        if let Some(corpus_path) = &settings.corpus_path {
            self.corpus_resolved.path.clone_from(corpus_path);
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
            corpus: CorpusConfigRaw::default(),
            corpus_resolved: CorpusConfig {
                path: base.join(DEFAULT_CORPUS),
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
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if let Some(ref base_url) = self.server.base_url {
            require_non_empty(base_url, "server.base_url")?;
            require_http_url(base_url, "server.base_url")?;
        }

        if self.corpus_resolved.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "corpus.path cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.server.base_url {
            self.server.base_url = Some(expand::expand_env(url, "server.base_url")?);
        }

        if let Some(ref path) = self.corpus.path {
            self.corpus.path = Some(expand::expand_env(path, "corpus.path")?);
        }

        Ok(())
    }

    /// Resolve the corpus path against the config directory and normalize URLs.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.corpus_resolved = CorpusConfig {
            path: config_dir.join(self.corpus.path.as_deref().unwrap_or(DEFAULT_CORPUS)),
        };
        self.server.base_url = self.server.base_url.as_deref().map(normalize_base_url);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.base_url, None);
        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/test/corpus.json")
        );
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
base_url = "https://docs.example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("https://docs.example.com")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[server]
base_url = "http://docs.local/"

[corpus]
path = "data/corpus.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/project/data/corpus.json")
        );
        assert_eq!(config.server.base_url.as_deref(), Some("http://docs.local"));
    }

    #[test]
    fn test_resolve_paths_default_corpus() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/project/corpus.json")
        );
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_corpus() {
        let mut config: Config = toml::from_str("[corpus]\npath = \"/srv/corpus.json\"").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/srv/corpus.json")
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            host: Some("127.0.0.1".to_owned()),
            port: Some(3000),
            base_url: Some("https://docs.example.com/".to_owned()),
            corpus_path: Some(PathBuf::from("/data/corpus.json")),
        };

        config.apply_cli_settings(&settings);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("https://docs.example.com")
        );
        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/data/corpus.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.corpus_resolved.path,
            PathBuf::from("/test/corpus.json")
        );
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SHELF_TEST_HOST", "127.0.0.1");
        }

        let toml = r#"
[server]
host = "${SHELF_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");

        unsafe {
            std::env::remove_var("SHELF_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SHELF_MISSING_CORPUS_VAR");
        }

        let toml = r#"
[corpus]
path = "${SHELF_MISSING_CORPUS_VAR}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SHELF_MISSING_CORPUS_VAR"));
        assert!(err.to_string().contains("corpus.path"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.base_url = Some("docs.example.com".to_owned());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.base_url"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        std::fs::write(&path, "[server]\nport = 9090\n\n[corpus]\npath = \"docs.json\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.corpus_resolved.path, temp_dir.path().join("docs.json"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_settings_override_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();
        let settings = CliSettings {
            port: Some(7000),
            ..CliSettings::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_load_rejects_invalid_cli_base_url() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            base_url: Some("ftp://docs".to_owned()),
            ..CliSettings::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

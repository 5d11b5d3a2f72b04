//! Configuration management for picvote
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{PicvoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for picvote
///
/// This structure holds everything the client needs: where the backend
/// lives and how the client polls and persists its session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Client behavior settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the voting backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix under which picture images are served
    #[serde(default = "default_images_path")]
    pub images_path: String,

    /// Timeout for backend requests (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_images_path() -> String {
    "/images".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            images_path: default_images_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// Base URL with any trailing slash removed
    ///
    /// Endpoint and image paths are joined with a leading slash, so a
    /// trailing slash on the configured base would produce double slashes.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Client behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Interval between gallery/stats refreshes in watch mode (seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Optional explicit path for the persisted session file
    ///
    /// When unset, the session lives in the platform data directory
    /// (overridable via `PICVOTE_SESSION_FILE`).
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            session_file: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PicvoteError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| PicvoteError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("PICVOTE_SERVER_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(images_path) = std::env::var("PICVOTE_IMAGES_PATH") {
            self.server.images_path = images_path;
        }

        if let Ok(timeout) = std::env::var("PICVOTE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid PICVOTE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(interval) = std::env::var("PICVOTE_POLL_INTERVAL") {
            if let Ok(value) = interval.parse() {
                self.client.poll_interval_secs = value;
            } else {
                tracing::warn!("Invalid PICVOTE_POLL_INTERVAL: {}", interval);
            }
        }

        if let Ok(session_file) = std::env::var("PICVOTE_SESSION_FILE") {
            self.client.session_file = Some(PathBuf::from(session_file));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            self.server.base_url = server.clone();
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// Ensures the server URL is a usable http(s) endpoint and that
    /// timing values are nonzero.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.is_empty() {
            return Err(PicvoteError::Config("Server URL cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(&self.server.base_url)
            .map_err(|e| PicvoteError::Config(format!("Invalid server URL: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PicvoteError::Config(format!(
                "Invalid server URL scheme: {}. Must be http or https",
                parsed.scheme()
            ))
            .into());
        }

        if !self.server.images_path.starts_with('/') {
            return Err(
                PicvoteError::Config("images_path must start with '/'".to_string()).into(),
            );
        }

        if self.server.timeout_seconds == 0 {
            return Err(
                PicvoteError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.client.poll_interval_secs == 0 {
            return Err(PicvoteError::Config(
                "poll_interval_secs must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn cli_with_defaults() -> crate::cli::Cli {
        crate::cli::Cli {
            config: None,
            server: None,
            verbose: false,
            command: crate::cli::Commands::Gallery { json: false },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.server.images_path, "/images");
        assert_eq!(config.server.timeout_seconds, 10);
        assert_eq!(config.client.poll_interval_secs, 30);
        assert!(config.client.session_file.is_none());
    }

    #[test]
    fn test_config_validation_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_url() {
        let mut config = Config::default();
        config.server.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_unparseable_url() {
        let mut config = Config::default();
        config.server.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_scheme() {
        let mut config = Config::default();
        config.server.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_images_path() {
        let mut config = Config::default();
        config.server.images_path = "images".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.server.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_poll_interval() {
        let mut config = Config::default();
        config.client.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
server:
  base_url: "https://votes.example.com"
  images_path: "/static/images"
  timeout_seconds: 5
client:
  poll_interval_secs: 10
  session_file: /tmp/picvote-session.json
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.base_url, "https://votes.example.com");
        assert_eq!(config.server.images_path, "/static/images");
        assert_eq!(config.server.timeout_seconds, 5);
        assert_eq!(config.client.poll_interval_secs, 10);
        assert_eq!(
            config.client.session_file,
            Some(PathBuf::from("/tmp/picvote-session.json"))
        );
    }

    #[test]
    fn test_config_from_partial_yaml_uses_defaults() {
        let yaml = r#"
server:
  base_url: "http://gallery.local:8080"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.base_url, "http://gallery.local:8080");
        assert_eq!(config.server.images_path, "/images");
        assert_eq!(config.client.poll_interval_secs, 30);
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = cli_with_defaults();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:5000");
    }

    #[test]
    #[serial]
    fn test_cli_server_override() {
        let mut cli = cli_with_defaults();
        cli.server = Some("http://mock.test:9999".to_string());

        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.server.base_url, "http://mock.test:9999");
    }

    #[test]
    fn test_server_base_strips_trailing_slash() {
        let mut config = ServerConfig::default();
        config.base_url = "http://localhost:5000/".to_string();
        assert_eq!(config.base(), "http://localhost:5000");
    }

    #[test]
    fn test_example_config_parses() {
        // Ensure the example configuration file is valid YAML and maps to `Config`.
        let contents = std::fs::read_to_string("config/config.yaml")
            .expect("Failed to read example config/config.yaml");
        let config: Config =
            serde_yaml::from_str(&contents).expect("Failed to parse config/config.yaml");

        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.client.poll_interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        std::env::set_var("PICVOTE_SERVER_URL", "http://env.test:4000");
        std::env::set_var("PICVOTE_POLL_INTERVAL", "7");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.server.base_url, "http://env.test:4000");
        assert_eq!(config.client.poll_interval_secs, 7);

        std::env::remove_var("PICVOTE_SERVER_URL");
        std::env::remove_var("PICVOTE_POLL_INTERVAL");
    }

    #[test]
    #[serial]
    fn test_env_var_invalid_number_keeps_previous() {
        std::env::set_var("PICVOTE_POLL_INTERVAL", "not-a-number");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.client.poll_interval_secs, 30);

        std::env::remove_var("PICVOTE_POLL_INTERVAL");
    }

    #[test]
    #[serial]
    fn test_env_var_session_file() {
        std::env::set_var("PICVOTE_SESSION_FILE", "/tmp/picvote-env-session.json");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(
            config.client.session_file,
            Some(PathBuf::from("/tmp/picvote-env-session.json"))
        );

        std::env::remove_var("PICVOTE_SESSION_FILE");
    }
}

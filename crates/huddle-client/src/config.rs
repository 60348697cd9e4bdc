//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/huddle/config.toml` by default.
//!
//! ```toml
//! debug = false
//!
//! [api]
//! root = "https://cam.example.org"
//! timeout = 30
//! token = "env::HUDDLE_TOKEN"
//! ```
//!
//! The `token` value supports secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use huddle_api::HttpConfig;
use huddle_core::TracingConfig;

use crate::secret;

/// Configuration for the huddle client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Meeting API settings.
    pub api: ApiSettings,
}

/// Where and how to reach the meeting API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the platform, e.g. `https://cam.example.org`.
    pub root: Option<String>,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// User-Agent header sent with every request.
    pub user_agent: Option<String>,

    /// Bearer token, plain or as a secret reference.
    pub token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            root: None,
            timeout: 30,
            user_agent: None,
            token: None,
        }
    }
}

impl ApiSettings {
    /// Parses `root` into a URL.
    pub fn root_url(&self) -> Result<Url, String> {
        let root = self
            .root
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| "api.root is not set".to_string())?;
        let url = Url::parse(root).map_err(|e| format!("invalid api.root `{}`: {}", root, e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("api.root must be http or https, got `{}`", other)),
        }
    }

    /// Builds the transport configuration, resolving the token reference.
    pub fn to_http_config(&self) -> Result<HttpConfig, String> {
        if self.timeout == 0 {
            return Err("api.timeout must be greater than zero".to_string());
        }

        let mut config =
            HttpConfig::new(self.root_url()?).with_timeout(Duration::from_secs(self.timeout));
        if let Some(ref user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(ref token) = self.token {
            let resolved = secret::resolve(token).map_err(|e| format!("api.token: {}", e))?;
            config = config.with_token(resolved);
        }
        Ok(config)
    }
}

impl ClientConfig {
    /// Tracing settings; `--debug` or `debug = true` enables debug output.
    pub fn tracing(&self, cli_debug: bool) -> TracingConfig {
        TracingConfig::cli(cli_debug || self.debug)
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("huddle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(!config.debug);
        assert_eq!(config.api.timeout, 30);
        assert!(config.api.root.is_none());
    }

    #[test]
    fn parse_partial_file() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            root = "https://cam.example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.root.as_deref(), Some("https://cam.example.org"));
        assert_eq!(config.api.timeout, 30);
        assert!(!config.debug);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "debug = true\n[api]\nroot = \"http://localhost:8080\"\ntimeout = 5\nuser_agent = \"huddle-test\""
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.api.timeout, 5);
        assert_eq!(config.api.user_agent.as_deref(), Some("huddle-test"));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn load_from_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nroot = ").unwrap();
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }

    #[test]
    fn debug_from_file_or_flag() {
        let quiet = ClientConfig::default();
        assert_eq!(quiet.tracing(false).default_level, tracing::Level::WARN);
        assert_eq!(quiet.tracing(true).default_level, tracing::Level::DEBUG);

        let verbose: ClientConfig = toml::from_str("debug = true").unwrap();
        assert_eq!(verbose.tracing(false).default_level, tracing::Level::DEBUG);
    }

    #[test]
    fn default_path_ends_with_huddle() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("huddle/config.toml"));
    }

    #[test]
    fn http_config_requires_root() {
        let err = ApiSettings::default().to_http_config().unwrap_err();
        assert!(err.contains("api.root is not set"));
    }

    #[test]
    fn http_config_rejects_other_schemes() {
        let settings = ApiSettings {
            root: Some("ftp://cam.example.org".to_string()),
            ..ApiSettings::default()
        };
        assert!(settings.to_http_config().unwrap_err().contains("http or https"));
    }

    #[test]
    fn http_config_rejects_zero_timeout() {
        let settings = ApiSettings {
            root: Some("https://cam.example.org".to_string()),
            timeout: 0,
            ..ApiSettings::default()
        };
        assert!(settings.to_http_config().unwrap_err().contains("timeout"));
    }

    #[test]
    fn http_config_resolves_token_reference() {
        unsafe {
            std::env::set_var("_HUDDLE_TEST_CONFIG_TOKEN", "t0k3n");
        }
        let settings = ApiSettings {
            root: Some("https://cam.example.org".to_string()),
            token: Some("env::_HUDDLE_TEST_CONFIG_TOKEN".to_string()),
            ..ApiSettings::default()
        };
        assert!(settings.to_http_config().is_ok());
        unsafe {
            std::env::remove_var("_HUDDLE_TEST_CONFIG_TOKEN");
        }
    }

    #[test]
    fn http_config_reports_unresolved_token() {
        let settings = ApiSettings {
            root: Some("https://cam.example.org".to_string()),
            token: Some("env::_HUDDLE_SURELY_UNSET_12345".to_string()),
            ..ApiSettings::default()
        };
        assert!(settings.to_http_config().unwrap_err().starts_with("api.token"));
    }
}

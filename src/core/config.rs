//! Application configuration management
//!
//! Configuration is layered: built-in defaults, then an optional TOML file
//! (path taken from `CONFIG_PATH`, default `config.toml`), then environment
//! variables for the provider keys and endpoints. Empty API keys are valid
//! at startup; a missing key surfaces per call as a provider failure rather
//! than refusing to boot.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default chat-completions endpoint
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default generateContent endpoint
const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default server port
const DEFAULT_PORT: u16 = 8089;

/// Default history file path
const DEFAULT_HISTORY_PATH: &str = "history.json";

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

fn default_openai_api_url() -> String {
    DEFAULT_OPENAI_API_URL.to_string()
}

fn default_gemini_api_url() -> String {
    DEFAULT_GEMINI_API_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}

// Manual Default impls so an absent TOML section agrees with the serde
// field defaults.
impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_openai_api_url(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_gemini_api_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Flattened application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key; empty means not configured
    pub openai_api_key: String,

    /// Full chat-completions endpoint URL
    pub openai_api_url: String,

    /// Google API key; empty means not configured
    pub google_api_key: String,

    /// Full generateContent endpoint URL
    pub gemini_api_url: String,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Per-provider request timeout in seconds
    pub request_timeout: u64,

    /// History file path
    pub history_path: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. Absent keys
    /// and sections fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        Ok(Self::from_toml(config))
    }

    /// Load configuration from the config file and environment
    ///
    /// The file named by `CONFIG_PATH` (default `config.toml`) is optional;
    /// when absent, built-in defaults apply. Environment variables win over
    /// file values for the provider keys and endpoints.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::from_toml(TomlConfig::default())
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn from_toml(config: TomlConfig) -> Self {
        Config {
            openai_api_key: config.openai.api_key,
            openai_api_url: config.openai.api_url,
            google_api_key: config.gemini.api_key,
            gemini_api_url: config.gemini.api_url,
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            request_timeout: config.request.request_timeout,
            history_path: config.history.path,
        }
    }

    /// Overlay provider keys and endpoints from an environment lookup;
    /// empty values are treated as unset
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        let mut overlay = |name: &str, slot: &mut String| {
            if let Some(value) = get(name) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        };

        overlay("OPENAI_API_KEY", &mut self.openai_api_key);
        overlay("OPENAI_API_URL", &mut self.openai_api_url);
        overlay("GOOGLE_API_KEY", &mut self.google_api_key);
        overlay("GEMINI_API_URL", &mut self.gemini_api_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [openai]
            api_key = "sk-test123"
            api_url = "http://localhost:9001/v1/chat/completions"

            [gemini]
            api_key = "g-test456"

            [server]
            host = "127.0.0.1"
            port = 9090
            log_level = "debug"

            [request]
            request_timeout = 30

            [history]
            path = "/tmp/compare-history.json"
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.openai_api_key, "sk-test123");
        assert_eq!(
            config.openai_api_url,
            "http://localhost:9001/v1/chat/completions"
        );
        assert_eq!(config.google_api_key, "g-test456");
        assert_eq!(config.gemini_api_url, DEFAULT_GEMINI_API_URL);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout, 30);
        assert_eq!(
            config.history_path,
            PathBuf::from("/tmp/compare-history.json")
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.openai_api_key, "");
        assert_eq!(config.google_api_key, "");
        assert_eq!(config.openai_api_url, DEFAULT_OPENAI_API_URL);
        assert_eq!(config.gemini_api_url, DEFAULT_GEMINI_API_URL);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.history_path, PathBuf::from(DEFAULT_HISTORY_PATH));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let file = create_test_config();
        let mut config = Config::from_file(file.path()).unwrap();

        config.apply_overrides(|name| match name {
            "OPENAI_API_KEY" => Some("sk-from-env".to_string()),
            "GEMINI_API_URL" => Some("http://localhost:9002/generate".to_string()),
            _ => None,
        });

        assert_eq!(config.openai_api_key, "sk-from-env");
        assert_eq!(config.gemini_api_url, "http://localhost:9002/generate");
        // Untouched values keep their file-loaded settings.
        assert_eq!(config.google_api_key, "g-test456");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let file = create_test_config();
        let mut config = Config::from_file(file.path()).unwrap();

        config.apply_overrides(|name| match name {
            "OPENAI_API_KEY" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.openai_api_key, "sk-test123");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[openai\napi_key = ").unwrap();
        file.flush().unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }
}

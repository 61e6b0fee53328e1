use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";
pub const ENV_HOST: &str = "CUNEO_HOST";
pub const ENV_PORT: &str = "CUNEO_PORT";

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// openai_api_key = "sk-..."
/// environment = "production"
///
/// [server]
/// host = "0.0.0.0"
/// port = 8000
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Empty means chat requests will be rejected upstream; not checked at startup.
    pub openai_api_key: String,
    /// Free-form deployment label, e.g. "development" or "production".
    pub environment: String,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &if self.has_openai_api_key() { "<set>" } else { "<empty>" })
            .field("environment", &self.environment)
            .field("server", &self.server)
            .finish()
    }
}

impl Config {
    /// Load config from disk (if present) and apply process environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Override fields from environment variables, looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_OPENAI_API_KEY) {
            self.openai_api_key = key;
        }
        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            self.environment = environment;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
        }
        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("it", "cuneo", "cuneo-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn has_openai_api_key(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}

use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::signing::expiry::{DEFAULT_SKEW_MS, DEFAULT_WINDOW_MS};

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: Server,
    #[serde(default)]
    pub signing: SigningConfig,
    #[serde(default = "default_json_limit")]
    pub json_payload_limit: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub tls: Option<Tls>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Tls {
    pub cert_file: String,
    pub key_file: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SigningConfig {
    // how old a client-claimed timestamp may be
    pub window_ms: i64,
    // how far in the future it may be
    pub skew_ms: i64,
    pub sweep_interval_secs: u64,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            skew_ms: DEFAULT_SKEW_MS,
            sweep_interval_secs: 60,
        }
    }
}

fn default_json_limit() -> usize {
    4096
}

#[derive(Debug)]
pub enum ConfigError {
    Read(String),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Failed to load config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config file contents: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.signing.window_ms <= 0 {
            return Err(ConfigError::Invalid(
                "signing.window_ms must be positive".to_string(),
            ));
        }
        if self.signing.skew_ms < 0 {
            return Err(ConfigError::Invalid(
                "signing.skew_ms must not be negative".to_string(),
            ));
        }
        Ok(self)
    }
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
    parse_config(&config_contents)
}

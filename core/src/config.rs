use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow cross-origin GET requests from any origin
    pub enable_cors: bool,
    /// File receiving the plain-text log stream
    pub log_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            log_file: PathBuf::from("marketd.log"),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Catalog storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON catalog document
    pub data_file: PathBuf,
    /// Report a broken catalog document as a server error instead of an empty list
    pub strict_reads: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("plugins_data.json"),
            strict_reads: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Config file used when neither `--config` nor MARKET_CONFIG names one.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl Config {
    /// Load config from a TOML file, with environment variable overrides.
    ///
    /// An explicit path wins over MARKET_CONFIG, which wins over
    /// [`DEFAULT_CONFIG_PATH`]. A missing file means defaults.
    pub fn load(explicit_path: Option<&Path>) -> MarketResult<Self> {
        ConfigLoader::new(|key: &str| env::var(key).ok()).load(explicit_path)
    }
}

/// Resolves configuration from a file and environment variables.
struct ConfigLoader<F> {
    lookup: F,
}

impl<F> ConfigLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self { lookup }
    }

    fn load(&self, explicit_path: Option<&Path>) -> MarketResult<Config> {
        let cfg_path = self.resolve_config_path(explicit_path);

        let mut cfg = match fs::read_to_string(&cfg_path) {
            Ok(s) => Self::parse(&cfg_path, &s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e.into()),
        };

        self.apply_env_overrides(&mut cfg)?;
        Ok(cfg)
    }

    fn resolve_config_path(&self, explicit_path: Option<&Path>) -> PathBuf {
        match explicit_path {
            Some(p) => p.to_path_buf(),
            None => (self.lookup)("MARKET_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        }
    }

    fn parse(path: &Path, contents: &str) -> MarketResult<Config> {
        toml::from_str(contents)
            .map_err(|e| MarketError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply MARKET_* environment variable overrides.
    fn apply_env_overrides(&self, cfg: &mut Config) -> MarketResult<()> {
        if let Some(v) = (self.lookup)("MARKET_HOST") {
            cfg.server.host = v;
        }

        if let Some(v) = (self.lookup)("MARKET_PORT") {
            cfg.server.port = v
                .parse::<u16>()
                .map_err(|e| MarketError::Config(format!("invalid MARKET_PORT '{}': {}", v, e)))?;
        }

        if let Some(v) = (self.lookup)("MARKET_DATA_FILE") {
            cfg.storage.data_file = PathBuf::from(v);
        }

        if let Some(v) = (self.lookup)("MARKET_LOG_FILE") {
            cfg.server.log_file = PathBuf::from(v);
        }

        Ok(())
    }
}

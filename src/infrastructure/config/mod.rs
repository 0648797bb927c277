use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::app_config::AppConfig;
use crate::domain::error::Result;

pub const CONFIG_PATH_ENV: &str = "CHARTFEED_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chartfeed.toml";
pub const ENV_PREFIX: &str = "CHARTFEED_";

/// Layers defaults, the TOML file and `CHARTFEED_*` variables, in that order.
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Loads `.env` first, then resolves the config path from
    /// `CHARTFEED_CONFIG`.
    pub fn new() -> Self {
        let _ = dotenvy::dotenv();
        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::with_path(config_path)
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&self.config_path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment().extract()?;
        config.validate()?;
        debug!(path = %self.config_path.display(), source = ?config.source, "Loaded configuration");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::errors::AppError;

/// Playlist served when a request carries no usable configuration
pub const DEFAULT_PLAYLIST_URL: &str = "https://raw.githubusercontent.com/sidh3369/m3u_bot/main/1.m3u";

/// Prefix for environment overrides, e.g. `M3U_VOD__WEB__PORT=8080`
pub const ENV_PREFIX: &str = "M3U_VOD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub playlist: PlaylistConfig,
    pub addon: AddonConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    pub default_url: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

/// Static addon identity published in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonConfig {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub catalog_id: String,
    pub catalog_name: String,
    pub poster: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                base_url: "http://localhost:3000".to_string(),
            },
            playlist: PlaylistConfig {
                default_url: DEFAULT_PLAYLIST_URL.to_string(),
                fetch_timeout_secs: 10,
                user_agent: format!("m3u-vod-addon/{}", env!("CARGO_PKG_VERSION")),
            },
            addon: AddonConfig {
                id: "org.vodplaylist.sid".to_string(),
                version: "1.1.0".to_string(),
                name: "SID VOD Playlist".to_string(),
                description: "Personal M3U VOD Addon. Click configure to add your link."
                    .to_string(),
                catalog_id: "vod-playlist".to_string(),
                catalog_name: "My M3U Playlist".to_string(),
                poster: "https://dl.strem.io/addon-logo.png".to_string(),
            },
        }
    }
}

impl PlaylistConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    /// Load defaults, then the TOML file, then `M3U_VOD__*` environment variables.
    ///
    /// A missing file is created with the default values.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if !Path::new(config_file).exists() {
            let contents = toml::to_string_pretty(&Self::default())?;
            std::fs::write(config_file, contents)
                .with_context(|| format!("Failed to write default config to {config_file}"))?;
            info!("Created default config file: {}", config_file);
        }

        let layered = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::new(config_file, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config from {config_file}"))?;

        let config: Self = layered.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.playlist.fetch_timeout_secs == 0 {
            return Err(AppError::configuration(
                "playlist.fetch_timeout_secs must be greater than zero",
            ));
        }
        if self.playlist.default_url.trim().is_empty() {
            return Err(AppError::configuration("playlist.default_url must not be empty"));
        }
        Ok(())
    }
}

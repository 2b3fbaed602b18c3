use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::providers::wolf::WOLF_PICTURES;

/// Environment variable that overrides `[telegram] bot_token`.
pub const TOKEN_ENV_VAR: &str = "DPB_TG_TOKEN";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub triggers: TriggersConfig,
    #[serde(default)]
    pub replies: RepliesConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_dog_api_base_url")]
    pub dog_api_base_url: String,
    #[serde(default = "default_fox_api_url")]
    pub fox_api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub wolf: WolfSourceConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            dog_api_base_url: default_dog_api_base_url(),
            fox_api_url: default_fox_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            wolf: WolfSourceConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum WolfSourceConfig {
    Static {
        #[serde(default = "default_wolf_pictures")]
        pictures: Vec<String>,
    },
    Live {
        url: String,
        #[serde(default = "default_image_field")]
        image_field: String,
    },
}

impl Default for WolfSourceConfig {
    fn default() -> Self {
        WolfSourceConfig::Static {
            pictures: default_wolf_pictures(),
        }
    }
}

/// Extra triggers appended to the built-in ones, per category.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TriggersConfig {
    #[serde(default)]
    pub dog: Vec<String>,
    #[serde(default)]
    pub fox: Vec<String>,
    #[serde(default)]
    pub wolf: Vec<String>,
    #[serde(default)]
    pub sad: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RepliesConfig {
    /// Sent when a picture can't be fetched. Failures are dropped silently if unset.
    #[serde(default)]
    pub fallback_text: Option<String>,
}

fn default_dog_api_base_url() -> String {
    "https://dog.ceo/api".to_string()
}

fn default_fox_api_url() -> String {
    "https://randomfox.ca/floof/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_wolf_pictures() -> Vec<String> {
    WOLF_PICTURES.iter().map(|s| s.to_string()).collect()
}

fn default_image_field() -> String {
    "image".to_string()
}

impl Config {
    /// Load the config file if present, then apply the token override from
    /// the environment. Fails when no token is available.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.with_token_override(std::env::var(TOKEN_ENV_VAR).ok())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A non-empty override replaces the configured token.
    pub fn with_token_override(mut self, token: Option<String>) -> Result<Self> {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.telegram.bot_token = token;
        }

        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!(
                "FATAL: No token was found. \
                 You might need to specify one or more environment variables."
            );
        }

        Ok(self)
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::app::Variant;

pub const CLASSIC_ENDPOINT: &str = "http://localhost:5000/chat";
pub const ENHANCED_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

/// Settings persisted in `<config_dir>/faq-chat/config.json`.
///
/// Every field is optional; anything left unset falls back to the default for
/// the selected variant. The same struct carries CLI overrides, see `merged`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Layer `overrides` on top of `self`. Fields set in `overrides` win.
    pub fn merged(self, overrides: Config) -> Config {
        Config {
            endpoint: overrides.endpoint.or(self.endpoint),
            variant: overrides.variant.or(self.variant),
            dark_mode: overrides.dark_mode.or(self.dark_mode),
            request_timeout_secs: overrides.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant.unwrap_or_default()
    }

    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint(self.variant()).to_string())
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.unwrap_or(false)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("faq-chat").join("config.json"))
    }
}

/// The backend each variant talks to when no endpoint is configured
pub fn default_endpoint(variant: Variant) -> &'static str {
    match variant {
        Variant::Classic => CLASSIC_ENDPOINT,
        Variant::Enhanced => ENHANCED_ENDPOINT,
    }
}

//! Configuration file support for Fitamin.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitamin/config.toml`.

use crate::recommend::GoalThresholds;
use crate::{DailyTargets, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub recommendation: GoalThresholds,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Backend API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Default daily nutrition targets, used when the profile has none
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_calories")]
    pub calories: f64,

    #[serde(default = "default_protein_g")]
    pub protein_g: f64,

    #[serde(default = "default_carbs_g")]
    pub carbs_g: f64,

    #[serde(default = "default_fat_g")]
    pub fat_g: f64,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            calories: default_calories(),
            protein_g: default_protein_g(),
            carbs_g: default_carbs_g(),
            fat_g: default_fat_g(),
        }
    }
}

impl TargetsConfig {
    pub fn daily_targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fitamin")
}

fn default_base_url() -> String {
    "http://localhost:5000/api".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_calories() -> f64 {
    2000.0
}

fn default_protein_g() -> f64 {
    150.0
}

fn default_carbs_g() -> f64 {
    250.0
}

fn default_fat_g() -> f64 {
    67.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values that would make downstream computations meaningless
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be at least 1".into()));
        }
        let targets = [
            ("calories", self.targets.calories),
            ("protein_g", self.targets.protein_g),
            ("carbs_g", self.targets.carbs_g),
            ("fat_g", self.targets.fat_g),
        ];
        for (name, value) in targets {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "targets.{} must be a non-negative number",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fitamin").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

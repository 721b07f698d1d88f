use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::progress::DEFAULT_EXPECTED_DURATION;
use crate::variant::Variant;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_STORE_FILE: &str = "cookbook-storage.json";

/// What a zero real-progress report does after real progress has taken over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPolicy {
    /// Real mode lasts for the rest of the operation
    #[default]
    Sticky,
    /// Drop back to the simulated curve, starting again from zero
    Restart,
}

/// Options recognized by the loading screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub variant: Variant,
    /// Expected duration in seconds, sets the curve's pace
    pub expected_duration: f64,
    /// Initial real progress, 0-100
    pub progress: Option<f64>,
    /// Replaces the step label when set
    pub current_message: Option<String>,
    /// Replaces the fun-fact pool when non-empty
    pub messages: Option<Vec<String>>,
    pub current_operation: Option<String>,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Default,
            expected_duration: DEFAULT_EXPECTED_DURATION,
            progress: None,
            current_message: None,
            messages: None,
            current_operation: None,
        }
    }
}

impl LoadingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.expected_duration.is_finite() && self.expected_duration > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "expected_duration must be a positive number of seconds, got {}",
                self.expected_duration
            )));
        }
        if let Some(p) = self.progress {
            if !(0.0..=100.0).contains(&p) {
                return Err(Error::InvalidConfig(format!("progress must be within 0-100, got {}", p)));
            }
        }
        Ok(())
    }
}

/// Application configuration, usually read from `cookbook-buddy.toml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the generation service
    pub endpoint: String,
    pub store_path: PathBuf,
    pub reset_policy: ResetPolicy,
    pub loading: LoadingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            reset_policy: ResetPolicy::default(),
            loading: LoadingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("endpoint must not be empty".into()));
        }
        self.loading.validate()
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::planner::{ExhaustionPolicy, DEFAULT_PLAN_DAYS};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "planner.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub exhaustion_policy: ExhaustionPolicy,
    /// Days covered by the overlap optimizer.
    pub days: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            exhaustion_policy: ExhaustionPolicy::default(),
            days: DEFAULT_PLAN_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Product search URL. Prices come from the static table when unset.
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
    pub default_postal_code: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 2500,
            default_postal_code: "V5K0A1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Settings read from `planner.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub planner: PlannerSettings,
    pub pricing: PricingConfig,
    pub server: ServerConfig,
}

impl PlannerConfig {
    /// Load from `path`, else `planner.toml` if present, else defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.planner.days == 0 {
            return Err(PlannerError::InvalidArgument(
                "planner.days must be at least 1".to_string(),
            ));
        }
        if self.pricing.timeout_ms == 0 {
            return Err(PlannerError::InvalidArgument(
                "pricing.timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/furrow/config/furrow.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::AspectScores;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/furrow.toml");

/// Upper bound on `[output] decimals`
pub const MAX_DECIMALS: u32 = 10;

/// Tolerance when checking that weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight of each aspect in the total score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub sustainability: f64,
    pub weather: f64,
    pub market: f64,
    pub farmer: f64,
}

impl Weights {
    pub const DEFAULT: Weights = Weights {
        sustainability: 0.5,
        weather: 0.25,
        market: 0.15,
        farmer: 0.10,
    };

    pub fn total(&self) -> f64 {
        self.sustainability + self.weather + self.market + self.farmer
    }

    /// Weights must be non-negative and sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("sustainability", self.sustainability),
            ("weather", self.weather),
            ("market", self.market),
            ("farmer", self.farmer),
        ];
        for (name, w) in all {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::Config(format!(
                    "Weight '{}' must be a non-negative number, got {}",
                    name, w
                )));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "Weights must sum to 1.0, got {:.4}",
                total
            )));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    pub weights: Weights,
    /// Scores substituted when an advisor has nothing to say
    pub defaults: AspectScores,
    /// Aspect scores strictly above this get favourable wording
    pub rationale_threshold: f64,
    /// Decimal places kept in the total score
    pub decimals: u32,
    /// Candidates returned per request
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: Weights::DEFAULT,
            defaults: AspectScores::new(1.0, 0.0, 0.5, 0.5),
            rationale_threshold: 0.7,
            decimals: 2,
            top_n: 3,
        }
    }
}

impl EngineConfig {
    /// Load configuration (explicit path, then override dir, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match resolve_override(path, default_config_path()) {
            Some(p) => fs::read_to_string(&p).map_err(|e| {
                Error::Config(format!("Failed to read config {}: {}", p.display(), e))
            })?,
            None => DEFAULT_CONFIG.to_string(),
        };
        Self::from_toml(&content)
    }

    /// The embedded configuration
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = EngineConfig::default();

        if let Some(w) = raw.weights {
            if let Some(v) = w.sustainability {
                config.weights.sustainability = v;
            }
            if let Some(v) = w.weather {
                config.weights.weather = v;
            }
            if let Some(v) = w.market {
                config.weights.market = v;
            }
            if let Some(v) = w.farmer {
                config.weights.farmer = v;
            }
        }

        if let Some(d) = raw.defaults {
            if let Some(v) = d.farmer {
                config.defaults.farmer = v;
            }
            if let Some(v) = d.market {
                config.defaults.market = v;
            }
            if let Some(v) = d.weather {
                config.defaults.weather = v;
            }
            if let Some(v) = d.sustainability {
                config.defaults.sustainability = v;
            }
        }

        if let Some(r) = raw.rationale {
            if let Some(t) = r.threshold {
                config.rationale_threshold = t;
            }
        }

        if let Some(o) = raw.output {
            if let Some(d) = o.decimals {
                config.decimals = d;
            }
            if let Some(n) = o.top_n {
                config.top_n = n;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        let d = &self.defaults;
        for (name, v) in [
            ("farmer", d.farmer),
            ("market", d.market),
            ("weather", d.weather),
            ("sustainability", d.sustainability),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!(
                    "Default score '{}' must be within [0,1], got {}",
                    name, v
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.rationale_threshold) {
            return Err(Error::Config(format!(
                "Rationale threshold must be within [0,1], got {}",
                self.rationale_threshold
            )));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(Error::Config(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be at least 1".into()));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("furrow.toml"))
}

/// Directory holding user overrides
pub fn config_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("furrow").join("config"))
}

/// Pick the file to read: an explicit path always wins (reading it fails if
/// it is missing), then the default override location if it exists. `None`
/// means use the embedded content.
pub(crate) fn resolve_override(
    explicit: Option<&Path>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default.filter(|p| p.exists()),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    weights: Option<RawWeights>,
    defaults: Option<RawDefaults>,
    rationale: Option<RawRationale>,
    output: Option<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawWeights {
    sustainability: Option<f64>,
    weather: Option<f64>,
    market: Option<f64>,
    farmer: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    farmer: Option<f64>,
    market: Option<f64>,
    weather: Option<f64>,
    sustainability: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRationale {
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    decimals: Option<u32>,
    top_n: Option<usize>,
}

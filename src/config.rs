//! Simulation Configuration
//!
//! Seed, sample sizes, the treatment contrast to estimate and the toy model
//! coefficients, with JSON persistence.
use crate::errors::CausalError;
use crate::toy::ToyParams;
use crate::utils::{validate_finite_parameter, validate_sample_count};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_seed() -> u64 {
    7
}
fn default_observational_samples() -> usize {
    5000
}
fn default_ate_samples() -> usize {
    100_000
}
fn default_x0() -> f64 {
    0.0
}
fn default_x1() -> f64 {
    1.0
}

/// Treatment contrast to estimate by Monte Carlo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AteQuery {
    /// Number of simulated units.
    #[serde(default = "default_ate_samples")]
    pub n: usize,
    /// Baseline treatment level.
    #[serde(default = "default_x0")]
    pub x0: f64,
    /// Contrast treatment level.
    #[serde(default = "default_x1")]
    pub x1: f64,
}

impl Default for AteQuery {
    fn default() -> Self {
        AteQuery {
            n: default_ate_samples(),
            x0: default_x0(),
            x1: default_x1(),
        }
    }
}

impl AteQuery {
    pub fn validate(&self) -> Result<(), CausalError> {
        validate_sample_count(self.n, "n")?;
        validate_finite_parameter(self.x0, "x0")?;
        validate_finite_parameter(self.x1, "x1")
    }
}

/// Configuration for a `Simulation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for random number generation.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Size of the observational sample used for the naive estimate.
    #[serde(default = "default_observational_samples")]
    pub observational_samples: usize,
    /// Interventional contrast.
    #[serde(default)]
    pub ate: AteQuery,
    /// Fail on NaN or infinite values instead of passing them through.
    #[serde(default)]
    pub check_finite: bool,
    /// Coefficients of the toy model.
    #[serde(default)]
    pub toy: ToyParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: default_seed(),
            observational_samples: default_observational_samples(),
            ate: AteQuery::default(),
            check_finite: false,
            toy: ToyParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CausalError> {
        validate_sample_count(self.observational_samples, "observational_samples")?;
        self.ate.validate()?;
        self.toy.validate()
    }
}

/// JSON persistence for configuration types.
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Write the configuration to `path` as JSON.
    ///
    /// * `path` - Path to save configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), CausalError> {
        fs::write(path, self.json_dump()?).map_err(|e| CausalError::UnableToWrite(e.to_string()))
    }

    /// Serialize a configuration to a JSON string.
    fn json_dump(&self) -> Result<String, CausalError> {
        serde_json::to_string(self).map_err(|e| CausalError::UnableToWrite(e.to_string()))
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// * `json_str` - JSON text of the configuration.
    fn from_json(json_str: &str) -> Result<Self, CausalError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| CausalError::UnableToRead(e.to_string()))
    }

    /// Read a JSON configuration from `path`.
    ///
    /// * `path` - Path to load configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, CausalError> {
        let json_str = fs::read_to_string(path).map_err(|e| CausalError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for SimulationConfig {}

//! Sequence configuration loaded from TOML.
//!
//! ```toml
//! process = "q-noise"
//! tau = 1.0
//! q = 1.5
//! n = 1000
//! h = 0.01
//! seed = 42
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::source::NormalSource;
use crate::stepper::QNoiseGenerator;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_tau() -> f64 {
    1.0
}
const fn default_q() -> f64 {
    1.0
}
const fn default_n() -> usize {
    1000
}
const fn default_h() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// SequenceConfig
// ---------------------------------------------------------------------------

/// Which bulk driver a [`SequenceConfig`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Process {
    /// [`QNoiseGenerator::generate_sequence`].
    #[default]
    QNoise,
    /// [`QNoiseGenerator::generate_ornstein_uhlenbeck_sequence`].
    OrnsteinUhlenbeck,
}

/// Parameters of one bulk generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    #[serde(default)]
    pub process: Process,

    /// Autocorrelation time (default: 1.0). Sign is ignored; zero means `h`.
    #[serde(default = "default_tau")]
    pub tau: f64,

    /// Shape parameter (default: 1.0, Gaussian). Unused by the OU process.
    #[serde(default = "default_q")]
    pub q: f64,

    /// Number of recorded values (default: 1000).
    #[serde(default = "default_n")]
    pub n: usize,

    /// Integration step (default: 0.01).
    #[serde(default = "default_h")]
    pub h: f64,

    /// Discarded steps. Absent means `floor(2*tau/h)`.
    #[serde(default)]
    pub transient: Option<usize>,

    /// Rescale `tau` to `tau (5 - 3q) / 2`, keeping the statistics
    /// approximately independent of `q`. The exact variance is
    /// `2/(tau (5 - 3q)^2)`.
    #[serde(default)]
    pub normalized: bool,

    /// OU only: return independent N(0,1) draws.
    #[serde(default)]
    pub white_noise: bool,

    /// Seed for [`build_generator`](Self::build_generator). Absent means clock-derived.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            process: Process::default(),
            tau: default_tau(),
            q: default_q(),
            n: default_n(),
            h: default_h(),
            transient: None,
            normalized: false,
            white_noise: false,
            seed: None,
        }
    }
}

impl SequenceConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.h.is_finite() || self.h <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "h",
                message: format!("must be finite and > 0, got {}", self.h),
            });
        }
        if !self.tau.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "tau",
                message: format!("must be finite, got {}", self.tau),
            });
        }
        if self.process == Process::QNoise {
            if !self.q.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: "q",
                    message: format!("must be finite, got {}", self.q),
                });
            }
            if self.normalized && self.q >= 5.0 / 3.0 {
                return Err(ConfigError::InvalidValue {
                    field: "q",
                    message: format!("must be < 5/3 when normalized, got {}", self.q),
                });
            }
        }
        Ok(())
    }

    /// Generator seeded from `seed`, or from the clock when absent.
    pub fn build_generator(&self) -> QNoiseGenerator {
        match self.seed {
            Some(seed) => QNoiseGenerator::with_seed(seed),
            None => QNoiseGenerator::new(),
        }
    }

    /// Runs the configured driver on `generator`.
    pub fn generate_with<S: NormalSource>(&self, generator: &mut QNoiseGenerator<S>) -> Vec<f64> {
        debug!(process = ?self.process, "running configured sequence");
        match self.process {
            Process::QNoise => generator.generate_sequence(
                self.tau,
                self.q,
                self.n,
                self.h,
                self.transient,
                self.normalized,
            ),
            Process::OrnsteinUhlenbeck => generator.generate_ornstein_uhlenbeck_sequence(
                self.tau,
                self.n,
                self.h,
                self.transient,
                self.white_noise,
            ),
        }
    }

    /// Validates, builds a generator, and runs the configured driver.
    pub fn generate(&self) -> Result<Vec<f64>, ConfigError> {
        self.validate()?;
        Ok(self.generate_with(&mut self.build_generator()))
    }
}

// ============================================================================
// Tests
// ============================================================================

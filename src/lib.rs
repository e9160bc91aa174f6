//! # qnoise
//!
//! Time-correlated noise with tunable statistics.
//!
//! q-noise is the solution of the Langevin equation
//! `dη = -V'(η) dt + (1/τ) dW` with a drift chosen so the stationary
//! distribution is a q-Gaussian: bounded for `q < 1`, Gaussian at `q = 1`
//! (the Ornstein-Uhlenbeck limit) and heavy-tailed for `q > 1`. `τ` sets the
//! autocorrelation time.
//!
//! ## Modules
//!
//! - [`stepper`]: single Heun and Ornstein-Uhlenbeck steps
//! - [`sequence`]: bulk generation and the lazy [`Trajectory`] iterator
//! - [`density`]: theoretical stationary density and histogram comparison
//! - [`stats`]: descriptive statistics for validating generated sequences
//! - [`source`]: the [`NormalSource`] capability and seeded RNG
//! - [`config`]: TOML sequence configuration
//! - [`default`]: opt-in process-wide generator
//!
//! ## Quick start
//!
//! ```
//! use qnoise::QNoiseGenerator;
//!
//! let mut gen = QNoiseGenerator::with_seed(42);
//! let noise = gen.generate_sequence(1.0, 1.5, 1000, 0.01, None, false);
//! assert_eq!(noise.len(), 1000);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Never fails**: the integrator retries and falls back instead of
//!   returning errors or non-finite values
//! - **Reproducible**: identical seeds and call order give identical output
//! - **Property-based testing**: boundedness and finiteness verified via proptest

pub mod config;
pub mod default;
pub mod density;
pub mod error;
pub mod sequence;
pub mod source;
pub mod stats;
pub mod stepper;

pub use sequence::{StepKind, Trajectory};
pub use source::NormalSource;
pub use stepper::QNoiseGenerator;

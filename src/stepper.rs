//! Single-step integrators for colored noise.
//!
//! [`QNoiseGenerator`] owns one [`NormalSource`] and nothing else. The
//! trajectory value `eta` always travels through the arguments, so one
//! generator can serve several trajectories as long as each keeps its own
//! `eta` and the calls are ordered.
//!
//! # Model
//!
//! q-noise is the stationary solution of the Langevin equation
//!
//! ```text
//! dη = −V′(η) dt + (1/τ) dW,    V′(η) = η / (τ (1 + τ (q−1) η²))
//! ```
//!
//! integrated with Heun's predictor-corrector scheme. At `q = 1` the drift
//! is linear and the process is Ornstein-Uhlenbeck with variance `1/(2τ)`.
//! For `q < 1` the potential confines `η` to `|η| < 1/√(τ(1−q))`.
//!
//! # Retry policy
//!
//! A Heun candidate that leaves the cutoff or is not finite is rejected.
//! The first 10 rejections simply redraw; the next 10 first pull `η` back
//! through an Ornstein-Uhlenbeck step scaled by the cutoff; the 21st
//! rejection returns a jittered value just inside the cutoff. When the
//! cutoff is not finite (`q >= 1`) the recovery step is left unscaled and
//! the fallback is one more Ornstein-Uhlenbeck step, so a finite `η` always
//! yields a finite result. No step ever performs more than 21 Heun attempts.

use rand::rngs::SmallRng;
use tracing::{debug, trace};

use crate::source::{clock_seed, create_rng, NormalSource};

/// Rejections answered by a plain redraw before recovery starts.
const PLAIN_RETRIES: u32 = 10;

/// Total rejections tolerated before the clamped fallback.
const MAX_RETRIES: u32 = 20;

/// Generator of Gaussian, Ornstein-Uhlenbeck and q-noise steps.
///
/// # Examples
/// ```
/// use qnoise::QNoiseGenerator;
///
/// let mut gen = QNoiseGenerator::with_seed(42);
/// let mut eta = gen.gauss_white_noise() / 100.0;
/// for _ in 0..1_000 {
///     eta = gen.q_noise_step(eta, 1.0, 0.5, 0.01, None);
///     assert!(eta.abs() <= 2.0_f64.sqrt());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QNoiseGenerator<S = SmallRng> {
    source: S,
}

impl QNoiseGenerator<SmallRng> {
    /// Creates a generator seeded from the wall clock.
    ///
    /// The chosen seed is logged at `debug` level so a run can be replayed
    /// with [`with_seed`](Self::with_seed).
    pub fn new() -> Self {
        let seed = clock_seed();
        debug!(seed, "seeding q-noise generator from the system clock");
        Self::with_seed(seed)
    }

    /// Creates a generator with an explicit seed. Equal seeds replay
    /// bit-identical output for identical call sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_source(create_rng(seed))
    }
}

impl Default for QNoiseGenerator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NormalSource> QNoiseGenerator<S> {
    /// Wraps an arbitrary source of normal and uniform draws.
    pub fn from_source(source: S) -> Self {
        Self { source }
    }

    /// Borrows the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the generator and returns its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// One draw of Gaussian white noise, N(0, 1).
    pub fn gauss_white_noise(&mut self) -> f64 {
        self.source.next_standard_normal()
    }

    /// Exact discrete update of the Ornstein-Uhlenbeck process with
    /// autocorrelation time `tau` over a step `h`.
    ///
    /// ```text
    /// η′ = η e^(−h/τ) + √((1 − e^(−2h/τ)) / (2τ)) · N(0,1)
    /// ```
    ///
    /// Consumes exactly one normal draw. Parameters are not validated.
    pub fn ornstein_uhlenbeck_step(&mut self, eta: f64, tau: f64, h: f64) -> f64 {
        let decay = (-h / tau).exp();
        let spread = ((1.0 - (-2.0 * h / tau).exp()) / (2.0 * tau)).sqrt();
        eta * decay + spread * self.source.next_standard_normal()
    }

    /// Advances a q-noise trajectory by one Heun step.
    ///
    /// `sqrt_h` may carry a precomputed `√h`; `None` (or a negative value)
    /// computes it from `h`.
    ///
    /// For `q < 1` the result satisfies `|η′| ≤ 1/√(τ(1−q))`. For `q ≥ 1`
    /// the same cutoff formula is evaluated but yields an infinite or NaN
    /// bound, so only non-finite candidates are rejected, recovery uses the
    /// plain Ornstein-Uhlenbeck step, and the fallback is one more such step
    /// instead of a clamped value.
    ///
    /// The call always terminates and never validates its parameters.
    pub fn q_noise_step(&mut self, eta: f64, tau: f64, q: f64, h: f64, sqrt_h: Option<f64>) -> f64 {
        let sqrt_h = resolve_sqrt_h(h, sqrt_h);
        let eta_cut = cutoff(tau, q);
        let bounded = eta_cut.is_finite();

        let mut eta = eta;
        let mut rejections = 0_u32;
        loop {
            let drift = potential_derivative(eta, tau, q);
            let k_heun = h * drift;
            let l_heun = sqrt_h * self.source.next_standard_normal() / tau;
            let differential =
                -h / 2.0 * (drift + potential_derivative(eta + k_heun + l_heun, tau, q)) + l_heun;
            let candidate = eta + differential;

            if candidate.is_finite() && !exceeds(candidate, eta_cut) {
                return candidate;
            }

            rejections += 1;
            if rejections > MAX_RETRIES {
                // Without a finite cutoff there is nothing to clamp to.
                let fallback = if bounded {
                    let jitter = 0.9 + 0.1 * self.source.next_uniform01();
                    sign(eta) * eta_cut * jitter
                } else {
                    self.ornstein_uhlenbeck_step(eta, tau, h)
                };
                debug!(eta, tau, q, h, fallback, "q-noise retry budget exhausted");
                return fallback;
            }
            if rejections > PLAIN_RETRIES {
                if rejections == PLAIN_RETRIES + 1 {
                    trace!(eta, tau, q, h, "q-noise step pulling trajectory back");
                }
                let pulled = self.ornstein_uhlenbeck_step(eta, tau, h);
                eta = if bounded { eta_cut * pulled } else { pulled };
            }
        }
    }

    /// q-noise step with `tau` rescaled to `tau (5 − 3q) / 2`, which keeps
    /// the statistics approximately independent of `q`. The stationary
    /// variance becomes `2/(τ(5−3q)²)`.
    ///
    /// Ill-conditioned as `q` approaches `5/3`, where the rescaled `tau`
    /// vanishes.
    pub fn q_noise_normalized_step(
        &mut self,
        eta: f64,
        tau: f64,
        q: f64,
        h: f64,
        sqrt_h: Option<f64>,
    ) -> f64 {
        self.q_noise_step(eta, normalized_tau(tau, q), q, h, sqrt_h)
    }
}

/// Gradient of the q-dependent potential.
fn potential_derivative(eta: f64, tau: f64, q: f64) -> f64 {
    (eta / (1.0 + eta * eta * tau * (q - 1.0))) / tau
}

/// `1/√(τ(1−q))`: finite for `q < 1`, infinite at `q = 1`, NaN above.
pub(crate) fn cutoff(tau: f64, q: f64) -> f64 {
    1.0 / (tau * (1.0 - q)).sqrt()
}

/// Correlation time used by the normalized step.
pub(crate) fn normalized_tau(tau: f64, q: f64) -> f64 {
    tau * (5.0 - 3.0 * q) / 2.0
}

pub(crate) fn resolve_sqrt_h(h: f64, sqrt_h: Option<f64>) -> f64 {
    sqrt_h.filter(|s| *s >= 0.0).unwrap_or_else(|| h.sqrt())
}

// A NaN cutoff never rejects.
fn exceeds(value: f64, eta_cut: f64) -> bool {
    value.abs() > eta_cut
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Theoretical stationary density of q-noise.
//!
//! The q-noise Langevin equation relaxes to a q-Gaussian with `β = τ`:
//!
//! ```text
//! p(x) = √τ / C_q · [1 − (1−q) τ x²]₊^(1/(1−q))      (q ≠ 1)
//! p(x) = √τ / √π  · exp(−τ x²)                        (q = 1)
//! ```
//!
//! | Regime | Support | Variance |
//! |---|---|---|
//! | q < 1 | `|x| < 1/√(τ(1−q))` | `1/(τ(5−3q))` |
//! | q = 1 | ℝ | `1/(2τ)` |
//! | 1 < q < 5/3 | ℝ | `1/(τ(5−3q))` |
//! | 5/3 ≤ q < 3 | ℝ | infinite |
//!
//! The density is what a long trajectory should histogram to, and
//! [`histogram_distance`] measures how far a generated sample is from it.
//!
//! Reference: Tsallis (2009), *Introduction to Nonextensive Statistical
//! Mechanics*, §4.1 (q-Gaussian normalisation).

use std::f64::consts::PI;

use crate::error::DensityError;
use crate::stats;
use crate::stepper::{cutoff, normalized_tau};

/// Stationary q-Gaussian density for correlation time `tau` and shape `q`.
///
/// # Examples
/// ```
/// use qnoise::density::StationaryDensity;
///
/// let gauss = StationaryDensity::new(0.5, 1.0).unwrap();
/// // τ = 0.5 gives the standard normal.
/// assert!((gauss.pdf(0.0) - 0.3989422804014327).abs() < 1e-12);
/// assert_eq!(gauss.variance(), Some(1.0));
///
/// let bounded = StationaryDensity::new(1.0, 0.5).unwrap();
/// assert_eq!(bounded.pdf(2.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryDensity {
    tau: f64,
    q: f64,
    ln_norm: f64,
}

impl StationaryDensity {
    /// Density reached by the plain q-noise step.
    ///
    /// # Errors
    /// [`DensityError::InvalidTau`] unless `tau` is finite and positive;
    /// [`DensityError::InvalidQ`] unless `q` is finite and below 3.
    pub fn new(tau: f64, q: f64) -> Result<Self, DensityError> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(DensityError::InvalidTau(tau));
        }
        if !q.is_finite() || q >= 3.0 {
            return Err(DensityError::InvalidQ(q));
        }
        let ln_norm = 0.5 * tau.ln() - ln_c_q(q);
        Ok(Self { tau, q, ln_norm })
    }

    /// Density reached by the normalized step, i.e. with `tau` rescaled to
    /// `tau (5 − 3q) / 2`.
    ///
    /// # Errors
    /// As [`new`](Self::new), applied to the rescaled `tau`; `q ≥ 5/3`
    /// therefore reports [`DensityError::InvalidTau`].
    pub fn normalized(tau: f64, q: f64) -> Result<Self, DensityError> {
        if !q.is_finite() {
            return Err(DensityError::InvalidQ(q));
        }
        Self::new(normalized_tau(tau, q), q)
    }

    /// Correlation time the density was built from (already rescaled for
    /// [`normalized`](Self::normalized)).
    pub fn effective_tau(&self) -> f64 {
        self.tau
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Edge of the support, `Some` only for bounded noise (`q < 1`).
    pub fn cutoff(&self) -> Option<f64> {
        (self.q < 1.0).then(|| cutoff(self.tau, self.q))
    }

    /// Stationary variance `1/(τ(5−3q))`, `None` once it diverges at
    /// `q ≥ 5/3`.
    pub fn variance(&self) -> Option<f64> {
        (self.q < 5.0 / 3.0).then(|| 1.0 / (self.tau * (5.0 - 3.0 * self.q)))
    }

    /// Probability density at `x`. Zero outside the support.
    pub fn pdf(&self, x: f64) -> f64 {
        let arg = -self.tau * x * x;
        if self.q == 1.0 {
            return (self.ln_norm + arg).exp();
        }
        let base = 1.0 + (1.0 - self.q) * arg;
        if base <= 0.0 {
            return 0.0;
        }
        (self.ln_norm + base.ln() / (1.0 - self.q)).exp()
    }
}

/// Distance between the histogram of `data` and `density`, in percent.
///
/// Mean absolute difference between the empirical bin densities and the
/// theoretical density at the bin centres, divided by the spread of the
/// empirical bin heights. Samples that match their density typically score
/// well under 10.
///
/// # Returns
/// - `None` if `data` cannot be binned (see [`stats::histogram`]) or all
///   bins have the same height.
///
/// # Examples
/// ```
/// use qnoise::density::{histogram_distance, StationaryDensity};
/// use qnoise::QNoiseGenerator;
///
/// let mut gen = QNoiseGenerator::with_seed(1);
/// let white: Vec<f64> = (0..50_000).map(|_| gen.gauss_white_noise()).collect();
/// let normal = StationaryDensity::new(0.5, 1.0).unwrap();
/// assert!(histogram_distance(&white, &normal, 50).unwrap() < 10.0);
/// ```
pub fn histogram_distance(data: &[f64], density: &StationaryDensity, bins: usize) -> Option<f64> {
    let hist = stats::histogram(data, bins)?;
    let heights = hist.densities();
    let lo = heights.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return None;
    }
    let total: f64 = heights
        .iter()
        .enumerate()
        .map(|(i, &h)| (h - density.pdf(hist.center(i))).abs())
        .sum();
    Some(total / heights.len() as f64 / (hi - lo) * 100.0)
}

/// `ln C_q`, the log normaliser of the unit-β q-Gaussian.
fn ln_c_q(q: f64) -> f64 {
    let ln_sqrt_pi = 0.5 * PI.ln();
    if q == 1.0 {
        ln_sqrt_pi
    } else if q < 1.0 {
        let s = 1.0 - q;
        2.0_f64.ln() + ln_sqrt_pi + ln_gamma(1.0 / s)
            - (3.0 - q).ln()
            - 0.5 * s.ln()
            - ln_gamma((3.0 - q) / (2.0 * s))
    } else {
        let s = q - 1.0;
        ln_sqrt_pi + ln_gamma((3.0 - q) / (2.0 * s)) - 0.5 * s.ln() - ln_gamma(1.0 / s)
    }
}

/// Lanczos approximation of ln Γ(x), relative error < 2 × 10⁻¹⁰ for x > 0.
///
/// Reference: Lanczos (1964), *SIAM J. Numer. Anal.* 1(1).
fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

// ============================================================================
// Tests
// ============================================================================

//! Bulk generation: skip a transient, then record a fixed number of steps.
//!
//! Both drivers are built on [`Trajectory`], an endless iterator that
//! holds the current `eta` and advances it by one step per `next`. The
//! trajectory is seeded with `N(0,1)/100` when it is created, so the first
//! draw of every sequence is the seed and the recorded values follow the
//! discarded transient in generation order.

use tracing::debug;

use crate::source::NormalSource;
use crate::stats::WelfordAccumulator;
use crate::stepper::QNoiseGenerator;

/// Which single-step update drives a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepKind {
    /// [`QNoiseGenerator::q_noise_step`].
    QNoise { tau: f64, q: f64 },
    /// [`QNoiseGenerator::q_noise_normalized_step`].
    QNoiseNormalized { tau: f64, q: f64 },
    /// [`QNoiseGenerator::ornstein_uhlenbeck_step`].
    OrnsteinUhlenbeck { tau: f64 },
}

/// Endless noise trajectory borrowing a generator.
///
/// `√h` is computed once at construction and reused for every step.
///
/// # Examples
/// ```
/// use qnoise::{QNoiseGenerator, StepKind};
///
/// let mut gen = QNoiseGenerator::with_seed(42);
/// let first: Vec<f64> = gen
///     .trajectory(StepKind::QNoise { tau: 1.0, q: 0.8 }, 0.01)
///     .take(5)
///     .collect();
/// assert_eq!(first.len(), 5);
/// ```
#[derive(Debug)]
pub struct Trajectory<'a, S> {
    generator: &'a mut QNoiseGenerator<S>,
    kind: StepKind,
    h: f64,
    sqrt_h: f64,
    eta: f64,
}

impl<S: NormalSource> Trajectory<'_, S> {
    /// Current trajectory value.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Advances `steps` times without recording.
    pub fn skip_transient(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    /// Summarises the next `steps` values without storing them.
    ///
    /// ```
    /// use qnoise::{QNoiseGenerator, StepKind};
    ///
    /// let mut gen = QNoiseGenerator::with_seed(7);
    /// let mut path = gen.trajectory(StepKind::OrnsteinUhlenbeck { tau: 1.0 }, 0.05);
    /// path.skip_transient(40);
    /// let moments = path.moments(50_000);
    /// assert_eq!(moments.count(), 50_000);
    /// assert!((moments.sample_variance().unwrap() - 0.5).abs() < 0.1);
    /// ```
    pub fn moments(&mut self, steps: usize) -> WelfordAccumulator {
        self.by_ref().take(steps).collect()
    }

    fn advance(&mut self) -> f64 {
        let gen = &mut *self.generator;
        self.eta = match self.kind {
            StepKind::QNoise { tau, q } => {
                gen.q_noise_step(self.eta, tau, q, self.h, Some(self.sqrt_h))
            }
            StepKind::QNoiseNormalized { tau, q } => {
                gen.q_noise_normalized_step(self.eta, tau, q, self.h, Some(self.sqrt_h))
            }
            StepKind::OrnsteinUhlenbeck { tau } => {
                gen.ornstein_uhlenbeck_step(self.eta, tau, self.h)
            }
        };
        self.eta
    }
}

impl<S: NormalSource> Iterator for Trajectory<'_, S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: NormalSource> QNoiseGenerator<S> {
    /// Starts a trajectory seeded with `N(0,1)/100`.
    ///
    /// Consumes one normal draw immediately.
    pub fn trajectory(&mut self, kind: StepKind, h: f64) -> Trajectory<'_, S> {
        let eta = self.gauss_white_noise() / 100.0;
        self.trajectory_from(kind, h, eta)
    }

    /// Starts a trajectory at a caller-chosen `eta`, without a seed draw.
    pub fn trajectory_from(&mut self, kind: StepKind, h: f64, eta: f64) -> Trajectory<'_, S> {
        Trajectory {
            generator: self,
            kind,
            h,
            sqrt_h: h.sqrt(),
            eta,
        }
    }

    /// Generates `n` q-noise values after discarding a transient.
    ///
    /// `tau` is taken by absolute value, and zero is replaced by `h`. A
    /// `transient` of `None` discards `⌊2τ/h⌋` steps. `normalized` selects
    /// [`q_noise_normalized_step`](Self::q_noise_normalized_step) over
    /// [`q_noise_step`](Self::q_noise_step).
    ///
    /// Always returns exactly `n` values.
    ///
    /// # Examples
    /// ```
    /// use qnoise::QNoiseGenerator;
    ///
    /// let mut gen = QNoiseGenerator::with_seed(42);
    /// let noise = gen.generate_sequence(1.0, 1.5, 1000, 0.01, None, false);
    /// assert_eq!(noise.len(), 1000);
    /// assert!(noise.iter().all(|x| x.is_finite()));
    /// ```
    pub fn generate_sequence(
        &mut self,
        tau: f64,
        q: f64,
        n: usize,
        h: f64,
        transient: Option<usize>,
        normalized: bool,
    ) -> Vec<f64> {
        let tau = effective_tau(tau, h);
        let transient = transient.unwrap_or_else(|| auto_transient(tau, h));
        debug!(tau, q, n, h, transient, normalized, "generating q-noise sequence");

        let kind = if normalized {
            StepKind::QNoiseNormalized { tau, q }
        } else {
            StepKind::QNoise { tau, q }
        };
        let mut path = self.trajectory(kind, h);
        path.skip_transient(transient);
        path.take(n).collect()
    }

    /// Generates `n` Ornstein-Uhlenbeck values after discarding a transient.
    ///
    /// With `tau == 0` or `white_noise` set, returns `n` independent N(0,1)
    /// draws instead: no seed draw, no transient, no correlation.
    pub fn generate_ornstein_uhlenbeck_sequence(
        &mut self,
        tau: f64,
        n: usize,
        h: f64,
        transient: Option<usize>,
        white_noise: bool,
    ) -> Vec<f64> {
        let tau = tau.abs();
        if tau == 0.0 || white_noise {
            debug!(n, "generating gaussian white noise");
            return (0..n).map(|_| self.gauss_white_noise()).collect();
        }

        let transient = transient.unwrap_or_else(|| auto_transient(tau, h));
        debug!(tau, n, h, transient, "generating ornstein-uhlenbeck sequence");
        let mut path = self.trajectory(StepKind::OrnsteinUhlenbeck { tau }, h);
        path.skip_transient(transient);
        path.take(n).collect()
    }
}

/// `|tau|`, with zero standing for "one integration step".
fn effective_tau(tau: f64, h: f64) -> f64 {
    let tau = tau.abs();
    if tau == 0.0 {
        h
    } else {
        tau
    }
}

/// `⌊2τ/h⌋`; saturates, and non-finite ratios give zero.
fn auto_transient(tau: f64, h: f64) -> usize {
    (2.0 * tau / h) as usize
}

// ============================================================================
// Tests
// ============================================================================

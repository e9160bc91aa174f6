//! Process-wide default generator.
//!
//! The default generator does not exist until [`init_default`] is called;
//! every accessor before that returns [`DefaultGeneratorError::Uninitialized`].
//! Access is serialized through a mutex, so concurrent callers interleave
//! whole calls, never single draws.

use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::error::DefaultGeneratorError;
use crate::stepper::QNoiseGenerator;

static DEFAULT: Mutex<Option<QNoiseGenerator>> = Mutex::new(None);

fn lock() -> Result<MutexGuard<'static, Option<QNoiseGenerator>>, DefaultGeneratorError> {
    DEFAULT.lock().map_err(|_| DefaultGeneratorError::Poisoned)
}

/// Installs the default generator, replacing any previous one.
///
/// `None` seeds from the clock.
pub fn init_default(seed: Option<u64>) -> Result<(), DefaultGeneratorError> {
    let generator = match seed {
        Some(seed) => QNoiseGenerator::with_seed(seed),
        None => QNoiseGenerator::new(),
    };
    *lock()? = Some(generator);
    info!(?seed, "default generator initialised");
    Ok(())
}

/// Reseeds an already initialised default generator.
pub fn reseed_default(seed: u64) -> Result<(), DefaultGeneratorError> {
    let mut guard = lock()?;
    let slot = guard.as_mut().ok_or(DefaultGeneratorError::Uninitialized)?;
    *slot = QNoiseGenerator::with_seed(seed);
    info!(seed, "default generator reseeded");
    Ok(())
}

/// Runs `f` with exclusive access to the default generator.
pub fn with_default<F, T>(f: F) -> Result<T, DefaultGeneratorError>
where
    F: FnOnce(&mut QNoiseGenerator) -> T,
{
    let mut guard = lock()?;
    let generator = guard.as_mut().ok_or(DefaultGeneratorError::Uninitialized)?;
    Ok(f(generator))
}

/// [`QNoiseGenerator::generate_sequence`] on the default generator.
pub fn generate(
    tau: f64,
    q: f64,
    n: usize,
    h: f64,
    transient: Option<usize>,
    normalized: bool,
) -> Result<Vec<f64>, DefaultGeneratorError> {
    with_default(|gen| gen.generate_sequence(tau, q, n, h, transient, normalized))
}

/// [`QNoiseGenerator::generate_ornstein_uhlenbeck_sequence`] on the default generator.
pub fn generate_ornstein_uhlenbeck(
    tau: f64,
    n: usize,
    h: f64,
    transient: Option<usize>,
    white_noise: bool,
) -> Result<Vec<f64>, DefaultGeneratorError> {
    with_default(|gen| gen.generate_ornstein_uhlenbeck_sequence(tau, n, h, transient, white_noise))
}

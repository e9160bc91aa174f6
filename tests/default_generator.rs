//! The default generator is process-wide state, so its whole lifecycle is
//! exercised in one test to keep the ordering deterministic.

use qnoise::default::{
    generate, generate_ornstein_uhlenbeck, init_default, reseed_default, with_default,
};
use qnoise::error::DefaultGeneratorError;
use qnoise::QNoiseGenerator;

#[test]
fn default_generator_lifecycle() {
    assert_eq!(
        generate(1.0, 1.5, 10, 0.01, None, false),
        Err(DefaultGeneratorError::Uninitialized)
    );
    assert_eq!(reseed_default(1), Err(DefaultGeneratorError::Uninitialized));
    assert_eq!(
        with_default(|gen| gen.gauss_white_noise()),
        Err(DefaultGeneratorError::Uninitialized)
    );

    init_default(Some(42)).unwrap();
    let first = generate(1.0, 1.5, 1000, 0.01, None, false).unwrap();
    assert_eq!(first.len(), 1000);
    assert!(first.iter().all(|x| x.is_finite()));

    let mut reference = QNoiseGenerator::with_seed(42);
    let expected = reference.generate_sequence(1.0, 1.5, 1000, 0.01, None, false);
    assert_eq!(first, expected);

    // The generator state advances between calls.
    let second = generate(1.0, 1.5, 1000, 0.01, None, false).unwrap();
    assert_ne!(first, second);

    reseed_default(42).unwrap();
    assert_eq!(generate(1.0, 1.5, 1000, 0.01, None, false).unwrap(), first);

    let ou = generate_ornstein_uhlenbeck(1.0, 250, 0.01, Some(0), false).unwrap();
    assert_eq!(ou.len(), 250);
    let white = generate_ornstein_uhlenbeck(0.0, 40, 0.01, None, false).unwrap();
    assert_eq!(white.len(), 40);

    init_default(None).unwrap();
    let draw = with_default(|gen| gen.gauss_white_noise()).unwrap();
    assert!(draw.is_finite());
}

use thiserror::Error;

/// Errors raised while loading or validating a [`SequenceConfig`](crate::config::SequenceConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Invalid parameters for a [`StationaryDensity`](crate::density::StationaryDensity).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DensityError {
    #[error("tau must be finite and > 0, got {0}")]
    InvalidTau(f64),

    #[error("q must be finite and < 3 for a normalizable density, got {0}")]
    InvalidQ(f64),
}

/// Failures of the process-wide default generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DefaultGeneratorError {
    #[error("default generator used before init_default")]
    Uninitialized,

    #[error("default generator lock poisoned by a panicking caller")]
    Poisoned,
}

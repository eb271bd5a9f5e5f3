//! Error types for the countdown button crate.

use countdown_lattice_core::LatticeError;
use thiserror::Error;

/// Errors raised while configuring or hosting a countdown button.
///
/// Runtime interaction (clicks, ticks, hover) cannot fail; only construction
/// and configuration loading can.
#[derive(Error, Debug)]
pub enum CountdownError {
    /// Construction parameters were rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration file was not valid TOML for a button.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the core timer or signal systems.
    #[error(transparent)]
    Core(#[from] LatticeError),
}

impl CountdownError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Result type for countdown button operations.
pub type CountdownResult<T> = Result<T, CountdownError>;

//! Error types for Countdown Lattice core.

use thiserror::Error;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Timer-related error.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Timer-specific errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("invalid or expired timer ID")]
    InvalidTimerId,
    /// A repeating timer was requested with a zero interval.
    #[error("repeating timer interval must be greater than zero")]
    ZeroInterval,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, LatticeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_error_converts() {
        let err: LatticeError = TimerError::InvalidTimerId.into();
        assert_eq!(err, LatticeError::Timer(TimerError::InvalidTimerId));
        assert_eq!(err.to_string(), "timer error: invalid or expired timer ID");
    }

    #[test]
    fn test_zero_interval_display() {
        let err: LatticeError = TimerError::ZeroInterval.into();
        assert!(err.to_string().contains("greater than zero"));
    }
}

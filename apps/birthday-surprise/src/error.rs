//! Error types for the birthday show

use keepsake_engine::EngineError;
use thiserror::Error;

/// Settings that parsed but cannot drive the show.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The PIN must be exactly six ASCII digits
    #[error("pin must be 6 digits, got {0:?}")]
    InvalidPin(String),

    /// At least one attempt has to be allowed before the lockout
    #[error("max_attempts must be at least 1")]
    NoAttempts,

    /// A delay or interval is negative or not finite
    #[error("{field} must be a non-negative number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f32 },

    /// An interval shorter than one simulation step
    #[error("{field} must be at least {min}s, got {value}")]
    TooShort { field: &'static str, min: f32, value: f32 },

    /// The letter must reveal at least one character per tick
    #[error("letter.chars_per_tick must be at least 1")]
    StalledLetter,
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidSettings(err.to_string())
    }
}

/// Rejected PIN gate operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Input is locked after too many wrong codes
    #[error("locked for another {remaining_secs}s")]
    Locked { remaining_secs: u32 },

    /// Submit with fewer digits than the code length
    #[error("code incomplete: {entered} of {required} digits")]
    Incomplete { entered: usize, required: usize },

    /// A digit past the code length
    #[error("code already complete")]
    Full,

    /// Backspace on an empty entry
    #[error("nothing to delete")]
    Empty,

    /// The gate already accepted the code
    #[error("code already accepted")]
    AlreadyAccepted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_become_engine_errors() {
        let engine: EngineError = ConfigError::NoAttempts.into();
        assert_eq!(engine.to_string(), "invalid settings: max_attempts must be at least 1");
    }

    #[test]
    fn pin_errors_describe_themselves() {
        let err = PinError::Incomplete { entered: 4, required: 6 };
        assert_eq!(err.to_string(), "code incomplete: 4 of 6 digits");
        assert_eq!(PinError::Locked { remaining_secs: 12 }.to_string(), "locked for another 12s");
    }
}

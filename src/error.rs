//! Engine error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during engine calculations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A parameter is outside its physiologically plausible range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough samples or history to perform the calculation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Reject `value` unless it is finite and within `[min, max]`.
pub fn ensure_range(name: &str, value: f64, min: f64, max: f64) -> EngineResult<f64> {
    if !value.is_finite() {
        tracing::warn!(param = name, "rejected non-finite input");
        return Err(EngineError::InvalidInput(format!(
            "{name} must be a finite number"
        )));
    }
    if value < min || value > max {
        tracing::warn!(param = name, value, min, max, "rejected out-of-range input");
        return Err(EngineError::InvalidInput(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}

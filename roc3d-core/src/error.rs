//! Structured error types for detector evaluation.

use thiserror::Error;

/// Unified error type for all roc3d operations.
#[derive(Debug, Error)]
pub enum Roc3dError {
    /// Invalid input (mismatched lengths, non-finite values, single-class
    /// ground truth)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the roc3d crates.
pub type Result<T> = std::result::Result<T, Roc3dError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let err = Roc3dError::InvalidInput("empty ground truth".into());
        assert_eq!(err.to_string(), "invalid input: empty ground truth");
    }
}

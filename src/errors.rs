//! Errors
//!
//! Custom error types used throughout the `causal_mc` crate.
use thiserror::Error;

/// Errors that can occur while sampling from or estimating with a structural causal model.
#[derive(Debug, Error, PartialEq)]
pub enum CausalError {
    /// First value is the name of the argument, second is expected, third is what was passed.
    #[error("Invalid argument passed for {0}, expected {1} but {2} provided.")]
    InvalidArgument(String, String, String),
    /// A structural equation returned a sequence of the wrong length.
    /// First value is the variable, second the expected length, third the length returned.
    #[error("Structural equation for {0} returned {2} values, expected {1}.")]
    ShapeMismatch(String, usize, usize),
    /// A non-finite value was produced for the named variable.
    #[error("Non-finite value {1} produced for {0}.")]
    NumericAnomaly(String, f64),
    /// No variance in a regressor.
    #[error("Variable {0} has no variance.")]
    NoVariance(String),
    /// Unable to write configuration to file.
    #[error("Unable to write configuration to file: {0}")]
    UnableToWrite(String),
    /// Unable to read configuration from file.
    #[error("Unable to read configuration from a file {0}")]
    UnableToRead(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = CausalError::ShapeMismatch("treatment".to_string(), 10, 9);
        assert_eq!(e.to_string(), "Structural equation for treatment returned 9 values, expected 10.");
        let e = CausalError::InvalidArgument("n".to_string(), "positive integer".to_string(), "0".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid argument passed for n, expected positive integer but 0 provided."
        );
    }
}

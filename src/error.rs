//! Error module for the izhinet library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SNNError {
    /// Error for invalid run configuration, e.g., an empty population.
    InvalidConfiguration(String),
    /// Error for invalid parameters, e.g., mismatched vector lengths.
    InvalidParameters(String),
    /// Error for a non-finite membrane potential or recovery variable.
    /// A NaN or infinite state indicates a parameter or integration defect
    /// and is surfaced with the offending time and neuron instead of being clamped.
    NonFiniteState { time: u64, neuron_id: usize },
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SNNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SNNError::InvalidConfiguration(e) => write!(f, "Invalid configuration: {}", e),
            SNNError::InvalidParameters(e) => write!(f, "Invalid parameters: {}", e),
            SNNError::NonFiniteState { time, neuron_id } => write!(
                f,
                "Non-finite state of neuron {} at time {} ms",
                neuron_id, time
            ),
            SNNError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SNNError {}

impl From<std::io::Error> for SNNError {
    fn from(error: std::io::Error) -> Self {
        SNNError::IOError(error.to_string())
    }
}

//! Run configuration structure and validation.
use serde::{Deserialize, Serialize};

use crate::error::SNNError;

/// The validated configuration of a simulation run.
///
/// The seed is an explicit, mandatory value: there is no fallback to an
/// external entropy source, so every run is reproducible by construction.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    num_excitatory: usize,
    num_inhibitory: usize,
    duration: u64,
    seed: u64,
}

impl SimulationConfig {
    /// Create a simulation configuration with the specified population split,
    /// duration (in milliseconds) and seed.
    /// The function returns an error if either population is empty.
    pub fn build(
        num_excitatory: usize,
        num_inhibitory: usize,
        duration: u64,
        seed: u64,
    ) -> Result<Self, SNNError> {
        if num_excitatory == 0 {
            return Err(SNNError::InvalidConfiguration(
                "The number of excitatory neurons must be positive".to_string(),
            ));
        }
        if num_inhibitory == 0 {
            return Err(SNNError::InvalidConfiguration(
                "The number of inhibitory neurons must be positive".to_string(),
            ));
        }

        Ok(SimulationConfig {
            num_excitatory,
            num_inhibitory,
            duration,
            seed,
        })
    }

    /// Returns the number of excitatory neurons.
    pub fn num_excitatory(&self) -> usize {
        self.num_excitatory
    }

    /// Returns the number of inhibitory neurons.
    pub fn num_inhibitory(&self) -> usize {
        self.num_inhibitory
    }

    /// Returns the total number of neurons.
    pub fn num_neurons(&self) -> usize {
        self.num_excitatory + self.num_inhibitory
    }

    /// Returns the simulation duration in milliseconds.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Returns the seed of the random number source.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SimulationConfig::build(800, 200, 1000, 42).unwrap();
        assert_eq!(config.num_neurons(), 1000);
        assert_eq!(config.duration(), 1000);
        assert_eq!(config.seed(), 42);
    }

    #[test]
    fn test_empty_population() {
        assert_eq!(
            SimulationConfig::build(0, 200, 1000, 42),
            Err(SNNError::InvalidConfiguration(
                "The number of excitatory neurons must be positive".to_string()
            ))
        );
        assert_eq!(
            SimulationConfig::build(800, 0, 1000, 42),
            Err(SNNError::InvalidConfiguration(
                "The number of inhibitory neurons must be positive".to_string()
            ))
        );
    }

    #[test]
    fn test_zero_duration_is_valid() {
        // A zero-length run is a degenerate but legal configuration.
        let config = SimulationConfig::build(8, 2, 0, 42).unwrap();
        assert_eq!(config.duration(), 0);
    }
}

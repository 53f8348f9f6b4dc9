//! The network structure: population split, parameters and coupling.
use crate::error::SNNError;
use crate::network::neuron::{NeuronClass, NeuronParams};
use crate::network::synapse::SynapticMatrix;
use crate::random::RandomSource;

/// A fixed population of excitatory and inhibitory Izhikevich neurons
/// with dense all-to-all synaptic coupling.
///
/// Everything in a `Network` is immutable once built; the mutable run state
/// (potentials, recovery variables, firing log) lives in the
/// [`Simulator`](crate::simulator::Simulator).
#[derive(Debug, PartialEq, Clone)]
pub struct Network {
    num_excitatory: usize,
    num_inhibitory: usize,
    params: NeuronParams,
    weights: SynapticMatrix,
}

impl Network {
    /// Create a random network from the given random source.
    /// The per-neuron parameters are drawn first, then the coupling matrix,
    /// so the draw sequence of a seed is well defined.
    pub fn rand(
        num_excitatory: usize,
        num_inhibitory: usize,
        random: &mut RandomSource,
    ) -> Self {
        let params = NeuronParams::generate(num_excitatory, num_inhibitory, random);
        let weights = SynapticMatrix::rand(num_excitatory, num_inhibitory, random);
        Network {
            num_excitatory,
            num_inhibitory,
            params,
            weights,
        }
    }

    /// Create a network from explicit parameters and coupling matrix.
    /// The function returns an error if the dimensions are inconsistent.
    pub fn from_parts(
        num_excitatory: usize,
        num_inhibitory: usize,
        params: NeuronParams,
        weights: SynapticMatrix,
    ) -> Result<Self, SNNError> {
        let num_neurons = num_excitatory + num_inhibitory;
        if params.len() != num_neurons {
            return Err(SNNError::InvalidParameters(format!(
                "Expected parameters for {} neurons, got {}",
                num_neurons,
                params.len()
            )));
        }
        if weights.num_neurons() != num_neurons {
            return Err(SNNError::InvalidParameters(format!(
                "Expected a coupling matrix for {} neurons, got {}",
                num_neurons,
                weights.num_neurons()
            )));
        }
        if weights.num_excitatory() != num_excitatory {
            return Err(SNNError::InvalidParameters(format!(
                "Expected a coupling matrix with {} excitatory columns, got {}",
                num_excitatory,
                weights.num_excitatory()
            )));
        }
        Ok(Network {
            num_excitatory,
            num_inhibitory,
            params,
            weights,
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

    /// Returns the class of the neuron with the given ID.
    pub fn class(&self, neuron_id: usize) -> NeuronClass {
        NeuronClass::of(neuron_id, self.num_excitatory)
    }

    /// Returns the per-neuron parameters.
    pub fn params(&self) -> &NeuronParams {
        &self.params
    }

    /// Returns the synaptic coupling matrix.
    pub fn weights(&self) -> &SynapticMatrix {
        &self.weights
    }
}

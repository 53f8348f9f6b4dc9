//! Dense synaptic coupling matrix.
use nalgebra::DMatrix;

use crate::random::RandomSource;

/// The dense all-to-all coupling matrix of the network.
///
/// Entry (i, j) is the current contributed to target neuron i by a spike of
/// source neuron j, one millisecond after the spike. Columns of excitatory
/// sources hold weights in [0, 0.5), columns of inhibitory sources hold
/// weights in (-1, 0]. The matrix is built once at its final size and is
/// immutable thereafter.
#[derive(Debug, PartialEq, Clone)]
pub struct SynapticMatrix {
    weights: DMatrix<f64>,
    num_excitatory: usize,
}

impl SynapticMatrix {
    /// Build a random coupling matrix from the given random source,
    /// with one independent uniform draw per entry.
    pub fn rand(
        num_excitatory: usize,
        num_inhibitory: usize,
        random: &mut RandomSource,
    ) -> Self {
        let num_neurons = num_excitatory + num_inhibitory;
        let weights = DMatrix::from_fn(num_neurons, num_neurons, |_, j| {
            if j < num_excitatory {
                0.5 * random.uniform()
            } else {
                -random.uniform()
            }
        });
        SynapticMatrix {
            weights,
            num_excitatory,
        }
    }

    /// Build an all-zero coupling matrix, i.e., a fully decoupled network.
    pub fn zeros(num_excitatory: usize, num_inhibitory: usize) -> Self {
        let num_neurons = num_excitatory + num_inhibitory;
        SynapticMatrix {
            weights: DMatrix::zeros(num_neurons, num_neurons),
            num_excitatory,
        }
    }

    /// Returns the number of neurons coupled by the matrix.
    pub fn num_neurons(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns the number of excitatory source columns: columns
    /// [0, num_excitatory) hold non-negative weights, the rest hold
    /// non-positive weights.
    pub fn num_excitatory(&self) -> usize {
        self.num_excitatory
    }

    /// Returns the weight from source neuron `source_id` to target neuron `target_id`.
    pub fn weight(&self, target_id: usize, source_id: usize) -> f64 {
        self.weights[(target_id, source_id)]
    }

    /// Returns the synaptic current received by every neuron, given the
    /// list of neurons which fired during the previous millisecond.
    ///
    /// The storage is column-major, so the contribution of each fired
    /// source is a contiguous column sweep.
    pub fn input_currents(&self, fired: &[usize]) -> Vec<f64> {
        let mut currents = vec![0.0; self.num_neurons()];
        for &source_id in fired {
            for (target_id, weight) in self.weights.column(source_id).iter().enumerate() {
                currents[target_id] += weight;
            }
        }
        currents
    }
}

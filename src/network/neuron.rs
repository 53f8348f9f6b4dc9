//! Per-neuron classes and parameters of the Izhikevich model.
//!
//! Each neuron carries four immutable parameters:
//!
//! - `a`: time scale of the recovery variable
//! - `b`: sensitivity of the recovery variable to the potential
//! - `c`: after-spike reset value of the potential
//! - `d`: after-spike increment of the recovery variable
//!
//! Excitatory neurons span the regular-spiking to chattering regimes and
//! inhibitory neurons the regular-spiking to fast-spiking regimes, following
//! the heterogeneous distributions of Izhikevich (2003).
use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// The class of a neuron, selecting its parameter distribution, its
/// synaptic sign and its thalamic input scale.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum NeuronClass {
    Excitatory,
    Inhibitory,
}

impl NeuronClass {
    /// Returns the class of the neuron with the given ID.
    /// Neurons [0, num_excitatory) are excitatory, the rest are inhibitory.
    pub fn of(neuron_id: usize, num_excitatory: usize) -> Self {
        if neuron_id < num_excitatory {
            NeuronClass::Excitatory
        } else {
            NeuronClass::Inhibitory
        }
    }
}

/// The per-neuron parameters (a, b, c, d) of the whole population,
/// generated once and immutable for the duration of a run.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NeuronParams {
    /// The recovery time scales.
    pub a: Vec<f64>,
    /// The recovery sensitivities to the potential.
    pub b: Vec<f64>,
    /// The after-spike reset values of the potential.
    pub c: Vec<f64>,
    /// The after-spike increments of the recovery variable.
    pub d: Vec<f64>,
}

impl NeuronParams {
    /// Generate the population parameters from the given random source.
    ///
    /// Every excitatory neuron uses one fresh uniform draw r:
    /// a = 0.02, b = 0.2, c = -65 + 15 r^2, d = 8 - 6 r^2.
    /// Every inhibitory neuron uses one fresh uniform draw r:
    /// a = 0.02 + 0.08 r, b = 0.25 - 0.05 r, c = -65, d = 2.
    pub fn generate(
        num_excitatory: usize,
        num_inhibitory: usize,
        random: &mut RandomSource,
    ) -> Self {
        let num_neurons = num_excitatory + num_inhibitory;
        let mut a = Vec::with_capacity(num_neurons);
        let mut b = Vec::with_capacity(num_neurons);
        let mut c = Vec::with_capacity(num_neurons);
        let mut d = Vec::with_capacity(num_neurons);

        for _ in 0..num_excitatory {
            let r = random.uniform();
            a.push(0.02);
            b.push(0.2);
            c.push(-65.0 + 15.0 * r * r);
            d.push(8.0 - 6.0 * r * r);
        }
        for _ in 0..num_inhibitory {
            let r = random.uniform();
            a.push(0.02 + 0.08 * r);
            b.push(0.25 - 0.05 * r);
            c.push(-65.0);
            d.push(2.0);
        }

        NeuronParams { a, b, c, d }
    }

    /// Returns the number of neurons in the population.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns true if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUM_EXCITATORY: usize = 80;
    const NUM_INHIBITORY: usize = 20;

    #[test]
    fn test_class_ordering() {
        assert_eq!(NeuronClass::of(0, 80), NeuronClass::Excitatory);
        assert_eq!(NeuronClass::of(79, 80), NeuronClass::Excitatory);
        assert_eq!(NeuronClass::of(80, 80), NeuronClass::Inhibitory);
        assert_eq!(NeuronClass::of(99, 80), NeuronClass::Inhibitory);
    }

    #[test]
    fn test_excitatory_params() {
        for seed in 0..10 {
            let mut random = RandomSource::new(seed);
            let params = NeuronParams::generate(NUM_EXCITATORY, NUM_INHIBITORY, &mut random);
            for i in 0..NUM_EXCITATORY {
                assert_eq!(params.a[i], 0.02);
                assert_eq!(params.b[i], 0.2);
                assert!((-65.0..-50.0).contains(&params.c[i]));
                assert!((2.0..=8.0).contains(&params.d[i]));
                // c and d are derived from the same draw
                let r_squared = (params.c[i] + 65.0) / 15.0;
                assert!((params.d[i] - (8.0 - 6.0 * r_squared)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_inhibitory_params() {
        for seed in 0..10 {
            let mut random = RandomSource::new(seed);
            let params = NeuronParams::generate(NUM_EXCITATORY, NUM_INHIBITORY, &mut random);
            for i in NUM_EXCITATORY..(NUM_EXCITATORY + NUM_INHIBITORY) {
                assert_eq!(params.c[i], -65.0);
                assert_eq!(params.d[i], 2.0);
                assert!((0.02..0.1).contains(&params.a[i]));
                assert!((0.2..=0.25).contains(&params.b[i]));
                // a and b are derived from the same draw
                let r = (params.a[i] - 0.02) / 0.08;
                assert!((params.b[i] - (0.25 - 0.05 * r)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_len() {
        let mut random = RandomSource::new(42);
        let params = NeuronParams::generate(NUM_EXCITATORY, NUM_INHIBITORY, &mut random);
        assert_eq!(params.len(), NUM_EXCITATORY + NUM_INHIBITORY);
        assert_eq!(params.b.len(), params.len());
        assert_eq!(params.c.len(), params.len());
        assert_eq!(params.d.len(), params.len());
    }
}

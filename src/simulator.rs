//! Time-stepping simulation of the network.
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::error::SNNError;
use crate::network::network::Network;
use crate::network::neuron::NeuronClass;
use crate::random::RandomSource;
use crate::spike_train::{FiringLog, Spike};
use crate::{FIRING_THRESHOLD, MIN_PARALLEL_NEURONS, RESTING_POTENTIAL};

/// Standard deviation of the thalamic input current of excitatory neurons.
const EXCITATORY_INPUT_SCALE: f64 = 5.0;
/// Standard deviation of the thalamic input current of inhibitory neurons.
const INHIBITORY_INPUT_SCALE: f64 = 2.0;

/// Advance one neuron by one millisecond, given its total input current.
///
/// The potential is updated with two half-millisecond Euler sub-steps
/// (the quadratic term makes a full-step update unstable near threshold),
/// with the input and the recovery variable held fixed across both.
/// The recovery variable is then updated once from the post-sub-step potential.
fn advance_neuron(v: &mut f64, u: &mut f64, a: f64, b: f64, input: f64) {
    *v += 0.5 * (0.04 * *v * *v + 5.0 * *v + 140.0 - *u + input);
    *v += 0.5 * (0.04 * *v * *v + 5.0 * *v + 140.0 - *u + input);
    *u += a * (b * *v - *u);
}

/// The mutable state of a simulation run: membrane potentials, recovery
/// variables, the neurons which fired during the last millisecond, and the
/// firing log.
///
/// The simulation is a sequential state machine over milliseconds: the
/// synaptic input of step t depends on the spikes of step t-1, so steps are
/// never reordered. Within one step, the per-neuron integration has no
/// cross-neuron dependency and is parallelized for large populations.
#[derive(Debug, Clone)]
pub struct Simulator {
    network: Network,
    random: RandomSource,
    duration: u64,
    time: u64,
    potential: Vec<f64>,
    recovery: Vec<f64>,
    fired: Vec<usize>,
    log: FiringLog,
}

impl Simulator {
    /// Create a simulator from a validated configuration: seed the random
    /// source, draw the network, and initialize the run state.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut random = RandomSource::new(config.seed());
        let network = Network::rand(
            config.num_excitatory(),
            config.num_inhibitory(),
            &mut random,
        );
        Self::from_network(network, config.duration(), random)
    }

    /// Create a simulator for an explicit network, e.g., one built with
    /// [`Network::from_parts`]. The random source only drives the thalamic
    /// input from here on.
    pub fn from_network(network: Network, duration: u64, random: RandomSource) -> Self {
        let num_neurons = network.num_neurons();
        let potential = vec![RESTING_POTENTIAL; num_neurons];
        let recovery = network
            .params()
            .b
            .iter()
            .map(|b| b * RESTING_POTENTIAL)
            .collect();
        Simulator {
            network,
            random,
            duration,
            time: 0,
            potential,
            recovery,
            fired: Vec::new(),
            log: FiringLog::new_empty(),
        }
    }

    /// Returns the current simulation time in milliseconds.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Returns the network being simulated.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns the membrane potential of the neuron with the given ID.
    pub fn potential(&self, neuron_id: usize) -> f64 {
        self.potential[neuron_id]
    }

    /// Returns the recovery variable of the neuron with the given ID.
    pub fn recovery(&self, neuron_id: usize) -> f64 {
        self.recovery[neuron_id]
    }

    /// Returns the IDs of the neurons which fired during the last step,
    /// in ascending order.
    pub fn last_fired(&self) -> &[usize] {
        &self.fired[..]
    }

    /// Returns the firing log recorded so far.
    pub fn firing_log(&self) -> &FiringLog {
        &self.log
    }

    /// Consume the simulator and hand the firing log to the caller.
    pub fn into_firing_log(self) -> FiringLog {
        self.log
    }

    /// Returns the thalamic input of the current millisecond: a fresh
    /// Gaussian draw per neuron, scaled by class. Draws are sequential in
    /// neuron order so the stream of a seed is well defined.
    pub fn thalamic_input(&mut self) -> Vec<f64> {
        let num_excitatory = self.network.num_excitatory();
        (0..self.network.num_neurons())
            .map(|i| match NeuronClass::of(i, num_excitatory) {
                NeuronClass::Excitatory => EXCITATORY_INPUT_SCALE * self.random.gaussian(),
                NeuronClass::Inhibitory => INHIBITORY_INPUT_SCALE * self.random.gaussian(),
            })
            .collect()
    }

    /// Advance the simulation by one millisecond, given the external input
    /// current of every neuron.
    ///
    /// The total input is the external input plus the synaptic current of
    /// the spikes of the previous millisecond. After integration, every
    /// neuron whose potential reached the threshold is recorded in the
    /// firing log (in ascending ID order), its potential is reset to its c
    /// parameter and its recovery variable is incremented by its d
    /// parameter. A non-finite potential or recovery variable fails the
    /// step with the offending time and neuron ID.
    pub fn step(&mut self, input: &[f64]) -> Result<(), SNNError> {
        let num_neurons = self.network.num_neurons();
        if input.len() != num_neurons {
            return Err(SNNError::InvalidParameters(format!(
                "Expected an input current for {} neurons, got {}",
                num_neurons,
                input.len()
            )));
        }

        // Synaptic currents from the previous step's spikes.
        let mut total = self.network.weights().input_currents(&self.fired);
        for (current, external) in total.iter_mut().zip(input) {
            *current += external;
        }

        let params = self.network.params();
        let time = self.time;
        if num_neurons >= MIN_PARALLEL_NEURONS {
            self.potential
                .par_iter_mut()
                .zip(self.recovery.par_iter_mut())
                .zip(total.par_iter())
                .enumerate()
                .try_for_each(|(i, ((v, u), &current))| {
                    advance_neuron(v, u, params.a[i], params.b[i], current);
                    if v.is_finite() && u.is_finite() {
                        Ok(())
                    } else {
                        Err(SNNError::NonFiniteState { time, neuron_id: i })
                    }
                })?;
        } else {
            for (i, ((v, u), &current)) in self
                .potential
                .iter_mut()
                .zip(self.recovery.iter_mut())
                .zip(total.iter())
                .enumerate()
            {
                advance_neuron(v, u, params.a[i], params.b[i], current);
                if !(v.is_finite() && u.is_finite()) {
                    return Err(SNNError::NonFiniteState { time, neuron_id: i });
                }
            }
        }

        // Spike detection and reset. The sequential ascending scan keeps the
        // log ordered by neuron ID within the millisecond.
        self.fired.clear();
        for i in 0..num_neurons {
            if self.potential[i] >= FIRING_THRESHOLD {
                self.log.push(Spike::new(self.time, i));
                self.potential[i] = params.c[i];
                self.recovery[i] += params.d[i];
                self.fired.push(i);
            }
        }

        self.time += 1;
        Ok(())
    }

    /// Run the simulation for the configured duration, drawing fresh
    /// thalamic input every millisecond.
    pub fn run(&mut self) -> Result<(), SNNError> {
        log::info!(
            "Starting simulation of {} neurons for {} ms...",
            self.network.num_neurons(),
            self.duration
        );

        let log_interval = (self.duration / 10).max(1);
        while self.time < self.duration {
            let input = self.thalamic_input();
            self.step(&input)?;

            if self.time % log_interval == 0 {
                log::debug!(
                    "Simulation progress: {}/{} ms ({} spikes so far)",
                    self.time,
                    self.duration,
                    self.log.len()
                );
            }
        }

        log::info!("Simulation completed with {} spikes!", self.log.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::neuron::NeuronParams;
    use crate::network::synapse::SynapticMatrix;

    fn decoupled_simulator(num_excitatory: usize, num_inhibitory: usize) -> Simulator {
        let mut random = RandomSource::new(42);
        let params = NeuronParams::generate(num_excitatory, num_inhibitory, &mut random);
        let weights = SynapticMatrix::zeros(num_excitatory, num_inhibitory);
        let network = Network::from_parts(num_excitatory, num_inhibitory, params, weights).unwrap();
        Simulator::from_network(network, 100, random)
    }

    #[test]
    fn test_initial_state() {
        let config = SimulationConfig::build(30, 10, 100, 42).unwrap();
        let sim = Simulator::new(&config);
        for i in 0..sim.network().num_neurons() {
            assert_eq!(sim.potential(i), RESTING_POTENTIAL);
            assert_eq!(sim.recovery(i), sim.network().params().b[i] * RESTING_POTENTIAL);
        }
        assert_eq!(sim.time(), 0);
        assert!(sim.firing_log().is_empty());
    }

    #[test]
    fn test_zero_duration() {
        let config = SimulationConfig::build(30, 10, 0, 42).unwrap();
        let mut sim = Simulator::new(&config);
        sim.run().unwrap();
        assert_eq!(sim.time(), 0);
        assert!(sim.firing_log().is_empty());
    }

    #[test]
    fn test_reset_after_spike() {
        let mut sim = decoupled_simulator(1, 1);
        // A strong input drives both neurons over the threshold at once.
        sim.step(&[1000.0, 1000.0]).unwrap();

        assert_eq!(sim.last_fired(), &[0, 1]);
        for i in 0..2 {
            assert_eq!(sim.potential(i), sim.network().params().c[i]);
        }
        assert_eq!(
            sim.firing_log().spikes(),
            &[Spike::new(0, 0), Spike::new(0, 1)]
        );
        assert!(sim.firing_log().is_chronological());
    }

    #[test]
    fn test_silent_without_input() {
        let mut sim = decoupled_simulator(4, 2);
        let input = vec![0.0; 6];
        for _ in 0..100 {
            sim.step(&input).unwrap();
            for i in 0..6 {
                assert!(sim.potential(i) < FIRING_THRESHOLD);
            }
        }
        assert!(sim.firing_log().is_empty());
        assert_eq!(sim.time(), 100);
    }

    #[test]
    fn test_input_length_mismatch() {
        let mut sim = decoupled_simulator(1, 1);
        assert!(matches!(
            sim.step(&[0.0]),
            Err(SNNError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_non_finite_state_is_surfaced() {
        let mut sim = decoupled_simulator(1, 1);
        assert_eq!(
            sim.step(&[f64::INFINITY, 0.0]),
            Err(SNNError::NonFiniteState {
                time: 0,
                neuron_id: 0
            })
        );
    }

    #[test]
    fn test_synaptic_input_is_delayed_by_one_step() {
        // A spike at step t contributes its source column to step t+1 only.
        // Two identical simulators diverge at t=1 when one of them saw a
        // spike at t=0, even though both integrate the same external input.
        let mut random = RandomSource::new(7);
        let network = Network::rand(3, 1, &mut random);
        let mut sim_spiking = Simulator::from_network(network.clone(), 10, random.clone());
        let mut sim_silent = Simulator::from_network(network, 10, random);

        // Same trajectory so far for neurons 1..4, which receive no input.
        sim_spiking.step(&[1000.0, 0.0, 0.0, 0.0]).unwrap();
        sim_silent.step(&[0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(sim_spiking.last_fired(), &[0]);
        assert_eq!(sim_silent.last_fired(), &[] as &[usize]);
        for i in 1..4 {
            assert_eq!(sim_spiking.potential(i), sim_silent.potential(i));
        }

        // One step later the t=0 spike reaches its targets.
        sim_spiking.step(&[0.0; 4]).unwrap();
        sim_silent.step(&[0.0; 4]).unwrap();
        for i in 1..4 {
            assert_ne!(sim_spiking.potential(i), sim_silent.potential(i));
        }
    }
}

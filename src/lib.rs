//! This crate simulates dense networks of Izhikevich spiking neurons.
//!
//! A network is a fixed population of excitatory and inhibitory neurons
//! coupled all-to-all by a dense synaptic weight matrix and driven by
//! stochastic thalamic input. The run is integrated forward in one
//! millisecond steps and produces a chronological log of spike events.
//! Given a seed, a run is fully reproducible.
//!
//! # Running a simulation
//!
//! ```rust
//! use izhinet::config::SimulationConfig;
//! use izhinet::simulator::Simulator;
//!
//! // The canonical 1000-neuron network, simulated for 100 ms
//! let config = SimulationConfig::build(800, 200, 100, 42).unwrap();
//! let mut sim = Simulator::new(&config);
//! sim.run().unwrap();
//!
//! let log = sim.into_firing_log();
//! assert!(log.is_chronological());
//! ```
//!
//! # Stepping by hand
//!
//! The integrator is exposed one millisecond at a time, with the external
//! input current under caller control:
//!
//! ```rust
//! use izhinet::config::SimulationConfig;
//! use izhinet::simulator::Simulator;
//!
//! let config = SimulationConfig::build(8, 2, 10, 42).unwrap();
//! let mut sim = Simulator::new(&config);
//! for _ in 0..10 {
//!     let input = sim.thalamic_input();
//!     sim.step(&input).unwrap();
//! }
//! assert_eq!(sim.time(), 10);
//! ```
//!
//! # Hodgkin-Huxley model
//!
//! The crate also ships a small conductance-based companion simulator,
//! which produces membrane voltage traces instead of spike events:
//!
//! ```rust
//! use izhinet::hh::neuron::HHParameters;
//! use izhinet::hh::simulation::HHSimulation;
//!
//! let mut sim = HHSimulation::build(1, 50.0, 0.025, HHParameters::default()).unwrap();
//! sim.stimulate(0, 5.0, 30.0, 10.0).unwrap();
//! sim.run();
//! assert_eq!(sim.trace(0).len(), sim.times().len());
//! ```
pub mod config;
pub mod error;
pub mod hh;
pub mod network;
pub mod random;
pub mod simulator;
pub mod spike_train;

/// The potential threshold for a neuron to fire, in mV.
pub const FIRING_THRESHOLD: f64 = 30.0;
/// The initial membrane potential of every neuron, in mV.
pub const RESTING_POTENTIAL: f64 = -65.0;
/// Minimum number of neurons to consider parallel processing.
pub const MIN_PARALLEL_NEURONS: usize = 100;

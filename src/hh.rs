//! Hodgkin-Huxley (conductance-based) model structures and utilities.
//!
//! A small companion simulator to the Izhikevich network: a handful of
//! Hodgkin-Huxley neurons integrated with a fixed sub-millisecond Euler
//! step, driven by an explicit stimulation protocol and coupled by voltage
//! weights, producing per-neuron voltage traces rather than spike events.
pub mod neuron;
pub mod simulation;

//! Network (population parameters and synaptic coupling) structures and utilities.
pub mod network;
pub mod neuron;
pub mod synapse;

//! Hand-wired circuits built from gates.

pub mod neuron;

pub use neuron::{forward_circuit_fast, NeuronLeaves, SingleNeuron};

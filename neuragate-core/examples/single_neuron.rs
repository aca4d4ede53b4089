//! # Single neuron, forward and backward
//!
//! Builds `sigmoid(a*x + b*y + c)` out of two multiply gates, two add gates
//! and a sigmoid gate, then:
//! 1. runs the forward pass and prints the circuit output,
//! 2. runs the backward pass and prints the gradient of every input,
//! 3. nudges every input along its gradient and prints the new output,
//! 4. prints numerical gradients of the same function for comparison.
//!
//! ## Running
//! `cargo run --example single_neuron` (set `RUST_LOG=trace` to follow every gate).

use neuragate_core::autograd::grad_check::{neuron_numerical_gradients, FiniteDifference};
use neuragate_core::optim::{GradientStep, Optimizer};
use neuragate_core::SingleNeuron;
use std::error::Error;

const NAMES: [&str; 5] = ["a", "b", "c", "x", "y"];

fn print_grads(grads: &[f64]) {
    for (name, grad) in NAMES.iter().zip(grads) {
        println!("{}.grad: {:.3}", name, grad);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut neuron = SingleNeuron::new(1.0, 2.0, -3.0, -1.0, 3.0);
    let initial_point = neuron.leaf_values()?;

    neuron.forward()?;
    println!("circuit output: {}", neuron.output_value()?);

    neuron.backward()?;
    let mut optimizer = GradientStep::with_default_step_size(neuron.parameters());
    optimizer.step(neuron.arena_mut())?;
    print_grads(&neuron.leaf_grads()?);

    neuron.forward()?;
    println!("circuit output after one backprop: {}", neuron.output_value()?);

    let numerical = neuron_numerical_gradients(&initial_point, 1e-4, FiniteDifference::Central)?;
    print_grads(&numerical);

    Ok(())
}

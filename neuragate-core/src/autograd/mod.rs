//! Validation of analytical gradients.

pub mod grad_check;

pub use grad_check::{
    check_grad, check_neuron_grad, circuit_fn, neuron_numerical_gradients, numerical_gradient,
    numerical_gradients, FiniteDifference, GradCheckConfig, GradCheckError,
};

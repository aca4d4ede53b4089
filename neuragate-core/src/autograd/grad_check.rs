use crate::error::NeuraGateError;
use crate::graph::{forward_circuit_fast, SingleNeuron};
use approx::{abs_diff_eq, relative_eq};
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical {analytical:?} != numerical {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for input {input_index}: {value:?}")]
    NumericalGradNotFinite { input_index: usize, value: f64 },
    #[error("Analytical gradient is NaN or infinite for input {input_index}: {value:?}")]
    AnalyticalGradNotFinite { input_index: usize, value: f64 },
    #[error("Input index {index} out of range for a point of {len} coordinates")]
    InputIndexOutOfRange { index: usize, len: usize },
    #[error("Expected {expected} analytical gradients, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Forward pass failed during gradient check: {0}")]
    Forward(NeuraGateError),
    #[error("Backward pass failed during gradient check: {0}")]
    Backward(NeuraGateError),
    #[error("Graph error during gradient check: {0}")]
    Graph(NeuraGateError),
}

impl From<NeuraGateError> for GradCheckError {
    fn from(err: NeuraGateError) -> Self {
        GradCheckError::Graph(err)
    }
}

/// Finite-difference formula used to approximate a partial derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiniteDifference {
    /// `(f(p + h) - f(p)) / h`
    Forward,
    /// `(f(p + h) - f(p - h)) / 2h`
    #[default]
    Central,
}

/// Settings for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation `h` applied to one coordinate at a time.
    pub epsilon: f64,
    /// Accepted absolute (or relative) gap between analytical and numerical.
    pub tolerance: f64,
    pub scheme: FiniteDifference,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-4,
            tolerance: 1e-3,
            scheme: FiniteDifference::Central,
        }
    }
}

/// Approximates `df/dp[index]` at `point`.
pub fn numerical_gradient<F>(
    func: F,
    point: &[f64],
    index: usize,
    epsilon: f64,
    scheme: FiniteDifference,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[f64]) -> f64,
{
    if index >= point.len() {
        return Err(GradCheckError::InputIndexOutOfRange {
            index,
            len: point.len(),
        });
    }
    let mut shifted = point.to_vec();
    shifted[index] = point[index] + epsilon;
    let f_plus = func(&shifted);

    let grad = match scheme {
        FiniteDifference::Forward => (f_plus - func(point)) / epsilon,
        FiniteDifference::Central => {
            shifted[index] = point[index] - epsilon;
            (f_plus - func(&shifted)) / (2.0 * epsilon)
        }
    };
    Ok(grad)
}

/// Approximates the full gradient of `func` at `point`.
pub fn numerical_gradients<F>(
    func: F,
    point: &[f64],
    epsilon: f64,
    scheme: FiniteDifference,
) -> Result<Vec<f64>, GradCheckError>
where
    F: Fn(&[f64]) -> f64,
{
    (0..point.len())
        .map(|i| numerical_gradient(&func, point, i, epsilon, scheme))
        .collect()
}

/// Checks analytical gradients against numerical gradients using finite differences.
pub fn check_grad<F>(
    func: F,
    point: &[f64],
    analytical: &[f64],
    config: GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[f64]) -> f64,
{
    if analytical.len() != point.len() {
        return Err(GradCheckError::LengthMismatch {
            expected: point.len(),
            actual: analytical.len(),
        });
    }

    for (i, &analytical_grad) in analytical.iter().enumerate() {
        let numerical_grad =
            numerical_gradient(&func, point, i, config.epsilon, config.scheme)?;

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNotFinite {
                input_index: i,
                value: numerical_grad,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNotFinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let close = abs_diff_eq!(analytical_grad, numerical_grad, epsilon = config.tolerance)
            || relative_eq!(analytical_grad, numerical_grad, max_relative = config.tolerance);
        if !close {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical: analytical_grad,
                numerical: numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
        debug!(
            "check_grad: input {} ok (analytical {}, numerical {})",
            i, analytical_grad, numerical_grad
        );
    }
    Ok(())
}

/// Runs a fresh forward and backward pass on `neuron` and checks its leaf
/// gradients against finite differences of [`forward_circuit_fast`].
pub fn check_neuron_grad(
    neuron: &mut SingleNeuron,
    config: GradCheckConfig,
) -> Result<(), GradCheckError> {
    neuron.forward().map_err(GradCheckError::Forward)?;
    neuron.backward().map_err(GradCheckError::Backward)?;
    let point = neuron.leaf_values()?;
    let analytical = neuron.leaf_grads()?;
    check_grad(circuit_slice_fn, &point, &analytical, config)
}

/// Numerical gradient of [`forward_circuit_fast`] at `[a, b, c, x, y]`.
pub fn neuron_numerical_gradients(
    point: &[f64; 5],
    epsilon: f64,
    scheme: FiniteDifference,
) -> Result<[f64; 5], GradCheckError> {
    let grads = numerical_gradients(circuit_slice_fn, point, epsilon, scheme)?;
    <[f64; 5]>::try_from(grads.as_slice()).map_err(|_| GradCheckError::LengthMismatch {
        expected: 5,
        actual: grads.len(),
    })
}

/// [`forward_circuit_fast`] over a point laid out as `[a, b, c, x, y]`.
pub fn circuit_fn(p: &[f64; 5]) -> f64 {
    forward_circuit_fast(p[0], p[1], p[2], p[3], p[4])
}

// Slice adapter for the finite-difference helpers; NaN for any other length.
pub(crate) fn circuit_slice_fn(p: &[f64]) -> f64 {
    <&[f64; 5]>::try_from(p).map_or(f64::NAN, circuit_fn)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;

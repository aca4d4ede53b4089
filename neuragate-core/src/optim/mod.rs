//! Parameter updates driven by accumulated gradients.

pub mod gradient_step;
pub mod optimizer_trait;

pub use gradient_step::{GradientStep, DEFAULT_STEP_SIZE};
pub use optimizer_trait::Optimizer;

#[cfg(test)]
mod gradient_step_test;

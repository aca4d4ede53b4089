use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use crate::optim::optimizer_trait::Optimizer;
use log::debug;

pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Moves every parameter along its gradient: `value += step_size * grad`.
///
/// With the circuit output seeded at 1.0 this pushes the output up. To
/// minimise a loss instead, seed the loss output with 1.0 and pass a negative
/// step size.
#[derive(Debug, Clone)]
pub struct GradientStep {
    params: Vec<UnitId>,
    step_size: f64,
}

impl GradientStep {
    pub fn new(
        params: impl IntoIterator<Item = UnitId>,
        step_size: f64,
    ) -> Result<Self, NeuraGateError> {
        validate_step_size(step_size)?;
        Ok(GradientStep {
            params: params.into_iter().collect(),
            step_size,
        })
    }

    pub fn with_default_step_size(params: impl IntoIterator<Item = UnitId>) -> Self {
        GradientStep {
            params: params.into_iter().collect(),
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

fn validate_step_size(step_size: f64) -> Result<(), NeuraGateError> {
    if !step_size.is_finite() {
        return Err(NeuraGateError::InvalidStepSize(step_size));
    }
    Ok(())
}

impl Optimizer for GradientStep {
    fn step(&mut self, arena: &mut UnitArena) -> Result<(), NeuraGateError> {
        for &id in &self.params {
            let unit = arena.get_mut(id)?;
            unit.value += self.step_size * unit.grad;
        }
        debug!(
            "GradientStep: updated {} parameter(s) with step size {}",
            self.params.len(),
            self.step_size
        );
        Ok(())
    }

    fn zero_grad(&mut self, arena: &mut UnitArena) -> Result<(), NeuraGateError> {
        arena.zero_grads(&self.params)
    }

    fn params(&self) -> &[UnitId] {
        &self.params
    }

    fn step_size(&self) -> f64 {
        self.step_size
    }

    fn set_step_size(&mut self, step_size: f64) -> Result<(), NeuraGateError> {
        validate_step_size(step_size)?;
        self.step_size = step_size;
        Ok(())
    }
}

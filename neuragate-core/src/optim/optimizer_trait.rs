use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;

/// Trait defining the common interface for optimizers.
///
/// An optimizer owns the handles of the units it updates; the arena holding
/// their values and gradients is lent to it for each call.
pub trait Optimizer {
    /// Performs a single optimization step using the gradients currently
    /// stored in `arena`.
    fn step(&mut self, arena: &mut UnitArena) -> Result<(), NeuraGateError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    fn zero_grad(&mut self, arena: &mut UnitArena) -> Result<(), NeuraGateError>;

    fn params(&self) -> &[UnitId];

    fn step_size(&self) -> f64;

    fn set_step_size(&mut self, step_size: f64) -> Result<(), NeuraGateError>;
}

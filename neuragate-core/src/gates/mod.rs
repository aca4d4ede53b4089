//! Differentiable elementary operations.
//!
//! Each gate records handles to its inputs during `forward`, pushes a fresh
//! output unit into the arena, and later chains the output's gradient back into
//! its inputs during `backward`.

use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use std::fmt::Debug;

pub mod add;
pub mod multiply;
pub mod sigmoid;

pub use add::AddGate;
pub use multiply::MultiplyGate;
pub use sigmoid::{sigmoid, SigmoidGate};

/// Tag identifying the operation a gate performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Multiply,
    Add,
    Sigmoid,
}

impl GateKind {
    /// Number of input units the operation consumes.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Multiply | GateKind::Add => 2,
            GateKind::Sigmoid => 1,
        }
    }
}

/// Common interface of every gate.
///
/// A gate is reusable: each `forward` call overwrites the recorded inputs and
/// produces a new output unit, and `backward` always works on the most recent
/// forward. The caller decides the traversal order; no gate triggers its
/// predecessors.
pub trait Gate: Debug {
    fn kind(&self) -> GateKind;

    /// Input handles recorded by the last forward, empty before any forward.
    fn inputs(&self) -> Vec<UnitId>;

    /// Output handle produced by the last forward, if any.
    fn output(&self) -> Option<UnitId>;

    /// Runs the forward computation on a slice of inputs.
    ///
    /// Fails with [`NeuraGateError::ArityMismatch`] when `inputs.len()` does not
    /// match [`GateKind::arity`].
    fn forward_inputs(
        &mut self,
        arena: &mut UnitArena,
        inputs: &[UnitId],
    ) -> Result<UnitId, NeuraGateError>;

    /// Adds this gate's local gradient contributions, scaled by the output's
    /// gradient, into the gradients of its inputs.
    ///
    /// Contributions are added, never assigned, so calling this twice without
    /// resetting gradients in between counts them twice.
    fn backward(&self, arena: &mut UnitArena) -> Result<(), NeuraGateError>;
}

/// Input and output handles of a two-input gate after a forward call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BinaryWiring {
    pub u0: UnitId,
    pub u1: UnitId,
    pub utop: UnitId,
}

pub(crate) fn check_arity(
    gate: GateKind,
    inputs: &[UnitId],
) -> Result<(), NeuraGateError> {
    let expected = gate.arity();
    if inputs.len() != expected {
        return Err(NeuraGateError::ArityMismatch {
            gate,
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

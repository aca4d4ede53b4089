use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use crate::gates::{check_arity, Gate, GateKind};
use crate::unit::Unit;
use log::trace;
use num_traits::Float;

/// The logistic function `1 / (1 + e^-x)`.
///
/// Total over floats: `exp` overflowing to infinity yields 0 and underflowing to
/// zero yields 1, so large magnitudes saturate instead of failing. NaN in, NaN
/// out.
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Logistic activation of a single unit: `utop = sigmoid(u0)`.
#[derive(Debug, Clone, Default)]
pub struct SigmoidGate {
    wiring: Option<(UnitId, UnitId)>,
}

impl SigmoidGate {
    pub fn new() -> Self {
        SigmoidGate { wiring: None }
    }

    pub fn forward(&mut self, arena: &mut UnitArena, u0: UnitId) -> Result<UnitId, NeuraGateError> {
        let value = sigmoid(arena.value(u0)?);
        let utop = arena.push(Unit::with_value(value));
        trace!("SigmoidGate: sigmoid({}) -> {} = {}", u0, utop, value);
        self.wiring = Some((u0, utop));
        Ok(utop)
    }
}

impl Gate for SigmoidGate {
    fn kind(&self) -> GateKind {
        GateKind::Sigmoid
    }

    fn inputs(&self) -> Vec<UnitId> {
        self.wiring.map(|(u0, _)| vec![u0]).unwrap_or_default()
    }

    fn output(&self) -> Option<UnitId> {
        self.wiring.map(|(_, utop)| utop)
    }

    fn forward_inputs(
        &mut self,
        arena: &mut UnitArena,
        inputs: &[UnitId],
    ) -> Result<UnitId, NeuraGateError> {
        check_arity(self.kind(), inputs)?;
        self.forward(arena, inputs[0])
    }

    fn backward(&self, arena: &mut UnitArena) -> Result<(), NeuraGateError> {
        let (u0, utop) = self.wiring.ok_or(NeuraGateError::NotReady { gate: self.kind() })?;
        // Recomputed from the input rather than read from utop.
        let s = sigmoid(arena.value(u0)?);
        let upstream = arena.grad(utop)?;
        arena.accumulate_grad(u0, s * (1.0 - s) * upstream)?;
        trace!("SigmoidGate: backward from {} (grad {}) into {}", utop, upstream, u0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;

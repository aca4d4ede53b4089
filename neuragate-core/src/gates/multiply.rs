use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use crate::gates::{check_arity, BinaryWiring, Gate, GateKind};
use crate::unit::Unit;
use log::trace;

/// Product of two units: `utop = u0 * u1`.
#[derive(Debug, Clone, Default)]
pub struct MultiplyGate {
    wiring: Option<BinaryWiring>,
}

impl MultiplyGate {
    pub fn new() -> Self {
        MultiplyGate { wiring: None }
    }

    /// Records `u0` and `u1` and pushes a new output unit holding their product.
    pub fn forward(
        &mut self,
        arena: &mut UnitArena,
        u0: UnitId,
        u1: UnitId,
    ) -> Result<UnitId, NeuraGateError> {
        let value = arena.value(u0)? * arena.value(u1)?;
        let utop = arena.push(Unit::with_value(value));
        trace!("MultiplyGate: {} * {} -> {} = {}", u0, u1, utop, value);
        self.wiring = Some(BinaryWiring { u0, u1, utop });
        Ok(utop)
    }
}

impl Gate for MultiplyGate {
    fn kind(&self) -> GateKind {
        GateKind::Multiply
    }

    fn inputs(&self) -> Vec<UnitId> {
        self.wiring.map(|w| vec![w.u0, w.u1]).unwrap_or_default()
    }

    fn output(&self) -> Option<UnitId> {
        self.wiring.map(|w| w.utop)
    }

    fn forward_inputs(
        &mut self,
        arena: &mut UnitArena,
        inputs: &[UnitId],
    ) -> Result<UnitId, NeuraGateError> {
        check_arity(self.kind(), inputs)?;
        self.forward(arena, inputs[0], inputs[1])
    }

    fn backward(&self, arena: &mut UnitArena) -> Result<(), NeuraGateError> {
        let BinaryWiring { u0, u1, utop } = self.wiring.ok_or(NeuraGateError::NotReady {
            gate: self.kind(),
        })?;
        let upstream = arena.grad(utop)?;
        // Read both values before writing: u0 and u1 may be the same unit.
        let v0 = arena.value(u0)?;
        let v1 = arena.value(u1)?;
        arena.accumulate_grad(u0, v1 * upstream)?;
        arena.accumulate_grad(u1, v0 * upstream)?;
        trace!("MultiplyGate: backward from {} (grad {}) into {}, {}", utop, upstream, u0, u1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "multiply_test.rs"]
mod tests;

use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use crate::gates::{check_arity, BinaryWiring, Gate, GateKind};
use crate::unit::Unit;
use log::trace;

/// Sum of two units: `utop = u0 + u1`.
#[derive(Debug, Clone, Default)]
pub struct AddGate {
    wiring: Option<BinaryWiring>,
}

impl AddGate {
    pub fn new() -> Self {
        AddGate { wiring: None }
    }

    pub fn forward(
        &mut self,
        arena: &mut UnitArena,
        u0: UnitId,
        u1: UnitId,
    ) -> Result<UnitId, NeuraGateError> {
        let value = arena.value(u0)? + arena.value(u1)?;
        let utop = arena.push(Unit::with_value(value));
        trace!("AddGate: {} + {} -> {} = {}", u0, u1, utop, value);
        self.wiring = Some(BinaryWiring { u0, u1, utop });
        Ok(utop)
    }
}

impl Gate for AddGate {
    fn kind(&self) -> GateKind {
        GateKind::Add
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
        // d(u0 + u1)/du0 = d(u0 + u1)/du1 = 1
        let upstream = arena.grad(utop)?;
        arena.accumulate_grad(u0, upstream)?;
        arena.accumulate_grad(u1, upstream)?;
        trace!("AddGate: backward from {} (grad {}) into {}, {}", utop, upstream, u0, u1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;

use crate::arena::UnitId;
use crate::gates::GateKind;
use thiserror::Error;

/// Custom error type for the NeuraGate engine.
///
/// Arithmetic over `f64` is total, so the variants here only describe misuse of
/// the graph: calling things in the wrong order or with handles that do not
/// belong to the arena.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NeuraGateError {
    #[error("{gate:?} gate backward called before forward: no output unit exists yet")]
    NotReady { gate: GateKind },

    #[error("Invalid unit handle {id}: arena holds {len} units")]
    InvalidHandle { id: UnitId, len: usize },

    #[error("{gate:?} gate expects {expected} input(s), got {actual}")]
    ArityMismatch {
        gate: GateKind,
        expected: usize,
        actual: usize,
    },

    #[error("Step size must be finite, got {0}")]
    InvalidStepSize(f64),
}

//! Scalar reverse-mode automatic differentiation over a graph of gates.
//!
//! Units live in a [`UnitArena`] and are referred to by [`UnitId`] handles.
//! Gates ([`MultiplyGate`], [`AddGate`], [`SigmoidGate`]) compute a fresh output
//! unit on `forward` and chain the output's gradient into their inputs on
//! `backward`. The caller wires the gates and runs them in order;
//! [`SingleNeuron`] is a ready-made `sigmoid(a*x + b*y + c)` circuit.

pub mod arena;
pub mod autograd;
pub mod error;
pub mod gates;
pub mod graph;
pub mod optim;
pub mod unit;
pub mod utils;

pub use arena::{UnitArena, UnitId};
pub use error::NeuraGateError;
pub use gates::{sigmoid, AddGate, Gate, GateKind, MultiplyGate, SigmoidGate};
pub use graph::{forward_circuit_fast, SingleNeuron};
pub use unit::Unit;
// Re-export traits required by public functions
pub use num_traits;

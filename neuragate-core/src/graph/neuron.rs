use crate::arena::{UnitArena, UnitId};
use crate::error::NeuraGateError;
use crate::gates::{sigmoid, AddGate, Gate, GateKind, MultiplyGate, SigmoidGate};
use log::{debug, warn};

/// Handles to the five inputs of a [`SingleNeuron`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeuronLeaves {
    pub a: UnitId,
    pub b: UnitId,
    pub c: UnitId,
    pub x: UnitId,
    pub y: UnitId,
}

impl NeuronLeaves {
    /// Leaves in `a, b, c, x, y` order.
    pub fn to_array(self) -> [UnitId; 5] {
        [self.a, self.b, self.c, self.x, self.y]
    }
}

/// A single neuron `sigmoid(a*x + b*y + c)` wired from five gates.
///
/// ```text
/// a ─┐
///    mulg0 ─┐
/// x ─┘      addg0 ─┐
/// b ─┐      │      addg1 ── sg0 ── output
///    mulg1 ─┘  c ──┘
/// y ─┘
/// ```
///
/// The traversal order is fixed by hand: forward runs the gates in data
/// dependency order and backward runs them in exactly the reverse order.
#[derive(Debug, Clone)]
pub struct SingleNeuron {
    arena: UnitArena,
    leaves: NeuronLeaves,
    // Arena slots `start..end` written by the latest successful forward pass.
    pass: Option<(usize, usize)>,
    mulg0: MultiplyGate,
    mulg1: MultiplyGate,
    addg0: AddGate,
    addg1: AddGate,
    sg0: SigmoidGate,
    output: Option<UnitId>,
}

impl SingleNeuron {
    pub fn new(a: f64, b: f64, c: f64, x: f64, y: f64) -> Self {
        let mut arena = UnitArena::new();
        let leaves = NeuronLeaves {
            a: arena.leaf(a),
            b: arena.leaf(b),
            c: arena.leaf(c),
            x: arena.leaf(x),
            y: arena.leaf(y),
        };
        SingleNeuron {
            arena,
            leaves,
            pass: None,
            mulg0: MultiplyGate::new(),
            mulg1: MultiplyGate::new(),
            addg0: AddGate::new(),
            addg1: AddGate::new(),
            sg0: SigmoidGate::new(),
            output: None,
        }
    }

    pub fn leaves(&self) -> NeuronLeaves {
        self.leaves
    }

    /// The trainable units, i.e. all five leaves.
    pub fn parameters(&self) -> Vec<UnitId> {
        self.leaves.to_array().to_vec()
    }

    pub fn arena(&self) -> &UnitArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut UnitArena {
        &mut self.arena
    }

    /// Output handle of the latest forward pass.
    pub fn output(&self) -> Option<UnitId> {
        self.output
    }

    pub fn leaf_values(&self) -> Result<[f64; 5], NeuraGateError> {
        let [a, b, c, x, y] = self.leaves.to_array();
        Ok([
            self.arena.value(a)?,
            self.arena.value(b)?,
            self.arena.value(c)?,
            self.arena.value(x)?,
            self.arena.value(y)?,
        ])
    }

    pub fn leaf_grads(&self) -> Result<[f64; 5], NeuraGateError> {
        let [a, b, c, x, y] = self.leaves.to_array();
        Ok([
            self.arena.grad(a)?,
            self.arena.grad(b)?,
            self.arena.grad(c)?,
            self.arena.grad(x)?,
            self.arena.grad(y)?,
        ])
    }

    /// Evaluates the circuit from the current leaf values.
    ///
    /// Every gate produces a fresh output unit with a zero gradient; leaf
    /// gradients are kept. Outputs of the previous pass are reclaimed when they
    /// still sit at the top of the arena. If the caller pushed units of its own
    /// after them, they are left in place so those units keep their handles.
    pub fn forward(&mut self) -> Result<UnitId, NeuraGateError> {
        self.output = None;
        match self.pass.take() {
            Some((start, end)) if end == self.arena.len() => self.arena.truncate(start),
            Some(_) => debug!("SingleNeuron: arena grew since last forward, keeping old outputs"),
            None => {}
        }
        let start = self.arena.len();
        let NeuronLeaves { a, b, c, x, y } = self.leaves;
        let arena = &mut self.arena;

        let ax = self.mulg0.forward(arena, a, x)?;
        let by = self.mulg1.forward(arena, b, y)?;
        let axpby = self.addg0.forward(arena, ax, by)?;
        let axpbypc = self.addg1.forward(arena, axpby, c)?;
        let s = self.sg0.forward(arena, axpbypc)?;

        self.pass = Some((start, self.arena.len()));
        self.output = Some(s);
        debug!("SingleNeuron: forward -> {}", self.arena.value(s)?);
        Ok(s)
    }

    /// Value of the latest forward pass.
    pub fn output_value(&self) -> Result<f64, NeuraGateError> {
        let out = self.output.ok_or(NeuraGateError::NotReady {
            gate: GateKind::Sigmoid,
        })?;
        self.arena.value(out)
    }

    /// Fresh backward pass: zeroes every gradient, seeds the output with 1.0,
    /// then chains back to the leaves.
    pub fn backward(&mut self) -> Result<(), NeuraGateError> {
        debug!("SingleNeuron: zeroing gradients before backward");
        self.arena.zero_grad();
        self.backward_from_seed()
    }

    /// Backward pass that keeps whatever gradients the leaves already carry.
    ///
    /// Only the output is re-seeded, so running this after a previous backward
    /// adds the new gradients on top of the old ones.
    pub fn backward_accumulate(&mut self) -> Result<(), NeuraGateError> {
        let grads = self.leaf_grads()?;
        if grads.iter().any(|g| *g != 0.0) {
            warn!(
                "SingleNeuron: accumulating backward over non-zero leaf gradients {:?}",
                grads
            );
        }
        self.backward_from_seed()
    }

    fn backward_from_seed(&mut self) -> Result<(), NeuraGateError> {
        let out = self.output.ok_or(NeuraGateError::NotReady {
            gate: self.sg0.kind(),
        })?;
        self.arena.set_grad(out, 1.0)?;

        let arena = &mut self.arena;
        self.sg0.backward(arena)?;
        self.addg1.backward(arena)?;
        self.addg0.backward(arena)?;
        self.mulg1.backward(arena)?;
        self.mulg0.backward(arena)?;

        debug!("SingleNeuron: backward done, leaf grads {:?}", self.leaf_grads()?);
        Ok(())
    }
}

/// Closed-form evaluation of the same neuron, without building a graph.
pub fn forward_circuit_fast(a: f64, b: f64, c: f64, x: f64, y: f64) -> f64 {
    sigmoid(a * x + b * y + c)
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;

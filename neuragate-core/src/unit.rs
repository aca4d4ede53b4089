/// A scalar wire of the circuit.
///
/// `value` is computed during the forward pass (or chosen by the caller for a
/// leaf). `grad` is the derivative of the circuit output with respect to this
/// unit, accumulated with `+=` during the backward pass. Nothing is validated:
/// NaN and infinities are stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Unit {
    pub value: f64,
    pub grad: f64,
}

impl Unit {
    /// Creates a unit with exactly the given fields.
    pub fn new(value: f64, grad: f64) -> Self {
        Unit { value, grad }
    }

    /// Creates a unit with the given value and a zero gradient.
    ///
    /// This is how both external inputs and gate outputs start their life.
    pub fn with_value(value: f64) -> Self {
        Unit { value, grad: 0.0 }
    }

    /// Resets the accumulated gradient to zero.
    pub fn zero_grad(&mut self) {
        self.grad = 0.0;
    }
}

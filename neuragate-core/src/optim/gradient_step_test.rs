#[cfg(test)]
mod tests {
    use crate::{
        arena::UnitArena,
        error::NeuraGateError,
        graph::SingleNeuron,
        optim::{GradientStep, Optimizer, DEFAULT_STEP_SIZE},
        unit::Unit,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_step_moves_along_gradient() -> Result<(), NeuraGateError> {
        let mut arena = UnitArena::new();
        let p = arena.push(Unit::new(1.0, 0.5));
        let q = arena.push(Unit::new(-2.0, -4.0));
        let frozen = arena.push(Unit::new(3.0, 10.0));

        let mut optimizer = GradientStep::new(vec![p, q], 0.1)?;
        assert_eq!(optimizer.params(), &[p, q]);
        optimizer.step(&mut arena)?;

        assert_relative_eq!(arena.value(p)?, 1.05, epsilon = 1e-12);
        assert_relative_eq!(arena.value(q)?, -2.4, epsilon = 1e-12);
        assert_eq!(arena.value(frozen)?, 3.0);
        // gradients are left for the caller to clear
        assert_eq!(arena.grad(p)?, 0.5);
        Ok(())
    }

    #[test]
    fn test_zero_grad_only_touches_params() -> Result<(), NeuraGateError> {
        let mut arena = UnitArena::new();
        let p = arena.push(Unit::new(1.0, 0.5));
        let other = arena.push(Unit::new(1.0, 0.5));
        let mut optimizer = GradientStep::with_default_step_size([p]);
        optimizer.zero_grad(&mut arena)?;
        assert_eq!(arena.grad(p)?, 0.0);
        assert_eq!(arena.grad(other)?, 0.5);
        Ok(())
    }

    #[test]
    fn test_step_size_validation() {
        assert_eq!(
            GradientStep::new(Vec::new(), f64::NAN).unwrap_err().to_string(),
            "Step size must be finite, got NaN"
        );
        let mut optimizer = GradientStep::with_default_step_size(Vec::new());
        assert_eq!(optimizer.step_size(), DEFAULT_STEP_SIZE);
        assert!(optimizer.set_step_size(f64::INFINITY).is_err());
        optimizer.set_step_size(-0.5).unwrap();
        assert_eq!(optimizer.step_size(), -0.5);
    }

    #[test]
    fn test_neuron_output_increases_after_step() -> Result<(), NeuraGateError> {
        let mut neuron = SingleNeuron::new(1.0, 2.0, -3.0, -1.0, 3.0);
        let before = {
            neuron.forward()?;
            neuron.output_value()?
        };
        neuron.backward()?;

        let mut optimizer = GradientStep::with_default_step_size(neuron.parameters());
        assert_eq!(optimizer.params(), neuron.leaves().to_array().as_slice());
        optimizer.step(neuron.arena_mut())?;
        neuron.forward()?;
        let after = neuron.output_value()?;

        assert!(after > before, "{after} should exceed {before}");
        assert_relative_eq!(after, 0.8825, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_stale_param_handle() {
        let mut arena = UnitArena::new();
        let p = arena.leaf(1.0);
        arena.truncate(0);
        let mut optimizer = GradientStep::with_default_step_size([p]);
        assert!(matches!(
            optimizer.step(&mut arena),
            Err(NeuraGateError::InvalidHandle { .. })
        ));
    }
}

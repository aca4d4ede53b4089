use approx::assert_relative_eq;
use neuragate_core::autograd::{check_neuron_grad, GradCheckConfig};
use neuragate_core::optim::{GradientStep, Optimizer};
use neuragate_core::utils::testing::{arena_with_leaves, check_grads_near};
use neuragate_core::{AddGate, MultiplyGate, SigmoidGate, SingleNeuron};
use rand::Rng;

mod common;
use common::{backward_in_reverse, init_logger};

#[test]
fn test_hand_wired_matches_single_neuron() {
    init_logger();
    let (mut arena, ids) = arena_with_leaves(&[1.0, 2.0, -3.0, -1.0, 3.0]);
    let (a, b, c, x, y) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

    let mut mulg0 = MultiplyGate::new();
    let mut mulg1 = MultiplyGate::new();
    let mut addg0 = AddGate::new();
    let mut addg1 = AddGate::new();
    let mut sg0 = SigmoidGate::new();

    let ax = mulg0.forward(&mut arena, a, x).unwrap();
    let by = mulg1.forward(&mut arena, b, y).unwrap();
    let axpby = addg0.forward(&mut arena, ax, by).unwrap();
    let axpbypc = addg1.forward(&mut arena, axpby, c).unwrap();
    let s = sg0.forward(&mut arena, axpbypc).unwrap();
    assert_relative_eq!(arena.value(s).unwrap(), 0.8808, epsilon = 1e-4);

    arena.set_grad(s, 1.0).unwrap();
    backward_in_reverse(&[&mulg0, &mulg1, &addg0, &addg1, &sg0], &mut arena);

    let mut neuron = SingleNeuron::new(1.0, 2.0, -3.0, -1.0, 3.0);
    neuron.forward().unwrap();
    neuron.backward().unwrap();
    check_grads_near(&arena, &ids, &neuron.leaf_grads().unwrap(), 1e-15);
    check_grads_near(&arena, &ids, &[-0.105, 0.315, 0.105, 0.105, 0.210], 1e-3);
}

#[test]
fn test_shared_unit_receives_sum_of_contributions() {
    init_logger();
    // f = x*y + x, so df/dx = y + 1
    let (mut arena, ids) = arena_with_leaves(&[3.0, -2.0]);
    let (x, y) = (ids[0], ids[1]);
    let mut mul = MultiplyGate::new();
    let mut add = AddGate::new();
    let xy = mul.forward(&mut arena, x, y).unwrap();
    let out = add.forward(&mut arena, xy, x).unwrap();
    arena.set_grad(out, 1.0).unwrap();
    backward_in_reverse(&[&mul, &add], &mut arena);
    check_grads_near(&arena, &[x, y], &[-1.0, 3.0], 1e-15);
}

#[test]
fn test_random_points_pass_grad_check() {
    init_logger();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let p: Vec<f64> = (0..5).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let mut neuron = SingleNeuron::new(p[0], p[1], p[2], p[3], p[4]);
        check_neuron_grad(&mut neuron, GradCheckConfig::default()).unwrap();
    }
}

#[test]
fn test_repeated_steps_keep_increasing_output() {
    init_logger();
    let mut neuron = SingleNeuron::new(1.0, 2.0, -3.0, -1.0, 3.0);
    let mut optimizer = GradientStep::with_default_step_size(neuron.parameters());
    neuron.forward().unwrap();
    let mut previous = neuron.output_value().unwrap();
    for _ in 0..10 {
        neuron.backward().unwrap();
        optimizer.step(neuron.arena_mut()).unwrap();
        neuron.forward().unwrap();
        let current = neuron.output_value().unwrap();
        assert!(current > previous);
        previous = current;
    }
    assert!(previous < 1.0);
}

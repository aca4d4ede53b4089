use neuragate_core::{Gate, UnitArena};

// Shared by several test crates; not every helper is used by each of them.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs `backward` on `gates` in reverse order, the opposite of how they were
/// forwarded.
#[allow(dead_code)]
pub fn backward_in_reverse(gates: &[&dyn Gate], arena: &mut UnitArena) {
    for gate in gates.iter().rev() {
        gate.backward(arena).expect("backward failed");
    }
}

use crate::arena::{UnitArena, UnitId};

/// Checks that the units behind `ids` carry the expected gradients.
/// Panics with the offending index if any gradient differs by more than `tolerance`.
pub fn check_grads_near(arena: &UnitArena, ids: &[UnitId], expected: &[f64], tolerance: f64) {
    assert_eq!(ids.len(), expected.len(), "Length mismatch");

    for (i, (id, e)) in ids.iter().zip(expected.iter()).enumerate() {
        let actual = arena
            .grad(*id)
            .expect("Invalid handle in check_grads_near");
        let diff = (actual - e).abs();
        if diff > tolerance {
            panic!(
                "Gradient mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, actual, e, diff, tolerance
            );
        }
    }
}

/// Builds an arena holding one leaf per value.
pub fn arena_with_leaves(values: &[f64]) -> (UnitArena, Vec<UnitId>) {
    let mut arena = UnitArena::new();
    let ids = values.iter().map(|&v| arena.leaf(v)).collect();
    (arena, ids)
}

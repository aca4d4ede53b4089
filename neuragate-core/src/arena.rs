use crate::error::NeuraGateError;
use crate::unit::Unit;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handle to a [`Unit`] stored in a [`UnitArena`].
///
/// Gates hold handles instead of references, so several gates can name the
/// same input unit while the arena stays the single owner of all values and
/// gradients. A handle remembers which arena issued it and the generation of
/// its slot, so handles from another arena, or to a slot reclaimed by
/// [`UnitArena::truncate`], are rejected instead of aliasing a newer unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    arena: usize,
    index: usize,
    generation: u32,
}

impl UnitId {
    /// Position of the unit inside its arena.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("#{}", self.index))
    }
}

static NEXT_ARENA_ID: AtomicUsize = AtomicUsize::new(0);

/// Owns every unit of a circuit, leaves and gate outputs alike.
///
/// Units are only ever appended; a handle stays valid until the arena is
/// [`truncate`](UnitArena::truncate)d below it. A cloned arena keeps the
/// identity of the original, so handles stay usable on the copy.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitArena {
    id: usize,
    // Bumped by every truncation that drops units; new slots take its value.
    generation: u32,
    units: Vec<Unit>,
    generations: Vec<u32>,
}

impl Default for UnitArena {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitArena {
    pub fn new() -> Self {
        UnitArena {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            units: Vec::new(),
            generations: Vec::new(),
        }
    }

    /// Stores `unit` and returns its handle.
    pub fn push(&mut self, unit: Unit) -> UnitId {
        let id = UnitId {
            arena: self.id,
            index: self.units.len(),
            generation: self.generation,
        };
        self.units.push(unit);
        self.generations.push(self.generation);
        id
    }

    /// Stores an external input with the given value and a zero gradient.
    pub fn leaf(&mut self, value: f64) -> UnitId {
        self.push(Unit::with_value(value))
    }

    /// Whether `id` names a live unit of this arena.
    pub fn contains(&self, id: UnitId) -> bool {
        id.arena == self.id && self.generations.get(id.index) == Some(&id.generation)
    }

    fn check(&self, id: UnitId) -> Result<usize, NeuraGateError> {
        if !self.contains(id) {
            return Err(NeuraGateError::InvalidHandle {
                id,
                len: self.units.len(),
            });
        }
        Ok(id.index)
    }

    pub fn get(&self, id: UnitId) -> Result<&Unit, NeuraGateError> {
        let index = self.check(id)?;
        Ok(&self.units[index])
    }

    pub fn get_mut(&mut self, id: UnitId) -> Result<&mut Unit, NeuraGateError> {
        let index = self.check(id)?;
        Ok(&mut self.units[index])
    }

    pub fn value(&self, id: UnitId) -> Result<f64, NeuraGateError> {
        Ok(self.get(id)?.value)
    }

    pub fn grad(&self, id: UnitId) -> Result<f64, NeuraGateError> {
        Ok(self.get(id)?.grad)
    }

    pub fn set_value(&mut self, id: UnitId, value: f64) -> Result<(), NeuraGateError> {
        self.get_mut(id)?.value = value;
        Ok(())
    }

    /// Overwrites a gradient. Meant for seeding the circuit output with 1.0;
    /// gates use [`accumulate_grad`](UnitArena::accumulate_grad).
    pub fn set_grad(&mut self, id: UnitId, grad: f64) -> Result<(), NeuraGateError> {
        self.get_mut(id)?.grad = grad;
        Ok(())
    }

    /// Adds `contribution` to the gradient of `id`.
    pub fn accumulate_grad(&mut self, id: UnitId, contribution: f64) -> Result<(), NeuraGateError> {
        self.get_mut(id)?.grad += contribution;
        Ok(())
    }

    /// Zeroes the gradient of every unit in the arena.
    pub fn zero_grad(&mut self) {
        self.units.iter_mut().for_each(Unit::zero_grad);
    }

    /// Zeroes the gradients of the given units only.
    pub fn zero_grads(&mut self, ids: &[UnitId]) -> Result<(), NeuraGateError> {
        for &id in ids {
            self.get_mut(id)?.zero_grad();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Drops every unit at or above `len`.
    ///
    /// Used to reclaim the stale outputs of a previous forward pass. Handles
    /// at or above `len` become invalid for good: units pushed afterwards reuse
    /// the slots under a new generation.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.units.len() {
            return;
        }
        log::trace!("UnitArena: reclaiming {} unit(s)", self.units.len() - len);
        self.units.truncate(len);
        self.generations.truncate(len);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        let arena = self.id;
        self.units
            .iter()
            .zip(self.generations.iter())
            .enumerate()
            .map(move |(index, (unit, &generation))| {
                (
                    UnitId {
                        arena,
                        index,
                        generation,
                    },
                    unit,
                )
            })
    }
}

impl fmt::Display for UnitArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UnitArena(len={})", self.units.len())?;
        for (id, unit) in self.iter() {
            writeln!(f, "  {:>4}: value={:.6} grad={:.6}", id, unit.value, unit.grad)?;
        }
        Ok(())
    }
}

use std::collections::VecDeque;

use rand::Rng;

/// Source of randomness for tile spawns.
///
/// Any [`rand::Rng`] works out of the box, so a seeded `StdRng` gives
/// reproducible games. [`ScriptedSource`] replays fixed draws for tests.
pub trait TileSource {
    /// Uniform index in `0..len`. Never called with `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> TileSource for R {
    #[inline]
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of index picks and unit floats.
///
/// Indices are reduced modulo the number of empty cells. Once a queue runs
/// dry it keeps answering `0` / `0.0`, i.e. "first empty cell, spawn a 2".
///
/// ```
/// use twenty48_core::engine::{Board, ScriptedSource};
///
/// let mut src = ScriptedSource::new([15], [0.95]);
/// let b = Board::EMPTY.with_random_tile(&mut src);
/// assert_eq!(b.get(3, 3), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        units: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            units: units.into_iter().collect(),
        }
    }

    /// Draws not yet consumed, as `(indices, units)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.indices.len(), self.units.len())
    }
}

impl TileSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }

    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }
}

//! Subset-sum reachability ("truth") tables.
//!
//! `table.get(i, j)` is true iff some subset of the first `i + 1` units sums
//! to exactly `j`. Building is O(n * capacity) in time and space.

use binpacker_structs::core::WeightedUnit;
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    width: usize,
    weights: Vec<u32>,
    cells: Vec<bool>,
}

impl TruthTable {
    pub fn build(capacity: u32, units: &[WeightedUnit]) -> Self {
        let width = capacity as usize + 1;
        let weights: Vec<u32> = units.iter().map(|u| u.weight()).collect();
        let mut cells = vec![false; weights.len() * width];
        trace!("Building {}x{} truth table", weights.len(), width);

        for (i, &weight) in weights.iter().enumerate() {
            let weight = weight as usize;
            let (prev_rows, rest) = cells.split_at_mut(i * width);
            let row = &mut rest[..width];
            if i == 0 {
                row[0] = true;
                if weight < width {
                    row[weight] = true;
                }
                continue;
            }
            let prev = &prev_rows[(i - 1) * width..];
            for j in 0..width {
                row[j] = if j < weight {
                    prev[j]
                } else {
                    prev[j] || prev[j - weight]
                };
            }
        }

        Self {
            width,
            weights,
            cells,
        }
    }

    pub fn capacity(&self) -> u32 {
        (self.width - 1) as u32
    }

    pub fn num_rows(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of the unit behind row `i`.
    pub fn weight(&self, i: usize) -> u32 {
        self.weights[i]
    }

    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.width..(i + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width)
    }

    /// Out-of-range cells read as unreachable.
    pub fn get(&self, i: usize, j: usize) -> bool {
        i < self.num_rows() && j < self.width && self.cells[i * self.width + j]
    }

    /// Heaviest exact sum reachable using every row, `None` for an empty table.
    pub fn best_reachable(&self) -> Option<u32> {
        let last = self.num_rows().checked_sub(1)?;
        self.row(last)
            .iter()
            .rposition(|&reachable| reachable)
            .map(|j| j as u32)
    }
}

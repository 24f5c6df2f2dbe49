/*
path.rs

Copyright 2026 Hervé Quatremain

This file is part of Numtrail.

Numtrail is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Numtrail is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Numtrail. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Self-avoiding path over the play grid.
//!
//! A complete solution path has a length of the form `3k + 1`, so that the
//! cells along it can hold a chain of equations (value, operator, operand,
//! result, operator, operand, result, and so on).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of visited cells.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cell indices.
    cells: Vec<usize>,

    /// Visited status of the cells. Instead of looking for the cell in the
    /// [`Path::cells`] vector, this [`std::collections::HashSet`] speeds up
    /// the lookup.
    visited: HashSet<usize>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Path {
    /// Create a [`Path`] object with room for the given number of cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a list of cell indices.
    pub fn from_cells(cells: &[usize]) -> Self {
        Self {
            cells: cells.to_vec(),
            visited: cells.iter().copied().collect(),
        }
    }

    /// Remove all the cells from the path.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.visited.clear();
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: usize) {
        self.cells.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path.
    pub fn pop(&mut self) {
        if let Some(c) = self.cells.pop() {
            self.visited.remove(&c);
        }
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: usize) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the path cells as a slice.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Return the first cell in the path.
    pub fn first(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    /// Return the last cell in the path.
    pub fn last(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    /// Whether the path length has the `3k + 1` shape of a complete
    /// equation chain.
    pub fn is_complete_shape(&self) -> bool {
        !self.cells.is_empty() && (self.cells.len() - 1) % 3 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_keeps_the_visited_set_in_sync() {
        let mut path: Path = Path::with_capacity(4);
        path.push(3);
        path.push(4);
        assert!(path.contains(4));
        path.pop();
        assert!(!path.contains(4));
        assert!(path.contains(3));
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn from_cells_fills_the_visited_set() {
        let path: Path = Path::from_cells(&[0, 1, 2, 3]);
        assert!(path.contains(2));
        assert!(!path.contains(9));
        assert_eq!(path.first(), Some(0));
        assert_eq!(path.last(), Some(3));
    }

    #[test]
    fn complete_shape_lengths() {
        assert!(Path::from_cells(&[7]).is_complete_shape());
        assert!(Path::from_cells(&[0, 1, 2, 3]).is_complete_shape());
        assert!(!Path::from_cells(&[0, 1, 2]).is_complete_shape());
        assert!(!Path::from_cells(&[]).is_complete_shape());
    }
}

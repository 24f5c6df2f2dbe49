/*
traced_path.rs

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

//! Manage the player's traced path.
//!
//! The module stores the cells in the order the player traced them, with
//! the undo and redo lists. Adjacency gating belongs to the caller
//! ([`crate::game`]); this object only guarantees that a cell appears at
//! most once.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The cells the player traced, in order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TracedPath {
    /// Traced cells, oldest first.
    cells: Vec<usize>,

    /// Visited status of the cells, for constant-time lookup.
    visited: HashSet<usize>,

    /// Cells removed by undo, newest removal last.
    redo_cells: Vec<usize>,
}

impl TracedPath {
    /// Create a [`TracedPath`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all the cells, including the redo list.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.visited.clear();
        self.redo_cells.clear();
    }

    /// Append a cell to the trace. Return false without changing anything
    /// when the cell is already traced.
    ///
    /// A manual push invalidates the redo list.
    pub fn push(&mut self, cell: usize) -> bool {
        if self.visited.contains(&cell) {
            return false;
        }
        self.cells.push(cell);
        self.visited.insert(cell);
        self.redo_cells.clear();
        true
    }

    /// Remove the head of the trace and remember it for redo.
    pub fn pop(&mut self) -> Option<usize> {
        let cell: usize = self.cells.pop()?;
        self.visited.remove(&cell);
        self.redo_cells.push(cell);
        Some(cell)
    }

    /// Put back the last cell removed by [`TracedPath::pop`].
    pub fn redo(&mut self) -> Option<usize> {
        let cell: usize = self.redo_cells.pop()?;
        self.cells.push(cell);
        self.visited.insert(cell);
        Some(cell)
    }

    /// Return the number of traced cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is traced.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell is part of the trace.
    pub fn contains(&self, cell: usize) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the first traced cell.
    pub fn first(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    /// Return the head of the trace.
    pub fn last(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    /// Return the traced cells as a slice.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_cells_are_rejected() {
        let mut trace: TracedPath = TracedPath::new();
        assert!(trace.push(5));
        assert!(!trace.push(5));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn pop_then_redo_restores_the_head() {
        let mut trace: TracedPath = TracedPath::new();
        trace.push(1);
        trace.push(2);
        assert_eq!(trace.pop(), Some(2));
        assert!(!trace.contains(2));
        assert_eq!(trace.redo(), Some(2));
        assert_eq!(trace.cells(), &[1, 2]);
    }

    #[test]
    fn push_invalidates_the_redo_list() {
        let mut trace: TracedPath = TracedPath::new();
        trace.push(1);
        trace.push(2);
        trace.pop();
        trace.push(3);
        assert_eq!(trace.redo(), None);
        assert_eq!(trace.cells(), &[1, 3]);
    }
}

/*
board.rs

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

//! Assemble the play board from a path and a sequence.
//!
//! The flattened sequence entries are laid along the solution path in
//! order. The surplus entries, beyond the path length, fill the spare cells
//! in shuffled order as distractors, so that spare cells are statistically
//! indistinguishable from path cells.

use log::warn;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::levels::LevelConfig;
use super::numeric::{NumericValue, Operator};
use super::path::Path;
use super::sequence::Sequence;

/// Content of one grid cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum GridEntry {
    /// A number cell: an integer or a reduced fraction.
    Number(NumericValue),

    /// An operator cell.
    Operator(Operator),
}

impl fmt::Display for GridEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridEntry::Number(v) => write!(f, "{v}"),
            GridEntry::Operator(o) => write!(f, "{o}"),
        }
    }
}

/// The play board: one entry per cell, plus the solution path positions.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Board {
    /// Number of cells on one side of the grid.
    grid_size: usize,

    /// Cell contents, indexed by flat cell index. None marks a cell that
    /// was emptied (or never filled).
    entries: Vec<Option<GridEntry>>,

    /// For each cell, its position on the solution path, or None for spare
    /// cells.
    path_pos: Vec<Option<usize>>,
}

impl Board {
    /// Build the board for the level: sequence entries along the path,
    /// surplus entries shuffled into the spare cells.
    ///
    /// # Panics
    ///
    /// The method panics if the sequence is shorter than the path. The
    /// sequence generator is always asked for the full cell count, so a
    /// short sequence is a programming error.
    pub fn build(config: &LevelConfig, path: &Path, sequence: &Sequence) -> Self {
        let cell_count: usize = config.cell_count();
        let mut entries: Vec<Option<GridEntry>> = vec![None; cell_count];
        let mut path_pos: Vec<Option<usize>> = vec![None; cell_count];
        let flattened: Vec<GridEntry> = sequence.to_entries();

        for (pos, cell) in path.cells().iter().enumerate() {
            entries[*cell] = Some(flattened[pos]);
            path_pos[*cell] = Some(pos);
        }

        let mut surplus: Vec<GridEntry> = flattened[path.len()..].to_vec();
        surplus.shuffle(&mut rand::rng());
        let mut surplus_iter = surplus.into_iter();
        for cell in 0..cell_count {
            if entries[cell].is_none() {
                match surplus_iter.next() {
                    Some(e) => entries[cell] = Some(e),
                    None => {
                        warn!("Sequence too short to fill cell {cell}, leaving it empty");
                        break;
                    }
                }
            }
        }

        Self {
            grid_size: config.grid_size,
            entries,
            path_pos,
        }
    }

    /// Return the number of cells on one side of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Return all the cell contents, indexed by flat cell index.
    pub fn entries(&self) -> &[Option<GridEntry>] {
        &self.entries
    }

    /// Return the content of the given cell.
    pub fn entry(&self, cell: usize) -> Option<&GridEntry> {
        self.entries.get(cell).and_then(|e| e.as_ref())
    }

    /// Whether the given cell is on the solution path.
    pub fn is_on_path(&self, cell: usize) -> bool {
        self.path_pos.get(cell).is_some_and(|p| p.is_some())
    }

    /// Return the position of the given cell on the solution path, or None
    /// for spare cells.
    pub fn path_index(&self, cell: usize) -> Option<usize> {
        self.path_pos.get(cell).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random_path::RandomPath;
    use crate::generator::sequence::generate_sequence;

    fn sample_board(level: u32) -> (&'static LevelConfig, Path, Sequence, Board) {
        let config: &LevelConfig = LevelConfig::get(level);
        let path: Path = RandomPath::new(config.grid_size)
            .generate()
            .expect("generation failed");
        let sequence: Sequence = generate_sequence(config, config.cell_count());
        let board: Board = Board::build(config, &path, &sequence);
        (config, path, sequence, board)
    }

    #[test]
    fn every_cell_is_filled() {
        let (config, _, _, board) = sample_board(1);
        assert_eq!(board.entries().len(), config.cell_count());
        assert!(board.entries().iter().all(|e| e.is_some()));
    }

    #[test]
    fn path_cells_carry_the_sequence_in_order() {
        let (_, path, sequence, board) = sample_board(2);
        let flattened: Vec<GridEntry> = sequence.to_entries();
        for (pos, cell) in path.cells().iter().enumerate() {
            assert_eq!(board.entry(*cell), Some(&flattened[pos]));
            assert_eq!(board.path_index(*cell), Some(pos));
            assert!(board.is_on_path(*cell));
        }
    }

    #[test]
    fn spare_cells_are_off_path() {
        let (config, path, _, board) = sample_board(1);
        let spares: usize = (0..config.cell_count())
            .filter(|c| !board.is_on_path(*c))
            .count();
        assert_eq!(spares, config.cell_count() - path.len());
    }
}

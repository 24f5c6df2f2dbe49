/*
random_path.rs

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

//! Generate a random solution path.
//!
//! The generator runs a randomized backtracking depth-first walk from a
//! random start cell, targeting a random length of shape `3k + 1` within
//! the bounds for the grid size. The walk uses an explicit frame stack
//! rather than native recursion: on a 10×10 grid a path can approach one
//! hundred cells.
//!
//! Start and end cells can land anywhere on the grid, border included or
//! not.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Instant;

use super::grid::Grid;
use super::path::Path;

// Maximum number of failed walks before the generator gives up. Hitting the
// ceiling is a hard failure that the caller must surface.
pub const MAX_ATTEMPTS: usize = 1000;

// Budget of forward/backtrack moves for a single walk. A walk that exceeds
// it is abandoned and counts as a failed attempt.
const MAX_WALK_STEPS: usize = 20_000;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// No path found within the attempt ceiling.
    AttemptsExceeded,
}

/// Return the (min, max) path length bounds for the given grid size.
/// Smaller grids get smaller bounds so that a path of a valid length always
/// exists.
pub fn length_bounds(grid_size: usize) -> (usize, usize) {
    let cells: usize = grid_size * grid_size;
    match grid_size {
        6 => (16, 34),
        8 => (28, 62),
        10 => (45, 97),
        _ => ((cells * 4) / 9, cells.saturating_sub(2)),
    }
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Play grid the paths are generated on.
    grid: Grid,

    /// Smallest acceptable path length.
    min_len: usize,

    /// Largest acceptable path length.
    max_len: usize,

    /// Number of walks the last [`RandomPath::generate`] call performed.
    pub attempts: usize,

    /// Duration in seconds of the last [`RandomPath::generate`] call.
    pub duration: f32,

    /// Time when the generation started. Used to compute the
    /// [`RandomPath::duration`].
    start: Instant,
}

impl RandomPath {
    /// Create the object for the given grid size, with the default length
    /// bounds from [`length_bounds`].
    pub fn new(grid_size: usize) -> Self {
        let (min_len, max_len) = length_bounds(grid_size);
        Self::with_bounds(grid_size, min_len, max_len)
    }

    /// Create the object with explicit length bounds.
    pub fn with_bounds(grid_size: usize, min_len: usize, max_len: usize) -> Self {
        let grid: Grid = Grid::new(grid_size);
        Self {
            max_len: max_len.min(grid.cell_count()),
            grid,
            min_len,
            attempts: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Generate and return a random path.
    ///
    /// # Errors
    ///
    /// The method returns an error when no walk produced a path of a valid
    /// length within [`MAX_ATTEMPTS`] tries. The caller can retry, which
    /// reseeds the walk starts, or report the failure.
    pub fn generate(&mut self) -> Result<Path, RandomPathError> {
        self.attempts = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let mut rng = rand::rng();
        while self.attempts < MAX_ATTEMPTS {
            self.attempts += 1;

            let Some(target) = self.pick_target_length(&mut rng) else {
                // No length of shape 3k+1 fits the bounds. Walking cannot
                // help; fail through the attempt ceiling path.
                break;
            };
            let start_cell: usize = rng.random_range(0..self.grid.cell_count());
            debug!(
                "Attempt {}: start cell = {start_cell}  target length = {target}",
                self.attempts
            );

            if let Some(path) = self.walk(start_cell, target) {
                self.duration = self.start.elapsed().as_secs_f32();
                debug!(
                    "Attempts = {}  Duration = {}",
                    self.attempts, self.duration
                );
                return Ok(path);
            }
        }
        self.duration = self.start.elapsed().as_secs_f32();
        Err(RandomPathError::AttemptsExceeded)
    }

    /// Pick a random path length of shape `3k + 1` within the bounds, or
    /// None when the bounds contain no such length.
    fn pick_target_length(&self, rng: &mut impl Rng) -> Option<usize> {
        let min: usize = self.min_len.max(1);
        let first: usize = match (min - 1) % 3 {
            0 => min,
            r => min + (3 - r),
        };
        if first > self.max_len {
            return None;
        }
        let count: usize = (self.max_len - first) / 3 + 1;
        Some(first + 3 * rng.random_range(0..count))
    }

    /// One backtracking walk toward the target length. Return None when the
    /// walk exhausts its moves or its step budget.
    fn walk(&self, start_cell: usize, target: usize) -> Option<Path> {
        let mut path: Path = Path::with_capacity(target);
        path.push(start_cell);

        // One frame per path cell: the neighbors not yet tried from there,
        // in random order.
        let mut frames: Vec<Vec<usize>> = Vec::with_capacity(target);
        frames.push(self.open_neighbors(start_cell, &path));

        let mut steps: usize = 0;
        loop {
            if path.len() == target {
                return Some(path);
            }

            steps += 1;
            if steps > MAX_WALK_STEPS {
                debug!("Walk abandoned after {MAX_WALK_STEPS} moves");
                return None;
            }

            match frames.last_mut().and_then(|f| f.pop()) {
                // The frame was built before deeper cells were visited, so
                // the cell must be re-checked.
                Some(cell) if !path.contains(cell) => {
                    path.push(cell);
                    frames.push(self.open_neighbors(cell, &path));
                }
                Some(_) => (),
                None => {
                    frames.pop();
                    path.pop();
                    if path.is_empty() {
                        return None;
                    }
                }
            }
        }
    }

    /// Return the unvisited in-bounds neighbors of the cell, shuffled to
    /// avoid directional bias.
    fn open_neighbors(&self, cell: usize, path: &Path) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .grid
            .neighbors(cell)
            .into_iter()
            .filter(|c| !path.contains(*c))
            .collect();
        neighbors.shuffle(&mut rand::rng());
        neighbors
    }
}

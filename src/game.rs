/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! A [`Game`] object ties the generators and the validator together for one
//! level: generate the solution path, generate the equation chain, assemble
//! the board, then gate the player's trace and check submissions. The
//! object is constructed by the caller and passed by reference; nothing in
//! the game is process-global.

use log::{debug, info};
use std::time::{Duration, Instant};

use crate::checkpoint::CheckPoint;
use crate::generator::board::Board;
use crate::generator::grid::Grid;
use crate::generator::levels::LevelConfig;
use crate::generator::path::Path;
use crate::generator::random_path::{RandomPath, RandomPathError};
use crate::generator::sequence::{Sequence, generate_sequence};
use crate::mistakes::Mistakes;
use crate::traced_path::TracedPath;
use crate::validator::{self, PartialValidation, Validation, ValidationError};

/// Points scored per completed equation, scaled by the level number.
const POINTS_PER_EQUATION: u64 = 10;

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    /// Current level number.
    pub level: u32,

    /// Board being played.
    pub board: Board,

    /// Solution path the board was built around. The first cell is where
    /// the player must start tracing.
    pub solution: Path,

    /// Cells the player traced so far.
    pub traced: TracedPath,

    /// Whether the game has started.
    pub started: bool,

    /// Whether the puzzle is solved.
    pub solved: bool,

    /// Whether the player paused the game. In that case, the board is
    /// hidden by the rendering layer.
    pub paused: bool,

    /// Score accumulated so far.
    pub score: u64,

    /// Time when the level started. Used to compute the play duration.
    start_time: Instant,

    /// The elapsed time when the player paused the game.
    pause_duration: Option<Duration>,

    /// List of checkpoints set by the player.
    checkpoints: Vec<CheckPoint>,

    /// Mistake counter: rejected trace moves and failed submissions.
    mistakes: Mistakes,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a [`Game`] object.
    pub fn new() -> Self {
        Self {
            level: 0,
            board: Board::default(),
            solution: Path::default(),
            traced: TracedPath::new(),
            started: false,
            solved: false,
            paused: false,
            score: 0,
            start_time: Instant::now(),
            pause_duration: None,
            checkpoints: Vec::new(),
            mistakes: Mistakes::new(),
        }
    }

    /// Clear all resources, including the score.
    pub fn clear(&mut self) {
        self.level = 0;
        self.board = Board::default();
        self.solution.clear();
        self.traced.clear();
        self.started = false;
        self.solved = false;
        self.paused = false;
        self.score = 0;
        self.pause_duration = None;
        self.checkpoints.clear();
        self.mistakes.clear();
    }

    /// Generate a fresh puzzle for the given level and start playing it.
    ///
    /// Any state from a previous level, including an abandoned generation
    /// attempt, is discarded first: stale output is never merged into the
    /// new level.
    ///
    /// # Errors
    ///
    /// The method returns an error when path generation exhausts its
    /// attempt ceiling. The caller can retry or surface the failure.
    ///
    /// # Panics
    ///
    /// The method panics if the level does not exist. Validate
    /// user-provided level numbers with [`LevelConfig::try_get`] first.
    pub fn start_level(&mut self, level: u32) -> Result<(), RandomPathError> {
        let config: &LevelConfig = LevelConfig::get(level);

        self.traced.clear();
        self.checkpoints.clear();
        self.mistakes.clear();
        self.solved = false;
        self.paused = false;
        self.pause_duration = None;

        let mut generator: RandomPath = RandomPath::new(config.grid_size);
        let path: Path = generator.generate()?;
        info!(
            "Level {level}: path of {} cells in {} attempts",
            path.len(),
            generator.attempts
        );
        let sequence: Sequence = generate_sequence(config, config.cell_count());
        self.board = Board::build(config, &path, &sequence);
        self.solution = path;
        self.level = level;
        self.started = true;
        self.start_time = Instant::now();
        Ok(())
    }

    /// Restart the current puzzle: clear the trace but keep the board.
    pub fn reset(&mut self) {
        self.traced.clear();
        self.checkpoints.clear();
        self.paused = false;
        if self.solved {
            self.start_time = Instant::now();
            self.solved = false;
        }
    }

    /// Append a cell to the player's trace. The cell is accepted when it is
    /// on the board, not traced yet, and adjacent to the head of the trace;
    /// the first cell must be the start cell of the puzzle. A rejected move
    /// counts as a mistake.
    pub fn trace_cell(&mut self, cell: usize) -> bool {
        if !self.started {
            return false;
        }
        let grid: Grid = Grid::new(self.board.grid_size());
        let accepted: bool = grid.contains(cell)
            && !self.traced.contains(cell)
            && match self.traced.last() {
                Some(head) => grid.are_adjacent(head, cell),
                None => self.solution.first() == Some(cell),
            };
        if accepted {
            self.traced.push(cell);
        } else {
            debug!("Rejected trace move to cell {cell}");
            self.mistakes.add();
        }
        accepted
    }

    /// Remove the head of the trace.
    pub fn untrace_cell(&mut self) -> Option<usize> {
        self.traced.pop()
    }

    /// Put back the last cell removed with [`Game::untrace_cell`].
    pub fn retrace_cell(&mut self) -> Option<usize> {
        self.traced.redo()
    }

    /// Check the player's complete trace.
    ///
    /// The trace solves the puzzle when it validates, starts at the start
    /// cell, and ends on the puzzle's end cell. A solve freezes the board
    /// and adds the equations to the score. A failed check counts as a
    /// mistake; the structured result is returned either way for the
    /// rendering layer to explain.
    pub fn submit(&mut self) -> Validation {
        if !self.started {
            return Validation {
                is_valid: false,
                error: Some(ValidationError::IncompleteEquation),
                failed_at: None,
            };
        }
        let result: Validation = validator::validate_path(
            self.traced.cells(),
            self.board.entries(),
            self.board.grid_size(),
        );
        if result.is_valid
            && !self.traced.is_empty()
            && self.traced.first() == self.solution.first()
            && self.traced.last() == self.solution.last()
        {
            if !self.solved {
                self.solved = true;
                let equations: u64 = ((self.traced.len() - 1) / 3) as u64;
                self.score += equations * u64::from(self.level) * POINTS_PER_EQUATION;
                info!(
                    "Level {} solved: {equations} equations, score = {}",
                    self.level, self.score
                );
            }
        } else if !result.is_valid {
            self.mistakes.add();
        }
        result
    }

    /// Check the trace in progress, for interactive feedback. Only the
    /// complete equations are evaluated.
    pub fn partial_feedback(&self) -> PartialValidation {
        if !self.started {
            return PartialValidation {
                validation: Validation {
                    is_valid: true,
                    error: None,
                    failed_at: None,
                },
                committed_len: 0,
                uncommitted: 0,
            };
        }
        validator::validate_partial_path(
            self.traced.cells(),
            self.board.entries(),
            self.board.grid_size(),
        )
    }

    /// Cut the trace back to its last arithmetically valid prefix.
    pub fn truncate_to_valid_prefix(&mut self) {
        let feedback: PartialValidation = self.partial_feedback();
        let keep: usize = match feedback.validation.failed_at {
            Some(failed_at) => failed_at + 1,
            None if feedback.validation.is_valid => self.traced.len(),
            None => 0,
        };
        while self.traced.len() > keep {
            self.traced.pop();
        }
    }

    /// Return the number of mistakes so far.
    pub fn mistakes(&self) -> usize {
        self.mistakes.count()
    }

    /// Return the number of checkpoints that the player created.
    pub fn checkpoints_len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Set a checkpoint.
    pub fn set_checkpoint(&mut self) {
        self.checkpoints.push(CheckPoint::new(self));
    }

    /// Revert back to the last checkpoint.
    pub fn undo_checkpoint(&mut self) {
        // The checkpoint is removed
        if let Some(c) = self.checkpoints.pop() {
            self.traced = c.traced;
        }
    }

    /// Pause the game.
    pub fn pause(&mut self) {
        // Store the played time so far, so that the pause time can be
        // deduced when the player resumes the game.
        self.pause_duration = Some(self.start_time.elapsed());
        self.paused = true;
    }

    /// Resume the game.
    pub fn resume(&mut self) {
        // Refresh the elapsed time by removing the pause time.
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed() - d;
            self.pause_duration = None;
        }
        self.paused = false;
    }

    /// Return the play duration.
    pub fn get_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Return the play duration in hours, minutes, and seconds
    pub fn get_duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self.start_time.elapsed().as_secs();
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_game(level: u32) -> Game {
        let mut game: Game = Game::new();
        game.start_level(level).expect("generation failed");
        game
    }

    #[test]
    fn start_level_builds_a_full_board() {
        let game: Game = started_game(1);
        assert!(game.started);
        assert!(!game.solved);
        assert!(game.board.entries().iter().all(|e| e.is_some()));
        assert!(game.solution.len() >= 16);
    }

    #[test]
    fn tracing_the_solution_solves_the_level() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        for cell in &solution {
            assert!(game.trace_cell(*cell), "solution cell {cell} rejected");
        }
        let result: Validation = game.submit();
        assert!(result.is_valid, "{:?}", result.error);
        assert!(game.solved);
        let equations: u64 = ((solution.len() - 1) / 3) as u64;
        assert_eq!(game.score, equations * 10);
    }

    #[test]
    fn the_trace_must_start_on_the_start_cell() {
        let mut game: Game = started_game(1);
        let start: usize = game.solution.first().unwrap();
        let elsewhere: usize = (0..36).find(|c| *c != start).unwrap();
        assert!(!game.trace_cell(elsewhere));
        assert_eq!(game.mistakes(), 1);
        assert!(game.trace_cell(start));
    }

    #[test]
    fn non_adjacent_moves_are_rejected() {
        let mut game: Game = started_game(1);
        let head: usize = game.solution.first().unwrap();
        assert!(game.trace_cell(head));
        let grid: Grid = Grid::new(6);
        let far: usize = (0..36)
            .find(|c| *c != head && !grid.are_adjacent(head, *c))
            .unwrap();
        assert!(!game.trace_cell(far));
        // A traced cell cannot be traced again either.
        assert!(!game.trace_cell(head));
        assert_eq!(game.traced.len(), 1);
    }

    #[test]
    fn checkpoints_restore_the_trace() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        game.trace_cell(solution[0]);
        game.trace_cell(solution[1]);
        game.set_checkpoint();
        game.trace_cell(solution[2]);
        game.trace_cell(solution[3]);
        assert_eq!(game.traced.len(), 4);
        game.undo_checkpoint();
        assert_eq!(game.traced.len(), 2);
        assert_eq!(game.checkpoints_len(), 0);
    }

    #[test]
    fn reset_keeps_the_board() {
        let mut game: Game = started_game(2);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        game.trace_cell(solution[0]);
        let entries_before: Vec<_> = game.board.entries().to_vec();
        game.reset();
        assert!(game.traced.is_empty());
        assert_eq!(game.board.entries(), &entries_before[..]);
    }

    #[test]
    fn starting_a_new_level_discards_the_old_state() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        game.trace_cell(solution[0]);
        game.set_checkpoint();
        game.start_level(2).expect("generation failed");
        assert_eq!(game.level, 2);
        assert!(game.traced.is_empty());
        assert_eq!(game.checkpoints_len(), 0);
        assert_eq!(game.board.grid_size(), 6);
    }

    #[test]
    fn untrace_then_retrace_restores_the_head() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        game.trace_cell(solution[0]);
        game.trace_cell(solution[1]);
        assert_eq!(game.untrace_cell(), Some(solution[1]));
        assert_eq!(game.retrace_cell(), Some(solution[1]));
        assert_eq!(game.traced.cells(), &solution[..2]);
    }

    #[test]
    fn partial_feedback_tracks_the_committed_prefix() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        for cell in &solution[..5] {
            assert!(game.trace_cell(*cell));
        }
        let feedback = game.partial_feedback();
        assert!(feedback.validation.is_valid);
        assert_eq!(feedback.committed_len, 4);
        assert_eq!(feedback.uncommitted, 1);
    }

    #[test]
    fn pause_freezes_the_timer() {
        let mut game: Game = started_game(1);
        game.pause();
        assert!(game.paused);
        game.resume();
        assert!(!game.paused);
        let (h, m, _) = game.get_duration_hms();
        assert_eq!((h, m), (0, 0));
        assert!(game.get_duration().as_secs() < 60);
    }

    #[test]
    fn an_unstarted_game_rejects_everything() {
        let mut game: Game = Game::new();
        assert!(!game.trace_cell(0));
        assert!(!game.submit().is_valid);
        assert_eq!(game.partial_feedback().committed_len, 0);
    }

    #[test]
    fn truncation_keeps_a_valid_trace_intact() {
        let mut game: Game = started_game(1);
        let solution: Vec<usize> = game.solution.cells().to_vec();
        // Trace one full equation plus two dangling cells.
        for cell in &solution[..6] {
            assert!(game.trace_cell(*cell));
        }
        game.truncate_to_valid_prefix();
        assert_eq!(game.traced.len(), 6);
    }
}

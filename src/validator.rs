/*
validator.rs

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

//! Check player paths: continuity and stepwise arithmetic.
//!
//! Validation results are plain return values, never errors: a broken path
//! or a wrong equation is an expected gameplay state. The caller decides
//! what feedback to give, and can truncate the player's path to its last
//! valid prefix.

use log::debug;

use crate::generator::board::GridEntry;
use crate::generator::grid::Grid;
use crate::generator::numeric::{self, NumericValue, Operator};

/// Tolerance when comparing an equation's result cell against the computed
/// value. Covers fraction-to-decimal rounding in puzzle content; exact
/// rational results compare at zero distance anyway.
pub const EPSILON: f64 = 1e-4;

/// Reason a path failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two consecutive path cells are not orthogonal neighbors.
    NotContinuous,

    /// The path length does not have the `3k + 1` shape of a complete
    /// equation chain.
    IncompleteEquation,

    /// A cell is empty or holds the wrong kind of entry for its position.
    InvalidCell,

    /// An equation along the path does not hold. The detail spells out the
    /// operands, the operator, and the computed versus found results.
    Arithmetic { detail: String },
}

/// Result of a path check.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Whether the whole checked range is valid.
    pub is_valid: bool,

    /// Reason of the failure.
    pub error: Option<ValidationError>,

    /// Path position of the first cell of the failing equation, for
    /// arithmetic and cell failures.
    pub failed_at: Option<usize>,
}

impl Validation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
            failed_at: None,
        }
    }

    fn fail(error: ValidationError, failed_at: Option<usize>) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
            failed_at,
        }
    }
}

/// Result of a partial path check, used for interactive feedback while the
/// player is still tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialValidation {
    /// Validation of the committed prefix.
    pub validation: Validation,

    /// Length of the checked prefix (the largest `3k + 1` prefix).
    pub committed_len: usize,

    /// Number of trailing cells that are not part of a complete equation
    /// yet. Those cells are not evaluated.
    pub uncommitted: usize,
}

/// Whether every consecutive pair of path cells is orthogonally adjacent.
/// Empty and single-cell paths are continuous.
pub fn is_path_continuous(path: &[usize], grid_size: usize) -> bool {
    let grid: Grid = Grid::new(grid_size);
    path.windows(2).all(|w| grid.are_adjacent(w[0], w[1]))
}

/// Check a complete path: continuity, length shape, then every equation.
pub fn validate_path(
    path: &[usize],
    entries: &[Option<GridEntry>],
    grid_size: usize,
) -> Validation {
    if !is_path_continuous(path, grid_size) {
        debug!("Path is not continuous: {path:?}");
        return Validation::fail(ValidationError::NotContinuous, None);
    }
    if path.is_empty() {
        return Validation::ok();
    }
    if (path.len() - 1) % 3 != 0 {
        return Validation::fail(ValidationError::IncompleteEquation, None);
    }
    check_equations(path, entries, path.len())
}

/// Check a path still being traced: continuity over the whole path, then
/// the equations of the largest `3k + 1` prefix. Trailing cells beyond the
/// prefix are reported but never evaluated.
pub fn validate_partial_path(
    path: &[usize],
    entries: &[Option<GridEntry>],
    grid_size: usize,
) -> PartialValidation {
    let committed_len: usize = if path.is_empty() {
        0
    } else {
        path.len() - (path.len() - 1) % 3
    };
    let validation: Validation = if !is_path_continuous(path, grid_size) {
        Validation::fail(ValidationError::NotContinuous, None)
    } else {
        check_equations(path, entries, committed_len)
    };
    PartialValidation {
        validation,
        committed_len,
        uncommitted: path.len() - committed_len,
    }
}

/// Check the equations of `path[..limit]`, one window of four cells every
/// three positions. Stop at the first failure.
fn check_equations(path: &[usize], entries: &[Option<GridEntry>], limit: usize) -> Validation {
    let mut start: usize = 0;
    while start + 3 < limit {
        let window: &[usize] = &path[start..start + 4];
        let Some((num1, operator, num2, found)) = extract_equation(window, entries) else {
            debug!("Invalid cell values in window starting at {start}");
            return Validation::fail(ValidationError::InvalidCell, Some(start));
        };
        let Some(computed) = numeric::apply(operator, &num1, &num2) else {
            return Validation::fail(
                ValidationError::Arithmetic {
                    detail: format!("{num1} {operator} {num2} is undefined"),
                },
                Some(start),
            );
        };
        if (computed.to_f64() - found.to_f64()).abs() >= EPSILON {
            debug!("Equation failed at {start}: {num1} {operator} {num2} != {found}");
            return Validation::fail(
                ValidationError::Arithmetic {
                    detail: format!("{num1} {operator} {num2} = {computed}, not {found}"),
                },
                Some(start),
            );
        }
        start += 3;
    }
    Validation::ok()
}

/// Extract (number, operator, number, number) from the four cells of an
/// equation window. Return None when a cell is missing or holds the wrong
/// kind of entry.
fn extract_equation(
    window: &[usize],
    entries: &[Option<GridEntry>],
) -> Option<(NumericValue, Operator, NumericValue, NumericValue)> {
    Some((
        number_at(entries, window[0])?,
        operator_at(entries, window[1])?,
        number_at(entries, window[2])?,
        number_at(entries, window[3])?,
    ))
}

fn number_at(entries: &[Option<GridEntry>], cell: usize) -> Option<NumericValue> {
    match entries.get(cell)? {
        Some(GridEntry::Number(v)) => Some(*v),
        _ => None,
    }
}

fn operator_at(entries: &[Option<GridEntry>], cell: usize) -> Option<Operator> {
    match entries.get(cell)? {
        Some(GridEntry::Operator(o)) => Some(*o),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::board::Board;
    use crate::generator::levels::{LevelConfig, NUM_LEVELS};
    use crate::generator::path::Path;
    use crate::generator::random_path::RandomPath;
    use crate::generator::sequence::{Sequence, generate_sequence};

    /// Entries for a 4×4 grid with the given values in row zero.
    fn row_entries(first_row: [GridEntry; 4]) -> Vec<Option<GridEntry>> {
        let mut entries: Vec<Option<GridEntry>> = vec![None; 16];
        for (i, e) in first_row.into_iter().enumerate() {
            entries[i] = Some(e);
        }
        entries
    }

    fn int(i: i64) -> GridEntry {
        GridEntry::Number(NumericValue::Integer(i))
    }

    fn op(o: Operator) -> GridEntry {
        GridEntry::Operator(o)
    }

    #[test]
    fn a_correct_equation_validates() {
        let entries = row_entries([int(4), op(Operator::Add), int(3), int(7)]);
        let result: Validation = validate_path(&[0, 1, 2, 3], &entries, 4);
        assert!(result.is_valid);
        assert_eq!(result.error, None);
    }

    #[test]
    fn a_wrong_result_fails_at_the_window_start() {
        let entries = row_entries([int(4), op(Operator::Add), int(3), int(8)]);
        let result: Validation = validate_path(&[0, 1, 2, 3], &entries, 4);
        assert!(!result.is_valid);
        assert_eq!(result.failed_at, Some(0));
        assert!(matches!(
            result.error,
            Some(ValidationError::Arithmetic { .. })
        ));
    }

    #[test]
    fn a_broken_path_fails_before_arithmetic() {
        // Cell 11 is not adjacent to cell 1 on a 10-wide grid, and the cell
        // contents would not even parse as an equation.
        let entries: Vec<Option<GridEntry>> = vec![None; 100];
        let result: Validation = validate_path(&[0, 1, 11], &entries, 10);
        assert_eq!(result.error, Some(ValidationError::NotContinuous));
    }

    #[test]
    fn empty_and_single_cell_paths_are_continuous() {
        assert!(is_path_continuous(&[], 6));
        assert!(is_path_continuous(&[17], 6));
        let entries: Vec<Option<GridEntry>> = vec![None; 36];
        assert!(validate_path(&[], &entries, 6).is_valid);
    }

    #[test]
    fn a_bad_length_shape_is_incomplete() {
        let entries = row_entries([int(4), op(Operator::Add), int(3), int(7)]);
        let result: Validation = validate_path(&[0, 1, 2], &entries, 4);
        assert_eq!(result.error, Some(ValidationError::IncompleteEquation));
    }

    #[test]
    fn missing_cells_are_reported_not_crashed() {
        let mut entries = row_entries([int(4), op(Operator::Add), int(3), int(7)]);
        entries[2] = None;
        let result: Validation = validate_path(&[0, 1, 2, 3], &entries, 4);
        assert_eq!(result.error, Some(ValidationError::InvalidCell));
        assert_eq!(result.failed_at, Some(0));
    }

    #[test]
    fn an_operator_in_a_number_slot_is_an_invalid_cell() {
        let entries = row_entries([int(4), op(Operator::Add), op(Operator::Mul), int(7)]);
        let result: Validation = validate_path(&[0, 1, 2, 3], &entries, 4);
        assert_eq!(result.error, Some(ValidationError::InvalidCell));
    }

    #[test]
    fn fraction_cells_validate_within_epsilon() {
        let entries = row_entries([
            int(8),
            op(Operator::Mul),
            GridEntry::Number(NumericValue::ratio(1, 2).unwrap()),
            int(4),
        ]);
        assert!(validate_path(&[0, 1, 2, 3], &entries, 4).is_valid);
    }

    #[test]
    fn partial_validation_truncates_to_the_prefix() {
        // Two chained equations on a 7-cell prefix of an 8-wide grid row,
        // plus a trailing cell that is not part of a complete equation yet.
        // The trailing cell holds garbage that must never be evaluated.
        let mut entries: Vec<Option<GridEntry>> = vec![None; 64];
        let row = [
            int(4),
            op(Operator::Add),
            int(3),
            int(7),
            op(Operator::Sub),
            int(2),
            int(5),
            op(Operator::Mul),
        ];
        for (i, e) in row.into_iter().enumerate() {
            entries[i] = Some(e);
        }
        let path: Vec<usize> = (0..8).collect();
        let result: PartialValidation = validate_partial_path(&path, &entries, 8);
        assert_eq!(result.committed_len, 7);
        assert_eq!(result.uncommitted, 1);
        assert!(result.validation.is_valid);
    }

    #[test]
    fn partial_validation_reports_failures_in_the_prefix() {
        let mut entries: Vec<Option<GridEntry>> = vec![None; 64];
        let row = [int(4), op(Operator::Add), int(3), int(9), op(Operator::Sub)];
        for (i, e) in row.into_iter().enumerate() {
            entries[i] = Some(e);
        }
        let path: Vec<usize> = (0..5).collect();
        let result: PartialValidation = validate_partial_path(&path, &entries, 8);
        assert_eq!(result.committed_len, 4);
        assert_eq!(result.uncommitted, 1);
        assert!(!result.validation.is_valid);
        assert_eq!(result.validation.failed_at, Some(0));
    }

    #[test]
    fn generated_boards_validate_round_trip() {
        // The generator and the validator must agree: the solution path of
        // every generated board re-validates.
        for level in 1..=NUM_LEVELS {
            let config: &LevelConfig = LevelConfig::get(level);
            let path: Path = RandomPath::new(config.grid_size)
                .generate()
                .expect("generation failed");
            let sequence: Sequence = generate_sequence(config, config.cell_count());
            let board: Board = Board::build(config, &path, &sequence);
            let result: Validation =
                validate_path(path.cells(), board.entries(), config.grid_size);
            assert!(
                result.is_valid,
                "level {level}: {:?} at {:?}",
                result.error, result.failed_at
            );
        }
    }
}

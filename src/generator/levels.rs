/*
levels.rs

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

//! Level parameter table.
//!
//! Each level is described by an immutable [`LevelConfig`] entry that the
//! generators consume: numeric range, grid size, fraction rules, and the
//! bias knobs that shape the feel of the arithmetic at that level.
//!
//! The table is the single place where difficulty is tuned. The progression:
//!
//! * levels 1 to 3 (6×6 grid): integers only, growing numeric range;
//! * levels 4 to 6 (8×8 grid): fractions appear, first unit fractions
//!   without division, then unit fractions with division, then general
//!   fractions;
//! * levels 7 to 10 (10×10 grid): fraction multiplication and division
//!   dominate, with results forced back to whole numbers.

use serde::Serialize;

/// Number of levels in the game.
pub const NUM_LEVELS: u32 = 10;

/// Generation parameters for one level.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LevelConfig {
    /// Level number, from 1 to [`NUM_LEVELS`].
    pub level: u32,

    /// Number of cells on one side of the play grid.
    pub grid_size: usize,

    /// Upper bound for every value placed on the grid.
    pub max_num: i64,

    /// Whether fraction values and fraction operands are permitted.
    pub allow_fractions: bool,

    /// Largest denominator a fraction may carry, after reduction.
    pub max_denominator: i64,

    /// Restrict fraction operands to unit fractions (numerator of one).
    pub unit_fractions_only: bool,

    /// Whether dividing by a fraction is permitted.
    pub allow_divide_by_fraction: bool,

    /// Require whole-number results even when an operand is a fraction.
    pub strict_integer_results: bool,

    /// Probability of attempting a fraction multiplication or division for
    /// a step, when fractions are permitted.
    pub fraction_op_bias: f64,

    /// Probability of preferring a non-unit fraction over a unit fraction,
    /// when non-unit fractions are permitted.
    pub non_unit_bias: f64,

    /// Always open each step with fraction attempts, falling back to a
    /// large add/subtract step after [`LevelConfig::fraction_attempt_cap`]
    /// failed constructions.
    pub force_fraction_ops: bool,

    /// Number of fraction constructions to attempt per step when
    /// [`LevelConfig::force_fraction_ops`] is set.
    pub fraction_attempt_cap: usize,

    /// Intermediate values above this threshold are steered back down with
    /// a subtraction or an exact division.
    pub shrink_threshold: i64,
}

/// The level table. Index 0 holds level 1.
static LEVELS: [LevelConfig; NUM_LEVELS as usize] = [
    LevelConfig {
        level: 1,
        grid_size: 6,
        max_num: 20,
        allow_fractions: false,
        max_denominator: 0,
        unit_fractions_only: false,
        allow_divide_by_fraction: false,
        strict_integer_results: false,
        fraction_op_bias: 0.0,
        non_unit_bias: 0.0,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 2,
        grid_size: 6,
        max_num: 30,
        allow_fractions: false,
        max_denominator: 0,
        unit_fractions_only: false,
        allow_divide_by_fraction: false,
        strict_integer_results: false,
        fraction_op_bias: 0.0,
        non_unit_bias: 0.0,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 3,
        grid_size: 6,
        max_num: 50,
        allow_fractions: false,
        max_denominator: 0,
        unit_fractions_only: false,
        allow_divide_by_fraction: false,
        strict_integer_results: false,
        fraction_op_bias: 0.0,
        non_unit_bias: 0.0,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 4,
        grid_size: 8,
        max_num: 30,
        allow_fractions: true,
        max_denominator: 5,
        unit_fractions_only: true,
        allow_divide_by_fraction: false,
        strict_integer_results: false,
        fraction_op_bias: 0.25,
        non_unit_bias: 0.0,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 5,
        grid_size: 8,
        max_num: 40,
        allow_fractions: true,
        max_denominator: 6,
        unit_fractions_only: true,
        allow_divide_by_fraction: true,
        strict_integer_results: false,
        fraction_op_bias: 0.35,
        non_unit_bias: 0.0,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 6,
        grid_size: 8,
        max_num: 50,
        allow_fractions: true,
        max_denominator: 6,
        unit_fractions_only: false,
        allow_divide_by_fraction: true,
        strict_integer_results: false,
        fraction_op_bias: 0.45,
        non_unit_bias: 0.3,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 7,
        grid_size: 10,
        max_num: 60,
        allow_fractions: true,
        max_denominator: 8,
        unit_fractions_only: false,
        allow_divide_by_fraction: true,
        strict_integer_results: true,
        fraction_op_bias: 0.55,
        non_unit_bias: 0.5,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 8,
        grid_size: 10,
        max_num: 80,
        allow_fractions: true,
        max_denominator: 10,
        unit_fractions_only: false,
        allow_divide_by_fraction: true,
        strict_integer_results: true,
        fraction_op_bias: 0.65,
        non_unit_bias: 0.6,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 9,
        grid_size: 10,
        max_num: 99,
        allow_fractions: true,
        max_denominator: 12,
        unit_fractions_only: false,
        allow_divide_by_fraction: true,
        strict_integer_results: true,
        fraction_op_bias: 0.75,
        non_unit_bias: 0.75,
        force_fraction_ops: false,
        fraction_attempt_cap: 0,
        shrink_threshold: 16,
    },
    LevelConfig {
        level: 10,
        grid_size: 10,
        max_num: 99,
        allow_fractions: true,
        max_denominator: 12,
        unit_fractions_only: false,
        allow_divide_by_fraction: true,
        strict_integer_results: true,
        fraction_op_bias: 0.85,
        non_unit_bias: 0.9,
        force_fraction_ops: true,
        fraction_attempt_cap: 25,
        shrink_threshold: 16,
    },
];

impl LevelConfig {
    /// Return the configuration of the given level, or None if the level
    /// does not exist. Use this variant to validate user-provided level
    /// numbers.
    pub fn try_get(level: u32) -> Option<&'static LevelConfig> {
        if (1..=NUM_LEVELS).contains(&level) {
            Some(&LEVELS[(level - 1) as usize])
        } else {
            None
        }
    }

    /// Return the configuration of the given level.
    ///
    /// # Panics
    ///
    /// The method panics if the level does not exist. Callers are expected
    /// to have validated the level number already.
    pub fn get(level: u32) -> &'static LevelConfig {
        Self::try_get(level).unwrap_or_else(|| panic!("unknown level {level}"))
    }

    /// Return the total number of cells in the level's grid.
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_consistent() {
        for (i, config) in (1..=NUM_LEVELS).map(|l| (l, LevelConfig::get(l))) {
            assert_eq!(config.level, i);
            assert!(config.max_num >= 20);
            if config.allow_fractions {
                assert!(config.max_denominator >= 2);
            }
            if config.force_fraction_ops {
                assert!(config.fraction_attempt_cap > 0);
            }
        }
    }

    #[test]
    fn grid_sizes_never_shrink() {
        let mut previous: usize = 0;
        for level in 1..=NUM_LEVELS {
            let config: &LevelConfig = LevelConfig::get(level);
            assert!(config.grid_size >= previous);
            previous = config.grid_size;
        }
    }

    #[test]
    fn try_get_rejects_out_of_range_levels() {
        assert!(LevelConfig::try_get(0).is_none());
        assert!(LevelConfig::try_get(NUM_LEVELS + 1).is_none());
        assert!(LevelConfig::try_get(1).is_some());
    }

    #[test]
    #[should_panic]
    fn get_panics_on_unknown_level() {
        let _ = LevelConfig::get(42);
    }
}

/*
sequence.rs

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

//! Generate the chain of equations for a level.
//!
//! A sequence starts from a random value and grows one [`Step`] at a time.
//! Each step applies an operator and an operand to the running value, and
//! the result becomes the running value of the next step. Candidate steps
//! come from the rule cascade in [`super::rules`]; a candidate that breaks
//! the level constraints is rejected and regenerated, with a bounded number
//! of tries. When every try fails, a plain add/subtract step is emitted so
//! that sequence generation itself can never fail.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::GridEntry;
use super::levels::LevelConfig;
use super::numeric::{self, NumericValue, Operator};
use super::rules;

// Candidate steps drawn from the rule cascade before giving up on rules and
// emitting the guaranteed fallback step.
pub const MAX_STEP_ATTEMPTS: usize = 120;

/// One equation of the chain: `previous value <operator> operand = result`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Step {
    /// Operator applied to the running value.
    pub operator: Operator,

    /// Second operand of the equation.
    pub operand: NumericValue,

    /// Result of the equation, and running value of the next step.
    pub result: NumericValue,
}

/// Chain of equations. Flattened on the grid, a sequence with `k` steps
/// covers `3k + 1` cells: positions `0, 3, 6, …` hold values, `1, 4, 7, …`
/// operators, and `2, 5, 8, …` operands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Value the chain starts from.
    start: NumericValue,

    /// Equations of the chain.
    steps: Vec<Step>,
}

impl Sequence {
    /// Create a [`Sequence`] object that starts from the given value.
    pub fn new(start: NumericValue) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    /// Return the starting value.
    pub fn start(&self) -> NumericValue {
        self.start
    }

    /// Return the equations of the chain.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Append an equation to the chain.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Return the number of grid entries the flattened sequence produces.
    pub fn entry_len(&self) -> usize {
        1 + 3 * self.steps.len()
    }

    /// Return the running value at the end of the chain.
    pub fn last_value(&self) -> NumericValue {
        match self.steps.last() {
            Some(step) => step.result,
            None => self.start,
        }
    }

    /// Flatten the chain into one [`GridEntry`] per sequence position.
    pub fn to_entries(&self) -> Vec<GridEntry> {
        let mut entries: Vec<GridEntry> = Vec::with_capacity(self.entry_len());
        entries.push(GridEntry::Number(self.start));
        for step in &self.steps {
            entries.push(GridEntry::Operator(step.operator));
            entries.push(GridEntry::Number(step.operand));
            entries.push(GridEntry::Number(step.result));
        }
        entries
    }
}

/// Generate a sequence whose flattened form covers at least `min_entries`
/// grid cells. Board assembly passes the full cell count of the grid so
/// that the surplus entries can fill the spare cells.
pub fn generate_sequence(config: &LevelConfig, min_entries: usize) -> Sequence {
    let mut sequence: Sequence = Sequence::new(initial_value(config));
    debug!(
        "Level {}: sequence starts at {}",
        config.level,
        sequence.start()
    );
    while sequence.entry_len() < min_entries {
        let current: NumericValue = sequence.last_value();
        let step: Step = next_step(config, &current);
        debug!("{current} {} {} = {}", step.operator, step.operand, step.result);
        sequence.push(step);
    }
    sequence
}

/// Pick the value the chain starts from. Always a small whole number, on
/// every level.
fn initial_value(config: &LevelConfig) -> NumericValue {
    NumericValue::Integer(rand::rng().random_range(2..=config.max_num.min(12)))
}

/// Produce the next step of the chain: run the rule cascade with bounded
/// retries, then fall back to a guaranteed add/subtract step.
fn next_step(config: &LevelConfig, current: &NumericValue) -> Step {
    for attempt in 0..MAX_STEP_ATTEMPTS {
        if let Some(step) = rules::propose_step(config, current) {
            if step_is_valid(config, current, &step) {
                return step;
            }
            debug!(
                "Rejected candidate {current} {} {} (attempt {attempt})",
                step.operator, step.operand
            );
        }
    }
    warn!(
        "Level {}: no rule produced a valid step from {current} in \
         {MAX_STEP_ATTEMPTS} tries, falling back to add/subtract",
        config.level
    );
    fallback_step(config, current)
}

/// Whether the candidate step honors the level constraints.
///
/// The rule implementations use the same check to pre-filter their
/// candidates, so a rule can stop searching as soon as it has an acceptable
/// step.
pub fn step_is_valid(config: &LevelConfig, current: &NumericValue, step: &Step) -> bool {
    // Operand checks. A one operand is a no-op, zero and negative operands
    // never appear on the grid.
    if !step.operand.is_positive() || step.operand.is_one() {
        return false;
    }
    match step.operand {
        NumericValue::Integer(i) => {
            if i > config.max_num {
                return false;
            }
        }
        NumericValue::Fraction { num, den } => {
            if !config.allow_fractions
                || den > config.max_denominator
                || (config.unit_fractions_only && num != 1)
                || (step.operator == Operator::Div && !config.allow_divide_by_fraction)
            {
                return false;
            }
        }
    }

    // The step must restate the arithmetic exactly (this also rejects a
    // division by zero).
    match numeric::apply(step.operator, current, &step.operand) {
        Some(result) if result == step.result => (),
        _ => return false,
    }

    // Result checks.
    if !step.result.is_positive() || step.result.to_f64() > config.max_num as f64 {
        return false;
    }
    match step.result {
        NumericValue::Integer(_) => true,
        NumericValue::Fraction { den, .. } => {
            config.allow_fractions
                && !config.strict_integer_results
                && den <= config.max_denominator
        }
    }
}

/// Emit a step that is always valid: add when there is headroom below the
/// level ceiling, subtract otherwise.
fn fallback_step(config: &LevelConfig, current: &NumericValue) -> Step {
    let mut rng = rand::rng();
    let cur: f64 = current.to_f64();
    let headroom: i64 = config.max_num - cur.ceil() as i64;

    let (operator, operand) = if headroom >= 2 {
        (
            Operator::Add,
            NumericValue::Integer(rng.random_range(2..=headroom)),
        )
    } else {
        // The value sits against the level ceiling, which every level keeps
        // far above two, so there is room to subtract.
        (
            Operator::Sub,
            NumericValue::Integer(rng.random_range(2..=(cur.floor() as i64 - 1))),
        )
    };
    let result: NumericValue = numeric::apply(operator, current, &operand)
        .expect("additive arithmetic cannot fail");
    Step {
        operator,
        operand,
        result,
    }
}

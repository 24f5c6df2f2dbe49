/*
rules.rs

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

//! Step-generation rule cascade.
//!
//! The per-level behavior of the sequence generator is driven by an ordered
//! table of rules. For each candidate step, the cascade walks the table and
//! asks the first rule that applies to the level and the running value for
//! a step; a rule can decline, in which case the next applicable rule is
//! consulted. This keeps the level special cases testable one rule at a
//! time:
//!
//! * `forced-fraction` — levels with [`LevelConfig::force_fraction_ops`]
//!   open every step with fraction constructions, and swing the value with
//!   a large add/subtract once the attempt cap is spent;
//! * `shrink-large` — a running value above the shrink threshold is steered
//!   back down with an exact division (preferred on the integer-only early
//!   levels) or a subtraction;
//! * `fraction-op` — with the level's fraction bias, multiply or divide by
//!   a constructed fraction;
//! * `integer-return` — a fractional running value is snapped back to a
//!   whole number by multiplying by its denominator, or nudged additively;
//! * `integer-op` — the generic rule: a random operator with a random
//!   integer operand.
//!
//! Fractions are never produced by rejection sampling: the constructions
//! search candidate denominators and numerators so that the operation comes
//! out exact. Blindly drawing fractions and hoping for a whole result is
//! combinatorially unlikely to succeed.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::levels::LevelConfig;
use super::numeric::{self, NUM_OPERATORS, NumericValue, Operator, gcd};
use super::sequence::{Step, step_is_valid};

/// One entry of the cascade: a predicate selecting the rule, and a
/// generator that may decline by returning None.
pub struct Rule {
    /// Rule name, for the debug log.
    pub name: &'static str,

    /// Whether the rule applies to the level and the running value.
    pub applies: fn(&LevelConfig, &NumericValue) -> bool,

    /// Produce a candidate step, or decline.
    pub propose: fn(&LevelConfig, &NumericValue) -> Option<Step>,
}

/// The cascade, in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "forced-fraction",
        applies: forced_fraction_applies,
        propose: propose_forced_fraction,
    },
    Rule {
        name: "shrink-large",
        applies: shrink_applies,
        propose: propose_shrink,
    },
    Rule {
        name: "fraction-op",
        applies: fraction_op_applies,
        propose: propose_fraction_op,
    },
    Rule {
        name: "integer-return",
        applies: integer_return_applies,
        propose: propose_integer_return,
    },
    Rule {
        name: "integer-op",
        applies: always_applies,
        propose: propose_integer_op,
    },
];

/// Ask the cascade for a candidate step.
pub fn propose_step(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    for rule in RULES {
        if (rule.applies)(config, current)
            && let Some(step) = (rule.propose)(config, current)
        {
            debug!(
                "Rule {}: {current} {} {} = {}",
                rule.name, step.operator, step.operand, step.result
            );
            return Some(step);
        }
    }
    None
}

fn always_applies(_config: &LevelConfig, _current: &NumericValue) -> bool {
    true
}

//
// forced-fraction
//

fn forced_fraction_applies(config: &LevelConfig, current: &NumericValue) -> bool {
    config.force_fraction_ops && config.allow_fractions && current.is_integer()
}

/// Try fraction constructions up to the level's attempt cap, then swing the
/// value with a large add/subtract step.
fn propose_forced_fraction(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    let n: i64 = current.as_integer()?;
    for _ in 0..config.fraction_attempt_cap {
        if let Some(step) = construct_fraction_step(config, n)
            && step_is_valid(config, current, &step)
        {
            return Some(step);
        }
    }
    debug!(
        "Fraction attempt cap ({}) spent on {current}, swinging",
        config.fraction_attempt_cap
    );
    Some(large_swing_step(config, n))
}

/// Add or subtract a large operand, whichever keeps the result in range.
fn large_swing_step(config: &LevelConfig, n: i64) -> Step {
    let mut rng = rand::rng();
    let half: i64 = config.max_num / 2;
    let (operator, operand) = if config.max_num - n >= half {
        (
            Operator::Add,
            NumericValue::Integer(rng.random_range(half..=config.max_num - n)),
        )
    } else {
        // n is above half the ceiling, so a large subtraction fits.
        (
            Operator::Sub,
            NumericValue::Integer(rng.random_range(half..=n - 1)),
        )
    };
    let result: NumericValue = numeric::apply(operator, &NumericValue::Integer(n), &operand)
        .expect("additive arithmetic cannot fail");
    Step {
        operator,
        operand,
        result,
    }
}

//
// shrink-large
//

fn shrink_applies(config: &LevelConfig, current: &NumericValue) -> bool {
    matches!(current, NumericValue::Integer(i) if *i > config.shrink_threshold)
}

/// Steer a large running value back down with an exact division or a
/// subtraction. Declines one time in four so that large values can also
/// take the generic rules.
fn propose_shrink(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    let mut rng = rand::rng();
    if rng.random_bool(0.25) {
        return None;
    }
    let n: i64 = current.as_integer()?;

    // Exact divisors that leave at least 2.
    let divisors: Vec<i64> = (2..=12).filter(|d| n % d == 0 && n / d >= 2).collect();
    let divide: bool = !divisors.is_empty()
        && (!config.allow_fractions || rng.random_bool(0.5));

    let (operator, operand) = if divide {
        let d: i64 = *divisors.choose(&mut rng).expect("divisor list is not empty");
        (Operator::Div, NumericValue::Integer(d))
    } else {
        // Subtract down into the lower half of the range.
        (
            Operator::Sub,
            NumericValue::Integer(rng.random_range(n / 2..=n - 2)),
        )
    };
    let result: NumericValue = numeric::apply(operator, current, &operand)
        .expect("shrink arithmetic cannot fail");
    Some(Step {
        operator,
        operand,
        result,
    })
}

//
// fraction-op
//

fn fraction_op_applies(config: &LevelConfig, current: &NumericValue) -> bool {
    config.allow_fractions && matches!(current, NumericValue::Integer(i) if *i >= 2)
}

/// With the level's fraction bias, multiply or divide the running value by
/// a constructed fraction.
fn propose_fraction_op(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    if !rand::rng().random_bool(config.fraction_op_bias) {
        return None;
    }
    let n: i64 = current.as_integer()?;
    construct_fraction_step(config, n)
}

/// Build a fraction multiplication or division for the whole number `n`.
fn construct_fraction_step(config: &LevelConfig, n: i64) -> Option<Step> {
    let mut rng = rand::rng();
    let mut operators: Vec<Operator> = vec![Operator::Mul];
    if config.allow_divide_by_fraction {
        operators.push(Operator::Div);
    }
    operators.shuffle(&mut rng);

    for operator in operators {
        let step: Option<Step> = match operator {
            Operator::Mul => construct_fraction_mul(config, n),
            Operator::Div => construct_fraction_div(config, n),
            _ => None,
        };
        if step.is_some() {
            return step;
        }
    }
    None
}

/// Numerator candidates for a denominator `q`: coprime with `q`, not equal
/// to `q`, capped at `max_p`. Unit-only levels keep only the numerator one;
/// otherwise the level's non-unit bias can drop the unit numerator.
fn numerator_candidates(config: &LevelConfig, q: i64, max_p: i64) -> Vec<i64> {
    let mut rng = rand::rng();
    let mut ps: Vec<i64> = (1..=max_p).filter(|p| *p != q && gcd(*p, q) == 1).collect();
    if config.unit_fractions_only {
        ps.retain(|p| *p == 1);
    } else if rng.random_bool(config.non_unit_bias) {
        ps.retain(|p| *p != 1);
    }
    ps.shuffle(&mut rng);
    ps
}

/// Search a fraction `p/q` such that `n x p/q` satisfies the level: an
/// exact whole number on strict levels, a level-valid value otherwise.
fn construct_fraction_mul(config: &LevelConfig, n: i64) -> Option<Step> {
    let mut rng = rand::rng();
    let mut denominators: Vec<i64> = (2..=config.max_denominator).collect();
    denominators.shuffle(&mut rng);

    for q in denominators {
        // Keep the result under the ceiling and the fraction below two.
        let max_p: i64 = (config.max_num * q / n).min(2 * q);
        for p in numerator_candidates(config, q, max_p) {
            if config.strict_integer_results && (n * p) % q != 0 {
                continue;
            }
            let operand: NumericValue = NumericValue::ratio(p, q)?;
            let result: NumericValue =
                numeric::apply(Operator::Mul, &NumericValue::Integer(n), &operand)?;
            if !fraction_result_ok(config, &result) {
                continue;
            }
            return Some(Step {
                operator: Operator::Mul,
                operand,
                result,
            });
        }
    }
    None
}

/// Search a fraction `p/q` such that `n / (p/q) = n*q/p` satisfies the
/// level.
fn construct_fraction_div(config: &LevelConfig, n: i64) -> Option<Step> {
    let mut rng = rand::rng();
    let mut denominators: Vec<i64> = (2..=config.max_denominator).collect();
    denominators.shuffle(&mut rng);

    for q in denominators {
        for p in numerator_candidates(config, q, 2 * q) {
            if config.strict_integer_results && (n * q) % p != 0 {
                continue;
            }
            let operand: NumericValue = NumericValue::ratio(p, q)?;
            let result: NumericValue =
                numeric::apply(Operator::Div, &NumericValue::Integer(n), &operand)?;
            if !fraction_result_ok(config, &result) {
                continue;
            }
            return Some(Step {
                operator: Operator::Div,
                operand,
                result,
            });
        }
    }
    None
}

/// Whether a fraction-operation result fits the level.
fn fraction_result_ok(config: &LevelConfig, result: &NumericValue) -> bool {
    if !result.is_positive() || result.to_f64() > config.max_num as f64 {
        return false;
    }
    match result {
        NumericValue::Integer(_) => true,
        NumericValue::Fraction { den, .. } => {
            !config.strict_integer_results && *den <= config.max_denominator
        }
    }
}

//
// integer-return
//

fn integer_return_applies(_config: &LevelConfig, current: &NumericValue) -> bool {
    !current.is_integer()
}

/// Bring a fractional running value back toward whole numbers: multiply by
/// the denominator for an exact whole result, or nudge the value with a
/// small addition.
fn propose_integer_return(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    let (num, den) = current.as_ratio();
    let mut rng = rand::rng();

    if num <= config.max_num && rng.random_bool(0.5) {
        return Some(Step {
            operator: Operator::Mul,
            operand: NumericValue::Integer(den),
            result: NumericValue::Integer(num),
        });
    }

    let headroom: i64 = config.max_num - current.to_f64().ceil() as i64;
    if headroom < 2 {
        return None;
    }
    let operand: NumericValue = NumericValue::Integer(rng.random_range(2..=headroom.min(9).max(2)));
    let result: NumericValue = numeric::apply(Operator::Add, current, &operand)?;
    Some(Step {
        operator: Operator::Add,
        operand,
        result,
    })
}

//
// integer-op
//

/// The generic rule: one random operator with a random integer operand.
fn propose_integer_op(config: &LevelConfig, current: &NumericValue) -> Option<Step> {
    let mut rng = rand::rng();
    let operator: Operator = Operator::from_repr(rng.random_range(0..NUM_OPERATORS))
        .expect("operator representation in range");
    let cur: f64 = current.to_f64();

    let operand: NumericValue = match operator {
        Operator::Add => {
            let headroom: i64 = config.max_num - cur.ceil() as i64;
            if headroom < 2 {
                return None;
            }
            NumericValue::Integer(rng.random_range(2..=headroom))
        }
        Operator::Sub => {
            let max_sub: i64 = cur.floor() as i64 - 1;
            if max_sub < 2 {
                return None;
            }
            NumericValue::Integer(rng.random_range(2..=max_sub))
        }
        Operator::Mul => {
            let factor: i64 = rng.random_range(2..=9);
            if cur * factor as f64 > config.max_num as f64 {
                return None;
            }
            NumericValue::Integer(factor)
        }
        Operator::Div => {
            // Whole values only: exact divisors keep the chain on integers.
            let n: i64 = current.as_integer()?;
            let divisors: Vec<i64> = (2..=12).filter(|d| n % d == 0 && n / d >= 1).collect();
            NumericValue::Integer(*divisors.choose(&mut rng)?)
        }
    };
    let result: NumericValue = numeric::apply(operator, current, &operand)?;
    Some(Step {
        operator,
        operand,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_rule_reduces_large_values() {
        let config: &LevelConfig = LevelConfig::get(3);
        let current: NumericValue = NumericValue::Integer(48);
        let mut seen: usize = 0;
        for _ in 0..50 {
            if let Some(step) = propose_shrink(config, &current) {
                seen += 1;
                assert!(step.result.to_f64() < 48.0);
                assert!(step_is_valid(config, &current, &step));
            }
        }
        // The rule declines one time in four on average.
        assert!(seen > 20);
    }

    #[test]
    fn strict_fraction_construction_yields_whole_results() {
        let config: &LevelConfig = LevelConfig::get(7);
        let current: NumericValue = NumericValue::Integer(24);
        for _ in 0..50 {
            if let Some(step) = construct_fraction_step(config, 24) {
                assert!(!step.operand.is_integer());
                assert!(step.result.is_integer(), "result {}", step.result);
                assert!(step_is_valid(config, &current, &step));
            }
        }
    }

    #[test]
    fn unit_only_levels_construct_unit_fractions() {
        let config: &LevelConfig = LevelConfig::get(4);
        for _ in 0..50 {
            if let Some(step) = construct_fraction_step(config, 12) {
                let (num, _) = step.operand.as_ratio();
                assert_eq!(num, 1);
                assert_eq!(step.operator, Operator::Mul);
            }
        }
    }

    #[test]
    fn division_by_fraction_respects_the_level_switch() {
        // Level 4 forbids dividing by a fraction.
        let config: &LevelConfig = LevelConfig::get(4);
        for _ in 0..50 {
            if let Some(step) = construct_fraction_step(config, 12) {
                assert_ne!(step.operator, Operator::Div);
            }
        }
    }

    #[test]
    fn forced_fraction_swings_when_nothing_is_constructible() {
        let config: LevelConfig = LevelConfig {
            max_denominator: 0,
            ..LevelConfig::get(10).clone()
        };
        let current: NumericValue = NumericValue::Integer(30);
        let step: Step = propose_forced_fraction(&config, &current)
            .expect("the forced rule always proposes");
        assert!(step.operand.is_integer());
        assert!(matches!(step.operator, Operator::Add | Operator::Sub));
        assert!(step_is_valid(&config, &current, &step));
    }

    #[test]
    fn zero_bias_never_proposes_fractions() {
        let config: LevelConfig = LevelConfig {
            fraction_op_bias: 0.0,
            ..LevelConfig::get(6).clone()
        };
        let current: NumericValue = NumericValue::Integer(12);
        for _ in 0..50 {
            assert!(propose_fraction_op(&config, &current).is_none());
        }
    }

    #[test]
    fn integer_return_recovers_whole_values() {
        let config: &LevelConfig = LevelConfig::get(6);
        let current: NumericValue = NumericValue::ratio(7, 2).unwrap();
        let mut recovered: bool = false;
        for _ in 0..50 {
            if let Some(step) = propose_integer_return(config, &current) {
                assert!(step_is_valid(config, &current, &step));
                if step.operator == Operator::Mul {
                    assert_eq!(step.operand, NumericValue::Integer(2));
                    assert_eq!(step.result, NumericValue::Integer(7));
                    recovered = true;
                }
            }
        }
        assert!(recovered);
    }

    #[test]
    fn cascade_always_reaches_the_generic_rule() {
        let config: &LevelConfig = LevelConfig::get(1);
        let current: NumericValue = NumericValue::Integer(5);
        let mut proposed: usize = 0;
        for _ in 0..50 {
            if propose_step(config, &current).is_some() {
                proposed += 1;
            }
        }
        // The generic rule can decline (an unlucky operator draw), but most
        // tries must produce a candidate.
        assert!(proposed > 25);
    }
}

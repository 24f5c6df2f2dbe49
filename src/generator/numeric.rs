/*
numeric.rs

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

//! Numbers that can appear in grid cells: integers and reduced fractions.
//!
//! All arithmetic is exact rational arithmetic. Fractions are normalized on
//! construction: the denominator is always positive and at least two, and
//! the numerator and denominator have no common factor. A value that reduces
//! to a whole number is always stored as [`NumericValue::Integer`].

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Arithmetic operators usable in a puzzle.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr,
)]
#[repr(usize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// Number of [`Operator`] variants, for random draws with
/// [`Operator::from_repr`].
pub const NUM_OPERATORS: usize = 4;

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Sub => write!(f, "-"),
            Operator::Mul => write!(f, "x"),
            Operator::Div => write!(f, "/"),
        }
    }
}

/// Value stored in a number cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NumericValue {
    /// Whole number.
    Integer(i64),

    /// Reduced fraction. The denominator is positive and at least two, and
    /// `gcd(num, den) == 1`. The numerator carries the sign.
    Fraction { num: i64, den: i64 },
}

/// Return the greatest common divisor of the two numbers.
pub fn gcd(a: i64, b: i64) -> i64 {
    let mut a: i64 = a.abs();
    let mut b: i64 = b.abs();
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl NumericValue {
    /// Build a value from a numerator and a denominator, reduced to lowest
    /// terms. Return None when the denominator is zero.
    pub fn ratio(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        // Normalize the sign on the numerator
        let (mut num, mut den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g: i64 = gcd(num, den);
        if g > 1 {
            num /= g;
            den /= g;
        }
        if den == 1 {
            Some(NumericValue::Integer(num))
        } else {
            Some(NumericValue::Fraction { num, den })
        }
    }

    /// Return the value as a (numerator, denominator) pair. Integers have a
    /// denominator of one.
    pub fn as_ratio(&self) -> (i64, i64) {
        match self {
            NumericValue::Integer(i) => (*i, 1),
            NumericValue::Fraction { num, den } => (*num, *den),
        }
    }

    /// Whether the value is a whole number.
    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }

    /// Return the value as a whole number, or None for fractions.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumericValue::Integer(i) => Some(*i),
            NumericValue::Fraction { .. } => None,
        }
    }

    /// Whether the value equals one. A one operand is rejected during
    /// generation because multiplying or dividing by one is a no-op.
    pub fn is_one(&self) -> bool {
        matches!(self, NumericValue::Integer(1))
    }

    /// Whether the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        let (num, _) = self.as_ratio();
        num > 0
    }

    /// Return the value as a float, for display scaling and tolerance-based
    /// comparisons.
    pub fn to_f64(&self) -> f64 {
        let (num, den) = self.as_ratio();
        num as f64 / den as f64
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericValue::Integer(i) => write!(f, "{i}"),
            NumericValue::Fraction { num, den } => write!(f, "{num}/{den}"),
        }
    }
}

/// Apply the operator to the two values with exact rational arithmetic.
/// Return None on a division by zero.
pub fn apply(op: Operator, a: &NumericValue, b: &NumericValue) -> Option<NumericValue> {
    let (an, ad) = a.as_ratio();
    let (bn, bd) = b.as_ratio();
    match op {
        Operator::Add => NumericValue::ratio(an * bd + bn * ad, ad * bd),
        Operator::Sub => NumericValue::ratio(an * bd - bn * ad, ad * bd),
        Operator::Mul => NumericValue::ratio(an * bn, ad * bd),
        Operator::Div => {
            if bn == 0 {
                None
            } else {
                NumericValue::ratio(an * bd, ad * bn)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(7, 13), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(-12, 8), 4);
    }

    #[test]
    fn ratio_reduces_to_lowest_terms() {
        assert_eq!(
            NumericValue::ratio(6, 8),
            Some(NumericValue::Fraction { num: 3, den: 4 })
        );
        assert_eq!(NumericValue::ratio(8, 4), Some(NumericValue::Integer(2)));
        assert_eq!(NumericValue::ratio(5, 0), None);
    }

    #[test]
    fn ratio_normalizes_the_sign() {
        assert_eq!(
            NumericValue::ratio(3, -4),
            Some(NumericValue::Fraction { num: -3, den: 4 })
        );
    }

    #[test]
    fn apply_all_operators() {
        let a: NumericValue = NumericValue::Integer(6);
        let b: NumericValue = NumericValue::Integer(4);
        assert_eq!(apply(Operator::Add, &a, &b), Some(NumericValue::Integer(10)));
        assert_eq!(apply(Operator::Sub, &a, &b), Some(NumericValue::Integer(2)));
        assert_eq!(apply(Operator::Mul, &a, &b), Some(NumericValue::Integer(24)));
        assert_eq!(
            apply(Operator::Div, &a, &b),
            Some(NumericValue::Fraction { num: 3, den: 2 })
        );
    }

    #[test]
    fn apply_with_fractions() {
        let n: NumericValue = NumericValue::Integer(8);
        let half: NumericValue = NumericValue::ratio(1, 2).unwrap();
        assert_eq!(apply(Operator::Mul, &n, &half), Some(NumericValue::Integer(4)));
        assert_eq!(apply(Operator::Div, &n, &half), Some(NumericValue::Integer(16)));
        assert_eq!(
            apply(Operator::Add, &n, &half),
            Some(NumericValue::Fraction { num: 17, den: 2 })
        );
    }

    #[test]
    fn division_by_zero_is_rejected() {
        let a: NumericValue = NumericValue::Integer(3);
        let zero: NumericValue = NumericValue::Integer(0);
        assert_eq!(apply(Operator::Div, &a, &zero), None);
    }

    #[test]
    fn display_forms() {
        assert_eq!(NumericValue::Integer(7).to_string(), "7");
        assert_eq!(NumericValue::ratio(3, 4).unwrap().to_string(), "3/4");
        assert_eq!(Operator::Mul.to_string(), "x");
    }

    #[test]
    fn operator_from_repr() {
        assert_eq!(Operator::from_repr(0), Some(Operator::Add));
        assert_eq!(Operator::from_repr(3), Some(Operator::Div));
        assert_eq!(Operator::from_repr(NUM_OPERATORS), None);
    }
}

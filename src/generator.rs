/*
generator.rs

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

//! Generate random puzzles.
//!
//! A puzzle is built in three stages, each with its own module:
//!
//! * A random solution path, represented by a [`path::Path`] object. You
//!   create this object by creating a [`random_path::RandomPath`] object
//!   for the level's grid size and by using its
//!   [`random_path::RandomPath::generate`] method. The method retries
//!   failed walks up to a ceiling, and returns an error when the ceiling is
//!   reached. In that case the caller can retry or report the failure.
//!
//! * A chain of equations, represented by a [`sequence::Sequence`] object
//!   and produced by [`sequence::generate_sequence`]. The chain is sized to
//!   cover the whole grid so that its surplus can fill the cells off the
//!   path. The per-level arithmetic feel (fractions, operator biases,
//!   shrinking of large values) is driven by the rule cascade in
//!   [`rules`], parameterized by the [`levels::LevelConfig`] table.
//!
//! * The assembled [`board::Board`]: sequence entries along the path, the
//!   surplus shuffled into the spare cells as distractors.

pub mod board;
pub mod grid;
pub mod levels;
pub mod numeric;
pub mod path;
pub mod random_path;
pub mod rules;
pub mod sequence;

/*
checkpoint.rs

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

//! Game checkpoint.
//!
//! Players can take checkpoints while tracing so that they can revert back
//! to a well-known state if an exploration goes wrong. A checkpoint saves
//! the traced path, including its undo and redo lists.
//!
//! See [`crate::game`] where the checkpoints are organized as a stack: a
//! player can create several checkpoints, and can revert back to the last
//! checkpoint, which is then deleted.

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::traced_path::TracedPath;

/// Checkpoint representation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckPoint {
    /// Traced path at the time of the checkpoint.
    pub traced: TracedPath,
}

impl CheckPoint {
    /// Create a [`CheckPoint`] object for the provided [`Game`] object.
    pub fn new(game: &Game) -> Self {
        Self {
            traced: game.traced.clone(),
        }
    }
}

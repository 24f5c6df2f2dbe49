/*
mistakes.rs

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

//! Manage the player's mistake counter.

use log::debug;
use std::time::Instant;

/// Mistakes made within this window of the previous one are not counted
/// again. Dragging a finger across several invalid cells is one mistake,
/// not one per cell.
const DEBOUNCE_SEC: u64 = 2;

/// Manage the mistake counter.
#[derive(Debug, Default)]
pub struct Mistakes {
    /// Number of mistakes.
    count: usize,

    /// Time of the last counted mistake.
    last: Option<Instant>,
}

impl Mistakes {
    /// Create a [`Mistakes`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counter.
    pub fn clear(&mut self) {
        self.count = 0;
        self.last = None;
    }

    /// Return the number of mistakes.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Record a mistake: a rejected trace move or a failed submission.
    pub fn add(&mut self) {
        if let Some(last) = self.last
            && last.elapsed().as_secs() < DEBOUNCE_SEC
        {
            debug!("Mistake within {DEBOUNCE_SEC}s of the previous one, not counted");
            self.last = Some(Instant::now());
            return;
        }
        self.count += 1;
        self.last = Some(Instant::now());
        debug!("Mistake count + 1 = {}", self.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_mistakes_count_once() {
        let mut mistakes: Mistakes = Mistakes::new();
        mistakes.add();
        mistakes.add();
        mistakes.add();
        assert_eq!(mistakes.count(), 1);
    }

    #[test]
    fn clear_resets_the_counter() {
        let mut mistakes: Mistakes = Mistakes::new();
        mistakes.add();
        mistakes.clear();
        assert_eq!(mistakes.count(), 0);
    }
}

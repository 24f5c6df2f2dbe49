/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers and for the rendering layer.
//! Numtrail can generate random boards for a level, verify them, and print
//! them as text or as JSON. The JSON form is the contract with the
//! rendering front end, which only needs the grid size and the cell
//! entries.
//!
//! # Examples
//!
//! List the levels:
//!
//! ```
//! $ numtrail --ls
//! level  1: 6x6 grid, numbers up to 20, integers
//! level  2: 6x6 grid, numbers up to 30, integers
//! ...
//! level 10: 10x10 grid, numbers up to 99, fractions (den <= 12)
//! ```
//!
//! Generate two boards for level 4 and print some statistics:
//!
//! ```
//! $ numtrail -n 4 -c 2 -s
//! ```
//!
//! Export one level 7 board as JSON for the rendering layer:
//!
//! ```
//! $ numtrail -n 7 --json
//! ```

use clap::Parser;
use log::debug;
use serde::Serialize;
use std::env;

use crate::config::COPYRIGHT_NOTICE;
use crate::game::Game;
use crate::generator::board::Board;
use crate::generator::levels::{LevelConfig, NUM_LEVELS};
use crate::generator::path::Path;
use crate::generator::random_path::RandomPath;
use crate::generator::sequence::{Sequence, generate_sequence};
use crate::validator;

// Give up after this many failed path generations in one run.
const MAX_GENERATION_ERRORS: usize = 5;

/// Build random Numtrail boards for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the levels
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Level to generate boards for
    #[arg(short = 'n', long, group = "generate")]
    level: Option<u32>,

    /// Number of boards to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print the boards as JSON instead of text
    #[arg(short, long, default_value_t = false, requires = "generate")]
    json: bool,

    /// Print some statistics after generating the boards
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Also run the puzzles through the game controller, end to end
    #[arg(short = 'k', long, default_value_t = false, requires = "generate")]
    check: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Board document printed by the `--json` option.
#[derive(Serialize)]
struct BoardExport<'a> {
    level: u32,
    grid_size: usize,
    config: &'a LevelConfig,
    board: &'a Board,
    solution: &'a [usize],
}

/// Parse and process command-line options.
pub fn parse() -> Option<u8> {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    if !args.ls && args.level.is_none() {
        return None;
    }

    //
    // List the levels
    //
    if args.ls {
        for level in 1..=NUM_LEVELS {
            let config: &LevelConfig = LevelConfig::get(level);
            let numbers: String = if config.allow_fractions {
                format!("fractions (den <= {})", config.max_denominator)
            } else {
                "integers".to_string()
            };
            println!(
                "level {:>2}: {}x{} grid, numbers up to {}, {}",
                level, config.grid_size, config.grid_size, config.max_num, numbers
            );
        }
        return Some(0);
    }

    //
    // Generate the requested boards
    //
    let level: u32 = args.level.expect("Cannot retrieve level number");
    let Some(config) = LevelConfig::try_get(level) else {
        eprintln!("Unknown level {level}. Use --ls to list the available levels.");
        return Some(1);
    };

    let mut generator: RandomPath = RandomPath::new(config.grid_size);
    let mut generated: Vec<(Board, Path)> = Vec::with_capacity(args.count);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;
    let mut attempts: usize = 0;

    while generated.len() < args.count {
        debug!("Iteration {}", generated.len());

        match generator.generate() {
            Ok(path) => {
                total += generator.duration;
                if generator.duration > max {
                    max = generator.duration;
                }
                attempts += generator.attempts;

                // Verify that the path has the expected shape
                if !path.is_complete_shape() {
                    eprintln!("Wrong length: {}: {:?}", path.len(), path.cells());
                    panic!("Bug: wrong length for the generated path");
                }

                // Verify that there are no duplicated cells
                let mut p: Vec<usize> = path.cells().to_vec();
                p.sort_unstable();
                p.dedup();
                if p.len() != path.len() {
                    eprintln!("Duplicated cells in path: {:?}", path.cells());
                    panic!("Bug: duplicated cells in generated path");
                }

                // Build the board and verify that its own solution
                // validates
                let sequence: Sequence = generate_sequence(config, config.cell_count());
                let board: Board = Board::build(config, &path, &sequence);
                let check = validator::validate_path(
                    path.cells(),
                    board.entries(),
                    config.grid_size,
                );
                if !check.is_valid {
                    eprintln!(
                        "Validation failed: {:?} at {:?}",
                        check.error, check.failed_at
                    );
                    panic!("Bug: generated board fails validation");
                }

                generated.push((board, path));
            }

            Err(_) => {
                // The path generator spent its attempt ceiling
                errors += 1;
                debug!("ERROR generating random path");
                if errors >= MAX_GENERATION_ERRORS {
                    eprintln!("Too many generation failures, giving up.");
                    return Some(1);
                }
            }
        }
    }

    //
    // Print the boards
    //
    if args.json {
        let exports: Vec<BoardExport> = generated
            .iter()
            .map(|(board, path)| BoardExport {
                level,
                grid_size: config.grid_size,
                config,
                board,
                solution: path.cells(),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&exports).expect("Cannot serialize the boards")
        );
    } else {
        for (i, (board, path)) in generated.iter().enumerate() {
            println!("\nBoard {} (level {level}):", i + 1);
            print_board(board);
            println!("solution: {:?}", path.cells());
        }
    }

    //
    // End-to-end check: generate through the game controller and replay
    // the solution, once per requested board
    //
    if args.check {
        for i in 0..args.count {
            if !self_check(level) {
                eprintln!("Self-check {} failed for level {level}", i + 1);
                panic!("Bug: the game controller rejected its own solution");
            }
        }
        println!("self-check passed ({} games)", args.count);
    }

    // Print some stats
    if args.summary {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
            errors = {}",
            total,
            total / args.count.max(1) as f32,
            max,
            attempts / args.count.max(1),
            errors
        );
    }
    Some(0)
}

/// Generate a puzzle through the game controller and replay its solution:
/// every solution cell must be accepted, the partial feedback must stay
/// clean, and the submission must solve the game.
fn self_check(level: u32) -> bool {
    let mut game: Game = Game::new();
    if game.start_level(level).is_err() {
        return false;
    }
    let solution: Vec<usize> = game.solution.cells().to_vec();
    for cell in solution {
        if !game.trace_cell(cell) {
            return false;
        }
    }
    let feedback = game.partial_feedback();
    if !feedback.validation.is_valid || feedback.uncommitted != 0 {
        return false;
    }
    game.submit();
    game.solved && game.mistakes() == 0
}

/// Print the board as a text grid.
fn print_board(board: &Board) {
    let size: usize = board.grid_size();
    for y in 0..size {
        let mut row: String = String::new();
        for x in 0..size {
            let text: String = match board.entry(y * size + x) {
                Some(entry) => entry.to_string(),
                None => ".".to_string(),
            };
            row.push_str(&format!("{text:>6}"));
        }
        println!("{row}");
    }
}

/*
main.rs

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

mod checkpoint;
mod cli_options;
mod config;
mod game;
mod generator;
mod mistakes;
mod traced_path;
mod validator;

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(ret) = cli_options::parse() {
        return ExitCode::from(ret);
    }

    // No action was requested. The graphical front end lives outside of
    // this crate and consumes the JSON export; point the user at the
    // generator options.
    eprintln!("Nothing to do. Use --ls to list the levels, or --level to generate boards.");
    ExitCode::SUCCESS
}

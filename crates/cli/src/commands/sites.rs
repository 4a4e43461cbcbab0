// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tasktap sites`: list the built-in presets.

use super::CommandError;
use crate::output::write_sites;

pub fn run() -> Result<(), CommandError> {
    write_sites(&mut std::io::stdout().lock())?;
    Ok(())
}

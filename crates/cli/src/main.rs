// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tasktap binary entry point.

use clap::Parser;

use tasktap::cli::{Cli, Command};
use tasktap::commands::{self, CommandError, ExportTarget};
use tasktap::logging;
use tasktap::output::print_error;
use tasktap::time::ClockHandle;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let clock = ClockHandle::system();
    let result: Result<Option<ExportTarget>, CommandError> = match &cli.command {
        Command::Replay(args) => commands::replay::run(args, &clock).map(Some),
        Command::Poll(args) => commands::poll::run(args, &clock)
            .await
            .map(|summary| Some(summary.target)),
        Command::Sites => commands::sites::run().map(|()| None),
    };

    match result {
        Ok(Some(ExportTarget::File(path))) => {
            eprintln!("Exported to {}", path.display());
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            print_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

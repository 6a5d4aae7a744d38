//! Particlefield - command-line tool for generating ambient particle fields

use std::process::ExitCode;

use particlefield::cli;

fn main() -> ExitCode {
    cli::run()
}

//! mintile - Command-line tool for converting pixel art into hardware tiles

use std::process::ExitCode;

use mintile::cli;

fn main() -> ExitCode {
    cli::run()
}

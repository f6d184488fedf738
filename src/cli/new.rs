//! `mintile new` - allocate a blank image

use std::path::Path;
use std::process::ExitCode;

use crate::config::{merge_cli_overrides, CliOverrides, MintileConfig};
use crate::raster::{Raster, TILE_SIZE};
use crate::storage;

use super::{Mode, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the new command
pub fn run_new(
    config: &MintileConfig,
    output: &Path,
    width: Option<u32>,
    height: Option<u32>,
    mode: Option<Mode>,
) -> ExitCode {
    let mut config = config.clone();
    let overrides = CliOverrides { width, height, mode: mode.map(Into::into) };
    merge_cli_overrides(&mut config, &overrides);

    let canvas = &config.canvas;
    for (flag, value) in [("--width", canvas.width), ("--height", canvas.height)] {
        if value == 0 || value % TILE_SIZE != 0 {
            eprintln!("Error: {} must be a positive multiple of 8 (got {})", flag, value);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let raster = Raster::new(canvas.width, canvas.height, canvas.mode);
    if let Err(e) = storage::save(&raster, output) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Created {}x{} {} image: {}",
        canvas.width,
        canvas.height,
        canvas.mode,
        output.display()
    );
    ExitCode::from(EXIT_SUCCESS)
}

//! CLI dispatch for the `mintile draw` command.

use std::path::Path;
use std::process::ExitCode;

use crate::edit::{apply_tool, invert, Tool};
use crate::storage;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Parse an `x,y` coordinate pair.
pub(crate) fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x coordinate in '{}'", s))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y coordinate in '{}'", s))?;
    Ok((x, y))
}

/// Execute the draw command.
pub fn run_draw(
    input: &Path,
    pencil: &[String],
    erase: &[String],
    mask: &[String],
    do_invert: bool,
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let mut strokes = Vec::new();
    for (tool, points) in [(Tool::Pencil, pencil), (Tool::Eraser, erase), (Tool::Mask, mask)] {
        for p in points {
            match parse_point(p) {
                Ok(point) => strokes.push((tool, point)),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            }
        }
    }

    if strokes.is_empty() && !do_invert {
        eprintln!("Error: nothing to draw (use --pencil, --erase, --mask or --invert)");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut raster = match storage::open(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut painted = 0;
    for (tool, (x, y)) in strokes {
        if apply_tool(&mut raster, tool, x, y) {
            painted += 1;
        } else {
            eprintln!("Warning: ({}, {}) is outside the {}x{} image", x, y, raster.width(), raster.height());
        }
    }

    if do_invert {
        let skipped = invert(&mut raster);
        if skipped > 0 {
            eprintln!("Warning: {} pixel(s) were neither black, white nor transparent", skipped);
        }
    }

    let target = output.unwrap_or(input);
    if dry_run {
        println!("Would paint {} pixel(s) and write {}", painted, target.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    if let Err(e) = storage::save(&raster, target) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Painted {} pixel(s): {}", painted, target.display());
    ExitCode::from(EXIT_SUCCESS)
}

//! `mintile info` - describe an image's tile layout

use std::path::Path;
use std::process::ExitCode;

use crate::raster::{PixelFormat, Raster, TRANSPARENCY_KEY};
use crate::storage;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the info command
pub fn run_info(input: &Path, json: bool) -> ExitCode {
    let raster = match storage::open(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        println!("{}", summarize(&raster));
    } else {
        print_text(input, &raster);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Build the JSON summary for a raster.
///
/// `tiles` is 0 and `sprites` is null whenever the codec would reject the
/// raster.
fn summarize(raster: &Raster) -> serde_json::Value {
    let mut value = serde_json::json!({
        "width": raster.width(),
        "height": raster.height(),
        "mode": raster.format().mode_name(),
        "tile_aligned": raster.is_tile_aligned(),
        "tiles_x": raster.tiles_x(),
        "tiles_y": raster.tiles_y(),
        "tiles": tile_count(raster),
    });
    if raster.format() == PixelFormat::RgbTransparent {
        value["sprites"] = serde_json::json!(sprite_count(raster));
        value["masked_pixels"] = serde_json::json!(masked_pixels(raster));
    }
    value
}

/// Tiles the codec would emit, 0 for unaligned rasters.
fn tile_count(raster: &Raster) -> u32 {
    if raster.is_tile_aligned() {
        raster.tiles_x() * raster.tiles_y()
    } else {
        0
    }
}

/// 16x16 sprite cells, `None` unless the tiles group into fours.
fn sprite_count(raster: &Raster) -> Option<u32> {
    let tiles = tile_count(raster);
    (tiles > 0 && tiles % 4 == 0).then_some(tiles / 4)
}

fn masked_pixels(raster: &Raster) -> usize {
    raster.rgb_pixels().map(|p| p.iter().filter(|&&c| c == TRANSPARENCY_KEY).count()).unwrap_or(0)
}

fn print_text(input: &Path, raster: &Raster) {
    println!("{}", input.display());
    println!("  size:  {}x{}", raster.width(), raster.height());
    println!("  mode:  {}", raster.format());
    if raster.is_tile_aligned() {
        println!(
            "  tiles: {} ({}x{})",
            raster.tiles_x() * raster.tiles_y(),
            raster.tiles_x(),
            raster.tiles_y()
        );
    } else {
        println!("  tiles: none (size is not a multiple of 8)");
    }
    if raster.format() == PixelFormat::RgbTransparent {
        match sprite_count(raster) {
            Some(sprites) => println!("  sprites: {}", sprites),
            None => println!("  sprites: none (tile count is not a positive multiple of 4)"),
        }
        println!("  masked pixels: {}", masked_pixels(raster));
    }
}

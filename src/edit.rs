//! Pixel editing operations
//!
//! The active tool is always passed in by the caller; nothing here keeps
//! selection state.

use tracing::warn;

use crate::raster::{Raster, RGB_BLACK, RGB_WHITE, TRANSPARENCY_KEY};

/// Drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint black
    #[default]
    Pencil,
    /// Paint white
    Eraser,
    /// Paint the transparency key
    Mask,
}

impl Tool {
    /// Color this tool paints.
    pub fn color(self) -> u32 {
        match self {
            Tool::Pencil => RGB_BLACK,
            Tool::Eraser => RGB_WHITE,
            Tool::Mask => TRANSPARENCY_KEY,
        }
    }
}

/// Apply `tool` to the pixel at (`x`, `y`).
///
/// Coordinates outside the raster, including negative ones, are ignored and
/// return `false`. On a monochrome raster the mask tool paints black.
pub fn apply_tool(raster: &mut Raster, tool: Tool, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= raster.width() as i64 || y >= raster.height() as i64 {
        return false;
    }
    raster.set_pixel(x as u32, y as u32, tool.color())
}

/// Swap black and white pixels.
///
/// Transparent pixels are left alone. Other colors are left alone too, with
/// a warning; returns how many of those were skipped.
pub fn invert(raster: &mut Raster) -> usize {
    let mut skipped = 0;
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            match raster.pixel(x, y) {
                Some(RGB_BLACK) => {
                    raster.set_pixel(x, y, RGB_WHITE);
                }
                Some(RGB_WHITE) => {
                    raster.set_pixel(x, y, RGB_BLACK);
                }
                Some(TRANSPARENCY_KEY) | None => {}
                Some(other) => {
                    warn!("unhandled color {:#08x} at ({}, {})", other, x, y);
                    skipped += 1;
                }
            }
        }
    }
    skipped
}

/// Reset every pixel to the blank state for the raster's format.
pub fn clear(raster: &mut Raster) {
    *raster = Raster::new(raster.width(), raster.height(), raster.format());
}

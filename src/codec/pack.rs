//! Splitting a raster into 8x8 tiles and bit-packing each tile into a plane.
//!
//! Planes produced here are *pre-rotation*; see [`super::rotate`].

use super::{check_dimensions, CodecError, Plane};
use crate::raster::{PixelFormat, Raster, RGB_BLACK, TRANSPARENCY_KEY};

/// Pack every tile of `raster` into a plane, in tile-index order.
///
/// - Monochrome: plane byte `b` is the packed raster byte for line `b` of
///   the tile (MSB = leftmost pixel, set = white).
/// - RGB: bit `i` of byte `7 - b` is set when the pixel at line `b`, column
///   `i` is exactly [`RGB_BLACK`]. White, transparent and every other color
///   leave the bit clear.
pub fn pack(raster: &Raster) -> Result<Vec<Plane>, CodecError> {
    check_dimensions(raster)?;
    match raster.format() {
        PixelFormat::Monochrome => Ok(pack_packed(raster)),
        PixelFormat::RgbTransparent => Ok(pack_rgb(raster, RGB_BLACK)),
    }
}

/// Pack the mask plane of every tile: bits are set where the pixel equals
/// [`TRANSPARENCY_KEY`].
///
/// Monochrome rasters have no transparency and yield all-zero planes.
pub fn pack_mask(raster: &Raster) -> Result<Vec<Plane>, CodecError> {
    check_dimensions(raster)?;
    match raster.format() {
        PixelFormat::Monochrome => Ok(vec![[0u8; 8]; tile_count(raster)]),
        PixelFormat::RgbTransparent => Ok(pack_rgb(raster, TRANSPARENCY_KEY)),
    }
}

fn tile_count(raster: &Raster) -> usize {
    (raster.tiles_x() * raster.tiles_y()) as usize
}

fn pack_packed(raster: &Raster) -> Vec<Plane> {
    let raw = raster.packed_bytes().unwrap_or_default();
    let tiles_x = raster.tiles_x() as usize;
    let mut planes = vec![[0u8; 8]; tile_count(raster)];

    for (t, plane) in planes.iter_mut().enumerate() {
        let col = t % tiles_x;
        let row = t / tiles_x;
        for (b, byte) in plane.iter_mut().enumerate() {
            // tiles_x bytes per raster line, 8 lines per tile row
            *byte = raw[col + row * tiles_x * 8 + b * tiles_x];
        }
    }
    planes
}

fn pack_rgb(raster: &Raster, set_color: u32) -> Vec<Plane> {
    let raw = raster.rgb_pixels().unwrap_or_default();
    let tiles_x = raster.tiles_x() as usize;
    let width = raster.width() as usize;
    let mut planes = vec![[0u8; 8]; tile_count(raster)];

    for (t, plane) in planes.iter_mut().enumerate() {
        let col = t % tiles_x;
        let row = t / tiles_x;
        let origin = col * 8 + row * tiles_x * 64;
        for b in 0..8 {
            for i in 0..8 {
                if raw[origin + b * width + i] == set_color {
                    plane[7 - b] |= 1 << i;
                }
            }
        }
    }
    planes
}

//! Raster to hardware tile codec
//!
//! Turns a [`Raster`] into the byte layout the display hardware consumes:
//!
//! - **Tile mode** ([`PixelFormat::Monochrome`]): one plane per 8x8 tile,
//!   packed by [`pack`] and turned with [`rotate_forward`].
//! - **Sprite mode** ([`PixelFormat::RgbTransparent`]): graphic planes from
//!   [`pack`] and mask planes from [`pack_mask`], both turned with
//!   [`rotate_reverse`], then interleaved by [`build_sprite`].
//!
//! Tiles are enumerated row-major, so a 16x16 image is laid out as:
//!
//! ```text
//!  0 | 1
//! ---|---
//!  2 | 3
//! ```

pub mod pack;
pub mod rotate;
pub mod sprite;

pub use pack::{pack, pack_mask};
pub use rotate::{rotate_forward, rotate_reverse};
pub use sprite::build_sprite;

use thiserror::Error;
use tracing::debug;

use crate::raster::{PixelFormat, Raster};

/// One 8x8 bit plane. Byte `b` is row `b`, bit `i` is column `i`.
pub type Plane = [u8; 8];

/// Errors raised by the codec. All of them are caller precondition failures.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// Width or height is zero or not a multiple of 8
    #[error("image size {width}x{height} is not a positive multiple of 8 in both dimensions")]
    InvalidDimensions { width: u32, height: u32 },
    /// Sprite interleaving needs matching plane counts in groups of four tiles
    #[error("cannot build sprite from {graphic} graphic and {mask} mask planes (need equal counts, a multiple of 4)")]
    SpriteLayout { graphic: usize, mask: usize },
}

/// Convert a raster into its final hardware byte layout.
///
/// Monochrome rasters yield one plane per tile. RGB rasters yield the
/// interleaved sprite records, two planes per tile.
pub fn convert_to_tiles(raster: &Raster) -> Result<Vec<Plane>, CodecError> {
    let graphic = pack(raster)?;
    debug!(
        "packed {} tiles ({}x{}) from {} raster",
        graphic.len(),
        raster.tiles_x(),
        raster.tiles_y(),
        raster.format()
    );

    match raster.format() {
        PixelFormat::Monochrome => Ok(graphic.iter().map(rotate_forward).collect()),
        PixelFormat::RgbTransparent => {
            let graphic: Vec<Plane> = graphic.iter().map(rotate_reverse).collect();
            let mask: Vec<Plane> = pack_mask(raster)?.iter().map(rotate_reverse).collect();
            build_sprite(&graphic, &mask)
        }
    }
}

fn check_dimensions(raster: &Raster) -> Result<(), CodecError> {
    if raster.is_tile_aligned() {
        Ok(())
    } else {
        Err(CodecError::InvalidDimensions { width: raster.width(), height: raster.height() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{RGB_BLACK, RGB_WHITE, TRANSPARENCY_KEY};

    #[test]
    fn test_convert_monochrome_all_white() {
        let raster = Raster::new(8, 8, PixelFormat::Monochrome);
        let tiles = convert_to_tiles(&raster).unwrap();
        assert_eq!(tiles, vec![[0xFF; 8]]);
    }

    #[test]
    fn test_convert_monochrome_single_black_pixel() {
        let mut raster = Raster::new(8, 8, PixelFormat::Monochrome);
        // Leftmost pixel of the top row is the MSB of byte 0
        raster.set_pixel(0, 0, RGB_BLACK);
        let tiles = convert_to_tiles(&raster).unwrap();
        // Source bit (byte 0, bit 7) lands on (byte 0, bit 0) after rotate_forward
        let mut expected = [0xFF; 8];
        expected[0] = 0xFE;
        assert_eq!(tiles, vec![expected]);
    }

    #[test]
    fn test_convert_sprite_blank_is_fully_masked() {
        let raster = Raster::new(16, 16, PixelFormat::RgbTransparent);
        let planes = convert_to_tiles(&raster).unwrap();
        assert_eq!(planes.len(), 8);
        for (i, plane) in planes.iter().enumerate() {
            // Records alternate mask, mask, graphic, graphic
            if i % 4 < 2 {
                assert_eq!(*plane, [0xFF; 8], "plane {} should be mask", i);
            } else {
                assert_eq!(*plane, [0x00; 8], "plane {} should be graphic", i);
            }
        }
    }

    #[test]
    fn test_convert_sprite_quadrant_order() {
        // Paint tile 2 (bottom-left) black, leave everything else white
        let mut raster = Raster::from_rgb(16, 16, vec![RGB_WHITE; 256]).unwrap();
        for y in 8..16 {
            for x in 0..8 {
                raster.set_pixel(x, y, RGB_BLACK);
            }
        }
        let planes = convert_to_tiles(&raster).unwrap();
        let black = [0xFF; 8];
        let clear = [0x00; 8];
        // mask[0], mask[2], gfx[0], gfx[2], mask[1], mask[3], gfx[1], gfx[3]
        assert_eq!(planes, vec![clear, clear, clear, black, clear, clear, clear, clear]);
    }

    #[test]
    fn test_convert_sprite_single_mask_pixel() {
        let mut raster = Raster::from_rgb(16, 16, vec![RGB_WHITE; 256]).unwrap();
        raster.set_pixel(0, 0, TRANSPARENCY_KEY);
        let planes = convert_to_tiles(&raster).unwrap();
        // Top-left pixel packs to byte 7 bit 0, rotate_reverse moves it to byte 0 bit 0
        assert_eq!(planes[0], [0x01, 0, 0, 0, 0, 0, 0, 0]);
        assert!(planes[1..].iter().all(|p| *p == [0; 8]));
    }

    #[test]
    fn test_convert_sprite_needs_four_tiles() {
        let raster = Raster::new(16, 8, PixelFormat::RgbTransparent);
        let err = convert_to_tiles(&raster).unwrap_err();
        assert_eq!(err, CodecError::SpriteLayout { graphic: 2, mask: 2 });
    }

    #[test]
    fn test_convert_rejects_unaligned() {
        let raster = Raster::new(8, 12, PixelFormat::Monochrome);
        assert_eq!(
            convert_to_tiles(&raster).unwrap_err(),
            CodecError::InvalidDimensions { width: 8, height: 12 }
        );
    }

    #[test]
    fn test_convert_does_not_mutate_source() {
        let mut raster = Raster::new(16, 16, PixelFormat::RgbTransparent);
        raster.set_pixel(5, 9, RGB_BLACK);
        let before = raster.clone();
        convert_to_tiles(&raster).unwrap();
        assert_eq!(raster, before);
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::InvalidDimensions { width: 10, height: 8 };
        assert!(err.to_string().contains("10x8"));
        let err = CodecError::SpriteLayout { graphic: 2, mask: 2 };
        assert!(err.to_string().contains("multiple of 4"));
    }
}

//! In-memory pixel grids in the two formats the hardware understands.
//!
//! A [`Raster`] is either a 1-bit monochrome tile image or a 24-bit RGB
//! sprite image where [`TRANSPARENCY_KEY`] marks masked pixels.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Pure black. Set bits in a sprite's graphic plane.
pub const RGB_BLACK: u32 = 0x000000;

/// Pure white.
pub const RGB_WHITE: u32 = 0xFFFFFF;

/// Reserved color meaning "transparent" in sprite rasters. Never a paintable color.
pub const TRANSPARENCY_KEY: u32 = 0x800080;

/// Side length of a hardware tile in pixels.
pub const TILE_SIZE: u32 = 8;

/// Pixel storage format of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// One bit per pixel, 1 = white, 0 = black ("tile" mode)
    #[serde(alias = "tile")]
    Monochrome,
    /// 24-bit RGB with [`TRANSPARENCY_KEY`] as the mask color ("sprite" mode)
    #[serde(alias = "sprite", alias = "rgb")]
    RgbTransparent,
}

impl PixelFormat {
    /// Editor mode name for this format.
    pub fn mode_name(self) -> &'static str {
        match self {
            PixelFormat::Monochrome => "tile",
            PixelFormat::RgbTransparent => "sprite",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pixels {
    /// Row-major, MSB = leftmost pixel, each row padded to whole bytes
    Packed(Vec<u8>),
    /// Row-major 0xRRGGBB values
    Rgb(Vec<u32>),
}

/// A pixel grid owned by the editor.
///
/// Codec functions only ever borrow it; they never mutate the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Pixels,
}

impl Raster {
    /// Allocate a blank raster.
    ///
    /// Monochrome rasters start white, RGB rasters start fully transparent.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        info!("alloc new image: {:#x} x {:#x} ({})", width, height, format);
        let pixels = match format {
            PixelFormat::Monochrome => {
                let stride = packed_stride(width);
                let mut bytes = vec![0u8; stride * height as usize];
                for y in 0..height as usize {
                    let row = &mut bytes[y * stride..(y + 1) * stride];
                    for x in 0..width as usize {
                        row[x / 8] |= 0x80 >> (x % 8);
                    }
                }
                Pixels::Packed(bytes)
            }
            PixelFormat::RgbTransparent => {
                Pixels::Rgb(vec![TRANSPARENCY_KEY; pixel_count(width, height)])
            }
        };
        Self { width, height, pixels }
    }

    /// Build a monochrome raster from already packed rows.
    ///
    /// Returns `None` if `bytes` is not exactly `ceil(width / 8) * height` long.
    pub fn from_packed(width: u32, height: u32, bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() != packed_stride(width) * height as usize {
            return None;
        }
        Some(Self { width, height, pixels: Pixels::Packed(bytes) })
    }

    /// Build an RGB raster from row-major `0xRRGGBB` values.
    ///
    /// Returns `None` if `pixels` is not exactly `width * height` long. Bits
    /// above the low 24 are discarded.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        if pixels.len() != pixel_count(width, height) {
            return None;
        }
        let pixels = pixels.into_iter().map(|p| p & 0xFF_FFFF).collect();
        Some(Self { width, height, pixels: Pixels::Rgb(pixels) })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        match self.pixels {
            Pixels::Packed(_) => PixelFormat::Monochrome,
            Pixels::Rgb(_) => PixelFormat::RgbTransparent,
        }
    }

    /// Number of tile columns (`width / 8`).
    pub fn tiles_x(&self) -> u32 {
        self.width / TILE_SIZE
    }

    /// Number of tile rows (`height / 8`).
    pub fn tiles_y(&self) -> u32 {
        self.height / TILE_SIZE
    }

    /// True when both dimensions are positive multiples of the tile size.
    pub fn is_tile_aligned(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.width % TILE_SIZE == 0
            && self.height % TILE_SIZE == 0
    }

    /// Bytes per packed row of a monochrome raster.
    pub fn stride(&self) -> usize {
        match self.pixels {
            Pixels::Packed(_) => packed_stride(self.width),
            Pixels::Rgb(_) => self.width as usize,
        }
    }

    /// Packed monochrome storage, `None` for RGB rasters.
    pub fn packed_bytes(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Packed(bytes) => Some(bytes),
            Pixels::Rgb(_) => None,
        }
    }

    /// Row-major RGB storage, `None` for monochrome rasters.
    pub fn rgb_pixels(&self) -> Option<&[u32]> {
        match &self.pixels {
            Pixels::Rgb(pixels) => Some(pixels),
            Pixels::Packed(_) => None,
        }
    }

    /// Read a pixel as `0xRRGGBB`.
    ///
    /// Monochrome pixels read back as [`RGB_BLACK`] or [`RGB_WHITE`].
    /// Returns `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match &self.pixels {
            Pixels::Packed(bytes) => {
                let byte = bytes[y as usize * packed_stride(self.width) + x as usize / 8];
                if byte & (0x80 >> (x % 8)) != 0 {
                    Some(RGB_WHITE)
                } else {
                    Some(RGB_BLACK)
                }
            }
            Pixels::Rgb(pixels) => Some(pixels[rgb_index(self.width, x, y)]),
        }
    }

    /// Write a pixel. Returns `false` (and does nothing) outside the raster.
    ///
    /// Monochrome rasters store whichever of black and white is nearer to
    /// `rgb`; the transparency key lands on black.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let stride = packed_stride(self.width);
        match &mut self.pixels {
            Pixels::Packed(bytes) => {
                let idx = y as usize * stride + x as usize / 8;
                let bit = 0x80u8 >> (x % 8);
                if nearest_is_white(rgb) {
                    bytes[idx] |= bit;
                } else {
                    bytes[idx] &= !bit;
                }
            }
            Pixels::Rgb(pixels) => {
                pixels[rgb_index(self.width, x, y)] = rgb & 0xFF_FFFF;
            }
        }
        true
    }
}

fn packed_stride(width: u32) -> usize {
    width.div_ceil(8) as usize
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn rgb_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Nearest of black/white by euclidean distance reduces to the channel sum.
fn nearest_is_white(rgb: u32) -> bool {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    r + g + b >= 383
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_monochrome_is_white() {
        let raster = Raster::new(16, 8, PixelFormat::Monochrome);
        assert_eq!(raster.format(), PixelFormat::Monochrome);
        assert_eq!(raster.packed_bytes().unwrap(), &[0xFF; 16][..]);
        assert_eq!(raster.pixel(15, 7), Some(RGB_WHITE));
    }

    #[test]
    fn test_new_monochrome_odd_width_pads_with_zero() {
        let raster = Raster::new(10, 1, PixelFormat::Monochrome);
        assert_eq!(raster.stride(), 2);
        assert_eq!(raster.packed_bytes().unwrap(), &[0xFF, 0xC0]);
    }

    #[test]
    fn test_new_sprite_is_transparent() {
        let raster = Raster::new(16, 16, PixelFormat::RgbTransparent);
        assert!(raster.rgb_pixels().unwrap().iter().all(|&p| p == TRANSPARENCY_KEY));
        assert_eq!(raster.tiles_x(), 2);
        assert_eq!(raster.tiles_y(), 2);
    }

    #[test]
    fn test_set_pixel_monochrome() {
        let mut raster = Raster::new(8, 8, PixelFormat::Monochrome);
        assert!(raster.set_pixel(0, 0, RGB_BLACK));
        assert!(raster.set_pixel(7, 1, RGB_BLACK));
        assert_eq!(raster.packed_bytes().unwrap()[0], 0x7F);
        assert_eq!(raster.packed_bytes().unwrap()[1], 0xFE);
        assert_eq!(raster.pixel(0, 0), Some(RGB_BLACK));

        assert!(raster.set_pixel(0, 0, RGB_WHITE));
        assert_eq!(raster.pixel(0, 0), Some(RGB_WHITE));
    }

    #[test]
    fn test_set_pixel_monochrome_transparency_key_is_black() {
        let mut raster = Raster::new(8, 8, PixelFormat::Monochrome);
        raster.set_pixel(3, 3, TRANSPARENCY_KEY);
        assert_eq!(raster.pixel(3, 3), Some(RGB_BLACK));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut raster = Raster::new(8, 8, PixelFormat::RgbTransparent);
        assert!(!raster.set_pixel(8, 0, RGB_BLACK));
        assert!(!raster.set_pixel(0, 8, RGB_BLACK));
        assert_eq!(raster.pixel(8, 8), None);
    }

    #[test]
    fn test_from_rgb_rejects_wrong_length() {
        assert!(Raster::from_rgb(8, 8, vec![0; 63]).is_none());
        assert!(Raster::from_rgb(8, 8, vec![0; 64]).is_some());
    }

    #[test]
    fn test_from_rgb_masks_high_bits() {
        let raster = Raster::from_rgb(1, 1, vec![0xFF80_0080]).unwrap();
        assert_eq!(raster.pixel(0, 0), Some(TRANSPARENCY_KEY));
    }

    #[test]
    fn test_from_packed_rejects_wrong_length() {
        assert!(Raster::from_packed(16, 8, vec![0; 15]).is_none());
        assert!(Raster::from_packed(16, 8, vec![0; 16]).is_some());
    }

    #[test]
    fn test_pixel_math_does_not_wrap_at_u32() {
        assert_eq!(pixel_count(65536, 65536), 1usize << 32);
        assert_eq!(rgb_index(65536, 7, 65535), 65535 * 65536 + 7);
        assert_eq!(rgb_index(u32::MAX, u32::MAX, 1), 2 * u32::MAX as usize);
    }

    #[test]
    fn test_tile_alignment() {
        assert!(Raster::new(16, 24, PixelFormat::Monochrome).is_tile_aligned());
        assert!(!Raster::new(10, 8, PixelFormat::Monochrome).is_tile_aligned());
        assert!(!Raster::new(0, 8, PixelFormat::RgbTransparent).is_tile_aligned());
    }

    #[test]
    fn test_pixel_format_serde_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: PixelFormat,
        }
        let w: Wrapper = toml::from_str("mode = \"tile\"").unwrap();
        assert_eq!(w.mode, PixelFormat::Monochrome);
        let w: Wrapper = toml::from_str("mode = \"sprite\"").unwrap();
        assert_eq!(w.mode, PixelFormat::RgbTransparent);
    }
}

//! PNG load/save through the `image` crate

use std::fs;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use tracing::debug;

use crate::raster::{PixelFormat, Raster, RGB_WHITE};
use crate::storage::StorageError;

/// Load a PNG file into a raster.
///
/// Pure black/white grayscale images become [`PixelFormat::Monochrome`];
/// any other opaque 8-bit image becomes [`PixelFormat::RgbTransparent`].
pub fn load_png(path: &Path) -> Result<Raster, StorageError> {
    let bytes = fs::read(path)?;
    let image = image::load_from_memory(&bytes)?;
    raster_from_image(image)
}

/// Save a raster as PNG, creating parent directories if needed.
///
/// Monochrome rasters are written as 8-bit grayscale with only 0 and 255,
/// which [`load_png`] reads back as monochrome.
pub fn save_png(raster: &Raster, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    raster_to_image(raster).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Convert a decoded image into a raster, inferring the pixel format.
///
/// # Errors
///
/// [`StorageError::UnsupportedPixelFormat`] for images with more than 8 bits
/// per channel, float channels, or any pixel that is not fully opaque.
pub fn raster_from_image(image: DynamicImage) -> Result<Raster, StorageError> {
    let color = image.color();
    let unsupported =
        |why: &str| StorageError::UnsupportedPixelFormat(format!("{:?} ({})", color, why));

    let raster = match image {
        DynamicImage::ImageLuma8(gray) => gray_to_raster(&gray),
        DynamicImage::ImageLumaA8(gray) => {
            if gray.pixels().any(|p| p.0[1] != 255) {
                return Err(unsupported("translucent pixels"));
            }
            gray_to_raster(&DynamicImage::ImageLumaA8(gray).to_luma8())
        }
        DynamicImage::ImageRgb8(rgb) => rgb_to_raster(&rgb),
        DynamicImage::ImageRgba8(rgba) => {
            if rgba.pixels().any(|p| p.0[3] != 255) {
                return Err(unsupported("translucent pixels"));
            }
            rgb_to_raster(&DynamicImage::ImageRgba8(rgba).to_rgb8())
        }
        _ => return Err(unsupported("only 8-bit channels are supported")),
    };

    debug!(
        "decoded {:?} image as {}x{} {} raster",
        color,
        raster.width(),
        raster.height(),
        raster.format()
    );
    Ok(raster)
}

/// Convert a raster into an image ready for encoding.
pub fn raster_to_image(raster: &Raster) -> DynamicImage {
    match raster.format() {
        PixelFormat::Monochrome => {
            DynamicImage::ImageLuma8(GrayImage::from_fn(raster.width(), raster.height(), |x, y| {
                if raster.pixel(x, y) == Some(RGB_WHITE) {
                    Luma([255])
                } else {
                    Luma([0])
                }
            }))
        }
        PixelFormat::RgbTransparent => {
            DynamicImage::ImageRgb8(RgbImage::from_fn(raster.width(), raster.height(), |x, y| {
                let p = raster.pixel(x, y).unwrap_or_default();
                Rgb([(p >> 16) as u8, (p >> 8) as u8, p as u8])
            }))
        }
    }
}

fn gray_to_raster(gray: &GrayImage) -> Raster {
    let (width, height) = gray.dimensions();
    let format = if gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255) {
        PixelFormat::Monochrome
    } else {
        PixelFormat::RgbTransparent
    };
    let mut raster = Raster::new(width, height, format);
    for (x, y, p) in gray.enumerate_pixels() {
        let v = p.0[0] as u32;
        raster.set_pixel(x, y, (v << 16) | (v << 8) | v);
    }
    raster
}

fn rgb_to_raster(rgb: &RgbImage) -> Raster {
    let (width, height) = rgb.dimensions();
    let mut raster = Raster::new(width, height, PixelFormat::RgbTransparent);
    for (x, y, p) in rgb.enumerate_pixels() {
        let [r, g, b] = p.0;
        raster.set_pixel(x, y, ((r as u32) << 16) | ((g as u32) << 8) | b as u32);
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{RGB_BLACK, TRANSPARENCY_KEY};
    use image::{ImageBuffer, LumaA, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_monochrome_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiles.png");

        let mut raster = Raster::new(16, 8, PixelFormat::Monochrome);
        raster.set_pixel(0, 0, RGB_BLACK);
        raster.set_pixel(15, 7, RGB_BLACK);
        save_png(&raster, &path).unwrap();

        let loaded = load_png(&path).unwrap();
        assert_eq!(loaded, raster);
    }

    #[test]
    fn test_sprite_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprite.png");

        let mut raster = Raster::new(16, 16, PixelFormat::RgbTransparent);
        raster.set_pixel(1, 1, RGB_BLACK);
        raster.set_pixel(2, 2, RGB_WHITE);
        raster.set_pixel(3, 3, 0x123456);
        save_png(&raster, &path).unwrap();

        let loaded = load_png(&path).unwrap();
        assert_eq!(loaded.format(), PixelFormat::RgbTransparent);
        assert_eq!(loaded.pixel(0, 0), Some(TRANSPARENCY_KEY));
        assert_eq!(loaded.pixel(3, 3), Some(0x123456));
        assert_eq!(loaded, raster);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/tiles.png");
        save_png(&Raster::new(8, 8, PixelFormat::Monochrome), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_without_png_extension_still_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiles");
        save_png(&Raster::new(8, 8, PixelFormat::RgbTransparent), &path).unwrap();
        let loaded = load_png(&path).unwrap();
        assert_eq!(loaded.width(), 8);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_png(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_grayscale_with_midtones_is_rgb() {
        let gray = GrayImage::from_fn(8, 8, |x, _| Luma([(x * 30) as u8]));
        let raster = raster_from_image(DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(raster.format(), PixelFormat::RgbTransparent);
        assert_eq!(raster.pixel(1, 0), Some(0x1E1E1E));
    }

    #[test]
    fn test_opaque_rgba_is_rgb() {
        let rgba = ImageBuffer::from_pixel(8, 8, Rgba([0x80, 0x00, 0x80, 255]));
        let raster = raster_from_image(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(raster.format(), PixelFormat::RgbTransparent);
        assert_eq!(raster.pixel(7, 7), Some(TRANSPARENCY_KEY));
    }

    #[test]
    fn test_opaque_gray_alpha_black_white_is_monochrome() {
        let gray = ImageBuffer::from_fn(8, 8, |x, _| LumaA([if x < 4 { 0 } else { 255 }, 255]));
        let raster = raster_from_image(DynamicImage::ImageLumaA8(gray)).unwrap();
        assert_eq!(raster.format(), PixelFormat::Monochrome);
        assert_eq!(raster.packed_bytes().unwrap(), &[0x0F; 8][..]);
    }

    #[test]
    fn test_translucent_rgba_is_unsupported() {
        let rgba = ImageBuffer::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let err = raster_from_image(DynamicImage::ImageRgba8(rgba)).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedPixelFormat(_)));
    }

    #[test]
    fn test_sixteen_bit_is_unsupported() {
        let image = DynamicImage::new_rgb16(8, 8);
        let err = raster_from_image(image).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedPixelFormat(_)));
    }
}

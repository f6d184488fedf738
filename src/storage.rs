//! Open and save dispatch by file format

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::codec::{convert_to_tiles, CodecError};
use crate::emit::{emit, symbol_name};
use crate::format::FileType;
use crate::png::{load_png, save_png};
use crate::raster::Raster;

/// Errors from opening or saving a raster
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The format is recognized but reading/writing it is not implemented
    #[error("{0} files are not supported yet")]
    UnimplementedFormat(FileType),
    /// The decoded image has no matching raster format
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),
    /// Underlying file read/write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// PNG decode/encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// The raster cannot be converted to hardware tiles
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Open a raster, picking the reader by file extension.
///
/// Only PNG can be read; C and assembly sources return
/// [`StorageError::UnimplementedFormat`].
pub fn open(path: &Path) -> Result<Raster, StorageError> {
    info!("loading image {}", display_name(path));
    match FileType::from_path(path) {
        FileType::RasterImage => load_png(path),
        other => Err(StorageError::UnimplementedFormat(other)),
    }
}

/// Save a raster, picking the writer by file extension.
///
/// Assembly output returns [`StorageError::UnimplementedFormat`] and leaves
/// the filesystem untouched.
pub fn save(raster: &Raster, path: &Path) -> Result<(), StorageError> {
    info!("saving image as {}", display_name(path));
    match FileType::from_path(path) {
        FileType::RasterImage => save_png(raster, path),
        FileType::HardwareCSource => save_c(raster, path, None),
        FileType::AssemblySource => Err(StorageError::UnimplementedFormat(FileType::AssemblySource)),
    }
}

/// Convert a raster and write it as a C array.
///
/// The array is named after the file (minus extension) unless `symbol` is
/// given. Nothing is written if conversion fails.
pub fn save_c(raster: &Raster, path: &Path, symbol: Option<&str>) -> Result<(), StorageError> {
    let symbol = match symbol {
        Some(s) => s.to_string(),
        None => symbol_name(&display_name(path)),
    };
    let text = export_c_source(raster, &symbol)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    Ok(())
}

/// Convert a raster into C source text without touching the filesystem.
pub fn export_c_source(raster: &Raster, symbol: &str) -> Result<String, CodecError> {
    let planes = convert_to_tiles(raster)?;
    Ok(emit(&planes, symbol))
}

fn display_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

//! Configuration schema types for `mintile.toml`
//!
//! Defines the structure and validation rules for mintile configuration.

use serde::{Deserialize, Serialize};

use crate::format::FileType;
use crate::raster::{PixelFormat, TILE_SIZE};

/// Canvas defaults used when allocating a new image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels, a positive multiple of 8
    #[serde(default = "default_side")]
    pub width: u32,
    /// Height in pixels, a positive multiple of 8
    #[serde(default = "default_side")]
    pub height: u32,
    /// "tile" (monochrome) or "sprite" (RGB with transparency)
    #[serde(default = "default_mode")]
    pub mode: PixelFormat,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: default_side(), height: default_side(), mode: default_mode() }
    }
}

fn default_side() -> u32 {
    16
}

fn default_mode() -> PixelFormat {
    PixelFormat::RgbTransparent
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Extension used by `convert` when no output is given
    #[serde(default = "default_export_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { format: default_export_format() }
    }
}

fn default_export_format() -> String {
    "c".to_string()
}

impl ExportConfig {
    /// The configured default output format, if it names a known one.
    pub fn file_type(&self) -> Option<FileType> {
        FileType::from_extension(&self.format)
    }
}

/// Root of `mintile.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintileConfig {
    /// New-image defaults
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "canvas.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mintile.toml: '{}' {}", self.field, self.message)
    }
}

impl MintileConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [("canvas.width", self.canvas.width), ("canvas.height", self.canvas.height)] {
            if value == 0 || value % TILE_SIZE != 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive multiple of 8".to_string(),
                });
            }
        }

        if self.export.file_type().is_none() {
            errors.push(ConfigValidationError {
                field: "export.format".to_string(),
                message: format!("'{}' is not one of: c, png, asm", self.export.format),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

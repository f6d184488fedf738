//! File format resolution by extension

use std::fmt;
use std::path::Path;

/// File formats the editor reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// `.asm` assembly data (not supported yet)
    AssemblySource,
    /// `.c` byte array for firmware builds
    HardwareCSource,
    /// PNG, and the fallback for anything unrecognized
    RasterImage,
}

impl FileType {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::AssemblySource => "asm",
            FileType::HardwareCSource => "c",
            FileType::RasterImage => "png",
        }
    }

    /// Look up a format by its bare extension (`"c"`, `"png"`, `"asm"`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "asm" => Some(FileType::AssemblySource),
            "c" => Some(FileType::HardwareCSource),
            "png" => Some(FileType::RasterImage),
            _ => None,
        }
    }

    /// Resolve the format of a path from its file name.
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        resolve(&name)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::AssemblySource => "assembly source",
            FileType::HardwareCSource => "C source",
            FileType::RasterImage => "PNG image",
        };
        f.write_str(name)
    }
}

/// Pick a format from a file name, case-insensitively.
///
/// `.asm` and `.c` are recognized; everything else is a PNG.
pub fn resolve(file_name: &str) -> FileType {
    let name = file_name.to_lowercase();
    if name.ends_with(".asm") {
        FileType::AssemblySource
    } else if name.ends_with(".c") {
        FileType::HardwareCSource
    } else {
        FileType::RasterImage
    }
}

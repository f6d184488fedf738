//! mintile - Library for converting pixel art into 8x8 hardware tiles
//!
//! This library provides functionality to:
//! - Hold 1-bit tile images and RGB sprite images with a transparency key
//! - Pack, rotate and interleave them into the hardware's tile/sprite layout
//! - Emit the packed bytes as a C array, and load/save PNG files

pub mod cli;
pub mod codec;
pub mod config;
pub mod edit;
pub mod emit;
pub mod format;
pub mod logging;
pub mod png;
pub mod raster;
pub mod storage;

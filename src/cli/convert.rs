//! `mintile convert` - open an image and save it in another format

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::MintileConfig;
use crate::format::FileType;
use crate::storage::{self, StorageError};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Output path when `-o` is omitted: the input with the export extension.
pub(crate) fn default_output(input: &Path, config: &MintileConfig) -> PathBuf {
    let ty = config.export.file_type().unwrap_or(FileType::HardwareCSource);
    input.with_extension(ty.extension())
}

/// Execute the convert command
pub fn run_convert(
    config: &MintileConfig,
    input: &Path,
    output: Option<&Path>,
    symbol: Option<&str>,
) -> ExitCode {
    let output = match output {
        Some(o) => o.to_path_buf(),
        None => default_output(input, config),
    };

    let output_type = FileType::from_path(&output);
    if symbol.is_some() && output_type != FileType::HardwareCSource {
        eprintln!(
            "Error: --symbol only applies to C output, but {} is a {}",
            output.display(),
            output_type
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let raster = match storage::open(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = match symbol {
        Some(symbol) => storage::save_c(&raster, &output, Some(symbol)),
        None => storage::save(&raster, &output),
    };

    match result {
        Ok(()) => {
            println!("Saved {}: {}", output_type, output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(StorageError::UnimplementedFormat(ty)) => {
            eprintln!("Error: cannot write {}: {} output is not supported yet", output.display(), ty);
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

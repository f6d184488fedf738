//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod draw;
mod info;
mod new;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, MintileConfig};
use crate::logging::setup_logging;
use crate::raster::PixelFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// mintile - Edit and convert pixel art for 8x8 tile hardware
#[derive(Parser)]
#[command(name = "mintile")]
#[command(about = "mintile - Convert pixel art into hardware tiles and masked sprites")]
#[command(version)]
pub struct Cli {
    /// Path to mintile.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Image mode as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// 1-bit black/white tiles
    Tile,
    /// RGB sprite with transparency mask
    Sprite,
}

impl From<Mode> for PixelFormat {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tile => PixelFormat::Monochrome,
            Mode::Sprite => PixelFormat::RgbTransparent,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blank image
    New {
        /// Output file (.png, .c)
        output: PathBuf,

        /// Width in pixels, a multiple of 8 (default from config: 16)
        #[arg(long)]
        width: Option<u32>,

        /// Height in pixels, a multiple of 8 (default from config: 16)
        #[arg(long)]
        height: Option<u32>,

        /// Image mode (default from config: sprite)
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// Show size, mode and tile layout of an image
    Info {
        /// Input image
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paint pixels with the pencil, eraser or mask tool
    ///
    /// Tools are applied in the order pencil, eraser, mask, then --invert.
    Draw {
        /// Input image to modify
        input: PathBuf,

        /// Paint black at x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        pencil: Vec<String>,

        /// Paint white at x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        erase: Vec<String>,

        /// Paint transparent at x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        mask: Vec<String>,

        /// Swap black and white after drawing
        #[arg(long)]
        invert: bool,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Convert an image to another format (.c, .png, .asm)
    Convert {
        /// Input image
        input: PathBuf,

        /// Output file. If omitted: input with the configured export extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Array name for C output (default: output file name without extension)
        #[arg(long)]
        symbol: Option<String>,
    },
}

/// Entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match load_cli_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match cli.command {
        Commands::New { output, width, height, mode } => {
            new::run_new(&config, &output, width, height, mode)
        }
        Commands::Info { input, json } => info::run_info(&input, json),
        Commands::Draw { input, pencil, erase, mask, invert, output, dry_run } => draw::run_draw(
            &input,
            &pencil,
            &erase,
            &mask,
            invert,
            output.as_deref(),
            dry_run,
        ),
        Commands::Convert { input, output, symbol } => {
            convert::run_convert(&config, &input, output.as_deref(), symbol.as_deref())
        }
    }
}

fn load_cli_config(path: Option<&Path>) -> Result<MintileConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

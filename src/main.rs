//! Command-line image converter.
//!
//! Converts images to PNG, JPEG, ICO or ICNS and crops them to a fixed
//! aspect ratio.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use converter_core::{AspectRatio, ConverterConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "image-converter")]
#[command(about = "Convert images to PNG, JPEG, ICO or ICNS")]
struct Cli {
    /// Config file (defaults to $IMAGE_CONVERTER_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to another format
    Convert {
        /// Input image (png, jpg, bmp, ico, icns)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Output format: png, jpeg, ico or icns (defaults to the output extension)
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// Crop to this aspect ratio (W:H) before converting
        #[arg(long, value_name = "W:H")]
        crop: Option<AspectRatio>,
    },
    /// Crop an image to an aspect ratio, keeping the center
    Crop {
        /// Input image
        input: PathBuf,
        /// Output file; the format follows its extension
        output: PathBuf,
        /// Target aspect ratio (e.g. 16:9)
        #[arg(short, long, value_name = "W:H")]
        ratio: AspectRatio,
    },
    /// List the preset aspect ratios
    Ratios,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = ConverterConfig::resolve(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                crop,
            } => commands::convert::run(&config, &input, &output, format, crop).map(|path| {
                println!("Created {}", path.display());
            }),
            Commands::Crop {
                input,
                output,
                ratio,
            } => commands::crop::run(&config, &input, &output, ratio).map(|path| {
                println!("Created {}", path.display());
            }),
            Commands::Ratios => {
                commands::ratios::run();
                Ok(())
            }
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

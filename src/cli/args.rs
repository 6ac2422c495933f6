use clap::Parser;
use std::path::PathBuf;

use woundmet::{RegionOrder, ReportFormat};

#[derive(Parser)]
#[command(name = "woundmet", version, about = "WOUNDMET CLI")]
pub struct CliArgs {
    /// Input mask image (any format the image decoder supports)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Optional output path for the annotated image (png, jpg, bmp, tiff)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Physical size of one pixel in centimeters [default: 0.03]
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// Binarization threshold: intensities above it are foreground [default: 127]
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Region ordering (discovery, top-left, area) [default: discovery]
    #[arg(long, value_enum)]
    pub order: Option<RegionOrder>,

    /// Orientation arrow length in pixels [default: 50]
    #[arg(long)]
    pub arrow_length: Option<f64>,

    /// Report format printed to stdout (text or json)
    #[arg(short = 'f', long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// JSON file with extraction parameters; explicit flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "gui-raster")]
#[command(about = "Render a demo GUI frame to a PNG snapshot", long_about = None)]
pub struct Cli {
    /// PNG file to write
    #[arg(short, long, default_value = "gui_raster_snapshot.png")]
    pub output: PathBuf,

    /// Surface width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: i32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 300)]
    pub height: i32,

    /// JSON file with interpreter settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

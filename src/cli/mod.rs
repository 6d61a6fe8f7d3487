//! CLI entry point for Atelier.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Atelier content-creation CLI
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about = "Generate captioned images and videos")]
pub struct Cli {
    /// Path to an atelier.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sign in as this user so results are recorded in history
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a batch of captioned images
    Image(ImageArgs),
    /// Generate a captioned video
    Video(VideoArgs),
    /// Run every row of a batch sheet
    Sheet(SheetArgs),
    /// List the signed-in user's history
    History,
}

/// Arguments for `atelier image`.
#[derive(Parser, Debug)]
pub struct ImageArgs {
    /// Text to render onto the images
    #[arg(short, long)]
    pub overlay: Option<String>,

    /// Number of variations (1-4)
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub count: u32,

    /// Directory to write the images into
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Prompt (positional)
    pub prompt: String,
}

/// Arguments for `atelier video`.
#[derive(Parser, Debug)]
pub struct VideoArgs {
    /// Soundtrack direction
    #[arg(short, long)]
    pub music: Option<String>,

    /// File to write the video into
    #[arg(short, long, default_value = "atelier.mp4")]
    pub out: PathBuf,

    /// Prompt (positional)
    pub prompt: String,
}

/// Arguments for `atelier sheet`.
#[derive(Parser, Debug)]
pub struct SheetArgs {
    /// Sheet TOML file
    pub path: PathBuf,
}

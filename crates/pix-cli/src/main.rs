//! pix - raster image editing CLI
//!
//! Thin caller around the pix-rs editing core: loads an image, applies
//! catalog filters, steps the undo history, saves the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "pix")]
#[command(author, version, about = "Raster image editing CLI")]
#[command(long_about = "
Applies the pix-rs filter catalog to PNG/JPEG images, with undo history
for filter chains.

Examples:
  pix info photo.png                         # Show image info
  pix apply photo.png -o out.png sepia       # One filter
  pix apply photo.png -o out.png solarize:100
  pix apply photo.png -o out.png custom --size 3 --weights 0,-1,0,-1,5,-1,0,-1,0
  pix chain photo.png -o out.png sepia gaussian-blur:1.5 invert
  pix chain photo.png -o out.png sepia invert --undo 1
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply a single filter
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Apply a sequence of filters through the undo history
    #[command(visible_alias = "c")]
    Chain(ChainArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image (.png, .jpg, .jpeg)
    input: PathBuf,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image (.png, .jpg, .jpeg)
    input: PathBuf,

    /// Filter spec: a catalog name with an optional `:value` parameter,
    /// e.g. `sepia`, `solarize:100`, `gaussian-blur:1.5`, or `custom`
    /// with --size/--weights
    filter: String,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel side length for `custom` (odd, >= 1)
    #[arg(long)]
    size: Option<usize>,

    /// Comma-separated kernel weights for `custom` (size * size values)
    #[arg(long, allow_hyphen_values = true)]
    weights: Option<String>,

    /// Noise seed; defaults to a time-derived value
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ChainArgs {
    /// Input image (.png, .jpg, .jpeg)
    input: PathBuf,

    /// Filter specs, applied in order (see `apply` for the syntax)
    #[arg(required = true)]
    filters: Vec<String>,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Undo this many steps after applying the chain, before saving
    #[arg(long, default_value = "0")]
    undo: usize,

    /// Noise seed; defaults to a time-derived value
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Chain(args) => commands::chain::run(args, cli.verbose),
    }
}

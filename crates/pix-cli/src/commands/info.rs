//! Info command
//!
//! Prints basic information about an image file.

use crate::InfoArgs;
use anyhow::{Context, Result};
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), "info::run");

    let image = pix_io::read(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let (width, height) = image.dimensions();
    println!("{}", args.input.display());
    println!("  dimensions: {width}x{height}");
    println!("  channels:   {} (RGB)", image.channels());
    println!("  pixels:     {}", image.pixel_count());

    if verbose {
        println!("  bytes:      {}", image.data().len());
    }

    Ok(())
}

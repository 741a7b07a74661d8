//! Apply command
//!
//! Loads an image, applies one catalog filter, saves the result.

use crate::ApplyArgs;
use anyhow::{bail, Context, Result};
use pix_ops::FilterRequest;
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(args: ApplyArgs, verbose: bool) -> Result<()> {
    trace!(
        input = %args.input.display(),
        filter = %args.filter,
        "apply::run"
    );

    let seed = args.seed.unwrap_or_else(super::derive_seed);

    let request = if args.filter == "custom" {
        let (Some(size), Some(weights)) = (args.size, args.weights.as_deref()) else {
            bail!("custom filter needs both --size and --weights");
        };
        FilterRequest::Custom {
            size,
            weights: super::parse_weights(weights)?,
        }
    } else {
        if args.size.is_some() || args.weights.is_some() {
            bail!("--size/--weights only apply to the `custom` filter");
        }
        super::parse_filter_spec(&args.filter, seed)?
    };

    let image = pix_io::read(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if verbose {
        println!(
            "Applying {} to {}",
            request.name(),
            args.input.display()
        );
    }

    let result = pix_ops::apply(&image, &request)
        .with_context(|| format!("Filter {} failed", request.name()))?;

    pix_io::write(&args.output, &result)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}

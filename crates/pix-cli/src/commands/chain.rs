//! Chain command
//!
//! Applies a sequence of filters, committing each result to an undo
//! history, optionally stepping back before saving. This is the editing
//! session loop of the core, driven non-interactively.

use crate::ChainArgs;
use anyhow::{Context, Result};
use pix_history::HistoryStack;
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(args: ChainArgs, verbose: bool) -> Result<()> {
    trace!(
        input = %args.input.display(),
        filters = args.filters.len(),
        undo = args.undo,
        "chain::run"
    );

    let seed = args.seed.unwrap_or_else(super::derive_seed);

    // Parse the whole chain up front so a typo fails before any work.
    let requests = args
        .filters
        .iter()
        .map(|spec| super::parse_filter_spec(spec, seed))
        .collect::<Result<Vec<_>>>()?;

    let image = pix_io::read(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    // Opening an image starts a fresh history with the loaded state.
    let mut history = HistoryStack::new();
    history.add_state(image);

    for request in &requests {
        if verbose {
            println!("Applying {}", request.name());
        }
        let current = history
            .current()
            .context("History unexpectedly empty")?;
        let next = pix_ops::apply(current, request)
            .with_context(|| format!("Filter {} failed", request.name()))?;
        history.add_state(next);
    }

    for _ in 0..args.undo {
        history.undo();
    }
    if verbose && args.undo > 0 {
        println!("Stepped back {} edit(s)", args.undo);
    }

    let final_image = history
        .current()
        .context("History unexpectedly empty")?;
    pix_io::write(&args.output, final_image)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}

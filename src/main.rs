use cardsheet::{PipelineBuilder, PipelineError};
use std::env;

/// Lays a deck out and prints its page plan.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Lays out a card deck on printable sheets.");
        eprintln!();
        eprintln!("Usage: {} <path/to/deck.json> [path/to/plan.json]", args[0]);
        eprintln!();
        eprintln!("Without an output path the plan is printed to stdout as JSON.");
        eprintln!("Set RUST_LOG=info for a layout summary.");
        std::process::exit(1);
    }

    let deck_path = &args[1];
    log::info!("Loading deck from {}", deck_path);
    let mut pipeline = PipelineBuilder::new().with_deck_file(deck_path)?.build()?;

    match args.get(2) {
        Some(output_path) => {
            let plan = pipeline.write_plan(output_path)?;
            eprint!("{plan}");
            eprintln!("Wrote {} page(s) to {}", plan.pages.len(), output_path);
        }
        None => {
            let plan = pipeline.plan()?;
            println!("{}", plan.to_json()?);
        }
    }
    Ok(())
}

//! Vocal-removal tool entry point
//!
//! `remvocals <SOURCE> <DEST>`

use anyhow::Context;
use clap::Parser;
use std::process;
use wavfx::{init_logging, VocalArgs, VocalConfig, VocalRemover};

fn main() {
    let args = VocalArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: VocalArgs) -> anyhow::Result<()> {
    let config = VocalConfig::from_args(args);
    let source = config.input_path.clone();
    VocalRemover::new(config).run()
        .with_context(|| format!("failed to remove vocals from {}", source.display()))?;
    Ok(())
}

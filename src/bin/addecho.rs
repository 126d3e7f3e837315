//! Echo tool entry point
//!
//! `addecho [-d delay] [-v volume_scale] <SOURCE> <DEST>`

use anyhow::Context;
use clap::Parser;
use std::process;
use wavfx::{init_logging, EchoArgs, EchoConfig, EchoProcessor};

fn main() {
    let args = EchoArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: EchoArgs) -> anyhow::Result<()> {
    if args.verbose {
        log::debug!("{}", wavfx::get_library_info());
    }

    let config = EchoConfig::from_args(args)?;
    let processor = EchoProcessor::new(config)?;
    processor.run().with_context(|| format!(
        "failed to add echo to {}", processor.config().input_path.display()
    ))?;
    Ok(())
}

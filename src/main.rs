//! Main entry point for the rdocgen application.

use clap::Parser;
use rdocgen::{cli::Args, display_docgen_results, read_docgen_config, run_docgen};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Also installs the bridge for `log` records emitted by the library.
    if let Err(e) = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn open_events(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

pub fn main() {
    init_logging();
    let args = Args::parse();

    let rootpath = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to get current directory: {e}");
            std::process::exit(1);
        }
    };

    let config = args.apply_to(read_docgen_config(&rootpath), &rootpath);

    let reader = match open_events(&args.events) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Failed to open event log {}: {e}", args.events);
            std::process::exit(1);
        }
    };

    match run_docgen(config, reader) {
        Ok(report) => display_docgen_results(&report),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

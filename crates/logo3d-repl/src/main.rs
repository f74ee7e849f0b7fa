//! logo3d console.
//!
//! Reads commands line by line, runs them through an interpreter session and
//! plays the resulting turtle motion headlessly.

mod cli;
mod console;

use std::fs::File;
use std::io::{self, BufReader};

use cli::{parse_args, print_usage, CliError};
use console::Console;

/// Install a log subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(CliError::HelpRequested) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            std::process::exit(2);
        }
    };
    let config = match parsed.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    tracing::debug!(?config, "starting console");

    let stdout = io::stdout();
    let mut console = Console::new(config.options, config.stepper, stdout.lock());
    let result = match &parsed.script {
        Some(path) => match File::open(path) {
            Ok(file) => console.run(BufReader::new(file)),
            Err(e) => {
                eprintln!("error: cannot open {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => console.run(io::stdin().lock()),
    };
    tracing::debug!(
        state = ?console.stepper().state(),
        segments = console.stepper().trail().len(),
        "console closed"
    );
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

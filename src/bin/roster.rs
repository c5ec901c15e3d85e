//! Roster Binary
//!
//! Starts an interactive session over `students.json` in the working
//! directory.

use std::io;

use clap::Parser;
use roster::{Config, RecordStore, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// Roster
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Interactive student record manager backed by students.json")]
#[command(version)]
struct Args {}

fn main() {
    let _args = Args::parse();

    // Diagnostics go to stderr so they never interleave with the menu
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("Roster v{}", roster::VERSION);

    let config = Config::default();
    let (mut store, outcome) = match RecordStore::open(config) {
        Ok(opened) => opened,
        Err(e) => {
            tracing::error!("Failed to open record store: {}", e);
            eprintln!("Error: could not read student records: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&mut store, stdin.lock(), stdout.lock());

    let result = session
        .report_load(&outcome)
        .and_then(|_| session.run());

    if let Err(e) = result {
        tracing::error!("Session ended with error: {}", e);
        std::process::exit(1);
    }
}

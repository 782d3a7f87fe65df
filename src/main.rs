// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! fieldcheck binary.
//!
//! Reads a JSON object from a file or stdin, checks it against the rules in
//! `fieldcheck.toml` (plus any `--rule` overrides) and prints the messages
//! for every failing field. Exits with status 1 when the data is invalid or
//! the rules themselves are malformed.

use clap::Parser;
use fieldcheck::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    // A failed check surfaces as an error too, after the report is printed.
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so the JSON report on stdout stays parseable.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("fieldcheck=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}

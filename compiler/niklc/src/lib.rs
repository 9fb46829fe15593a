//! Nikl interpreter driver.
//!
//! Glue between the pipeline crates and the `nikl` binary: running scripts,
//! the interactive REPL, and the `lex`/`parse` inspection commands.

pub mod commands;
mod error;
mod pipeline;

pub use error::NiklError;
pub use pipeline::{parse_source, run_source};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enabled only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=nikl_eval=debug`. Logs go to stderr so stdout carries nothing
/// but program output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

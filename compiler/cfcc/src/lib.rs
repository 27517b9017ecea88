//! CFC driver library.
//!
//! Parses command-line options, builds a [`Hierarchy`](cfc_hierarchy::Hierarchy)
//! from the given directories and reports the resolved class order together
//! with the files whose generated code is stale.

mod driver;
mod options;

use std::sync::Once;

pub use driver::{run, CliError, ClassInfo, Report};
pub use options::{parse_options, Options, USAGE};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=cfc_model=debug` or
/// `RUST_LOG=cfc_hierarchy=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

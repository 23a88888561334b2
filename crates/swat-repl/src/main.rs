//! swat REPL entry point.
//!
//! Launch the interactive shell:
//! ```bash
//! cargo run -p swat-repl            # kernel "default"
//! cargo run -p swat-repl -- notes   # kernel "notes"
//! ```
//!
//! State lives in `$SWAT_DATA_DIR` or `$XDG_DATA_HOME/swat/kernels/<name>.json`.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "default".to_string());
    swat_repl::run(&name)
}

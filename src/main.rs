//! # Bikeshare Explorer Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialise logging (file + stderr)
//!   ├─> Parse CLI arguments (clap) and load settings
//!   │
//!   ├─> If a subcommand was given:
//!   │   └─> Run it and exit
//!   │
//!   └─> Otherwise:
//!       └─> Start the interactive prompt session
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stderr)] // Logging may not be up yet

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    if let Err(e) = bikeshare::logging::init() {
        eprintln!("Logging disabled: {e:#}");
    }

    let cli = cli::Cli::parse();
    let settings = cli.settings()?;
    tracing::debug!(?settings, "Settings loaded");

    match cli.command {
        Some(command) => cli::run_command(command, &settings, cli.config.as_deref()),
        None => cli::run_interactive(&settings),
    }
}

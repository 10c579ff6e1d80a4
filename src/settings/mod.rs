//! Command line and file settings. `NETBACK_API_URL` overrides the API base
//! address. See `bin/settings_demo.rs` for a walkthrough.

mod cli;
pub use clap::{Parser, Subcommand};
pub use cli::*;

mod settings;
pub use settings::*;

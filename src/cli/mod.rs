//! Command line interface for the `settle` binary

pub mod commands;
pub mod demo;
pub mod display;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Report a command error on stderr and exit non-zero
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}

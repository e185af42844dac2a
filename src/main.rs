//! # Swipe Input Engine - Main Entry Point
//!
//! This is the main entry point for the swipe input engine CLI application.
//! It installs the logger, parses command-line arguments and delegates to
//! the appropriate command handler.
//!
//! ## Usage
//!
//! Run the application with `--help` to see available commands:
//!
//! ```bash
//! cargo run -- --help
//! ```
//!
//! ## Error Handling
//!
//! The application uses `anyhow` for comprehensive error handling and
//! provides user-friendly error messages for common issues like missing
//! files or invalid input.

use anyhow::Result;
use clap::Parser;
use swipe_input_engine::cli::{Cli, run};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}

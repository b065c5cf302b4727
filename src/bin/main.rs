//! aesbench binary.
//!
//! This binary provides the entry point for the AES encryption
//! microbenchmark: a gRPC service exposing a single encryption operation and
//! a sequential load driver that exercises it.

use anyhow::Result;
use clap::Parser;

use aesbench_core::cli::commands::Commands;
use aesbench_core::cli::{handle_invoke, handle_server, Cli};
use aesbench_core::config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Server(cmd) => handle_server(cmd, settings),
        Commands::Invoke(cmd) => handle_invoke(cmd, settings),
    }
}

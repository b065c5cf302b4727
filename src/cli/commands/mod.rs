pub mod invoke;
pub mod server;

pub use invoke::InvokeCommand;
pub use server::ServerCommand;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the encryption service
    Server(ServerCommand),
    /// Run the benchmark driver against a running service
    Invoke(InvokeCommand),
}

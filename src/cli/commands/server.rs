use clap::Args;

#[derive(Args)]
pub struct ServerCommand {
    /// Run server in detached mode
    #[arg(short = 'd', long)]
    pub detach: bool,

    /// Listen address in host:port format
    #[arg(long, value_name = "HOST:PORT")]
    pub listen: Option<String>,

    /// Hex-encoded AES key (16, 24 or 32 bytes once decoded)
    #[arg(long, value_name = "HEX")]
    pub key: Option<String>,

    /// Plaintext substituted for empty or "world" payloads
    #[arg(long, value_name = "TEXT")]
    pub default_plaintext: Option<String>,

    /// Span collector endpoint, accepted for deployment parity
    #[arg(long, value_name = "URL")]
    pub tracing_endpoint: Option<String>,
}

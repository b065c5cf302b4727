use clap::Args;

#[derive(Args)]
pub struct InvokeCommand {
    /// Server host:port address (e.g. localhost:50052)
    #[arg(short = 't', long, value_name = "HOST:PORT")]
    pub target: Option<String>,

    /// Payload sent as the plaintext message
    #[arg(short = 'p', long, value_name = "TEXT")]
    pub payload: Option<String>,

    /// Number of loop invocations after the initial call
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<u32>,

    /// Deadline shared by every call in the run, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub deadline_secs: Option<u64>,
}

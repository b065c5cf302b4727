//! Benchmark driver that exercises the encryption service.
//!
//! The driver issues one initial call to validate connectivity and capture a
//! reference response, then a fixed number of further calls in a strictly
//! sequential loop. A single deadline, established when the runner connects,
//! bounds the whole run: every request carries the remaining time as its
//! per-request timeout. There are no retries and no concurrent fan-out; the
//! cost profile is plain round-trip latency accumulation.

use std::time::{Duration, Instant};

use tonic::transport::Channel;
use tonic::Request;
use tracing::info;

use crate::config::InvokeSettings;
use crate::error::{Error, Result};
use crate::proto::aes_client::AesClient;
use crate::proto::PlainTextMessage;

/// Progress is logged every this many loop iterations.
const PROGRESS_INTERVAL: u32 = 10;

/// Outcome of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    /// Loop invocations issued after the initial call
    pub loop_calls: u32,
    /// Loop invocations that returned an error
    pub failures: u32,
    /// Response text captured from the initial call
    pub reference_report: String,
}

/// Sequential benchmark runner bound to one connection and one deadline.
pub struct BenchRunner {
    client: AesClient<Channel>,
    payload: String,
    count: u32,
    deadline: Instant,
}

impl BenchRunner {
    /// Connects to the configured target and establishes the shared run
    /// deadline. Connection failure is fatal for the run.
    pub async fn connect(settings: &InvokeSettings) -> Result<Self> {
        let endpoint = endpoint_uri(&settings.target);
        let client = AesClient::connect(endpoint).await?;
        Ok(Self {
            client,
            payload: settings.payload.clone(),
            count: settings.count,
            deadline: Instant::now() + Duration::from_secs(settings.deadline_secs),
        })
    }

    /// Issues a single call carrying the remaining run time as its timeout.
    async fn invoke_once(&mut self) -> Result<String> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(Error::DeadlineExceeded);
        }
        let mut request = Request::new(PlainTextMessage {
            plaintext_message: self.payload.clone(),
        });
        request.set_timeout(remaining);
        let response = self.client.show_encryption(request).await?;
        Ok(response.into_inner().encryption_info)
    }

    /// Runs the benchmark: one reference call, then `count` sequential calls.
    ///
    /// An error on the reference call aborts the run. Errors in the loop are
    /// tallied rather than retried, and never interrupt the remaining
    /// iterations.
    pub async fn run(mut self) -> Result<BenchReport> {
        let reference_report = self.invoke_once().await?;
        info!("reference response: {}", reference_report);

        let mut failures = 0;
        for i in 0..self.count {
            if self.invoke_once().await.is_err() {
                failures += 1;
            }
            if i % PROGRESS_INTERVAL == 0 {
                info!("invoked {} times", i);
            }
        }

        info!(
            "finished calling function {} times: {}",
            self.count, reference_report
        );

        Ok(BenchReport {
            loop_calls: self.count,
            failures,
            reference_report,
        })
    }
}

/// Prepends the scheme tonic expects when the configured target has none.
fn endpoint_uri(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    }
}

//! Configuration management for the aesbench service and driver.
//!
//! This module provides configuration handling through multiple sources:
//! 1. Default configuration (embedded in binary)
//! 2. System-wide configuration file (`/etc/aesbench/config.toml`)
//! 3. User-specified configuration file
//! 4. Environment variables (prefixed with `AESBENCH_`)
//! 5. Command-line arguments
//!
//! Configuration options are loaded in order of precedence, with later sources
//! overriding earlier ones. The resulting settings structs are immutable for
//! the lifetime of the process; there is no global mutable state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Root configuration combining the service and driver sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Encryption service settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Benchmark driver settings
    #[serde(default)]
    pub invoke: InvokeSettings,
}

/// Encryption service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address:port the gRPC server listens on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Hex-encoded symmetric key (16/24/32 bytes once decoded)
    #[serde(default = "default_key_hex")]
    pub key_hex: String,

    /// Plaintext substituted when a request carries an empty or `"world"` payload
    #[serde(default = "default_plaintext")]
    pub default_plaintext: String,

    /// Span collector endpoint; accepted for deployment parity, not exported
    #[serde(default)]
    pub tracing_endpoint: Option<String>,

    /// Log filter directive for the server process
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Working directory for detached mode
    #[serde(default = "default_working_dir")]
    pub working_dir: String,

    /// PID file written in detached mode
    #[serde(default = "default_pid_file")]
    pub pid_file: String,
}

/// Benchmark driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeSettings {
    /// Server host:port to connect to
    #[serde(default = "default_target")]
    pub target: String,

    /// Payload sent as the plaintext message
    #[serde(default = "default_payload")]
    pub payload: String,

    /// Number of loop invocations issued after the initial call
    #[serde(default = "default_count")]
    pub count: u32,

    /// Single deadline shared by every call in a run, in seconds
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:50052".to_string()
}

fn default_key_hex() -> String {
    "6368616e676520746869732070617373".to_string()
}

fn default_plaintext() -> String {
    "defaultplaintext".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_working_dir() -> String {
    "/tmp".to_string()
}

fn default_pid_file() -> String {
    "/tmp/aesbench.pid".to_string()
}

fn default_target() -> String {
    "localhost:50052".to_string()
}

fn default_payload() -> String {
    "world".to_string()
}

fn default_count() -> u32 {
    10
}

fn default_deadline_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            key_hex: default_key_hex(),
            default_plaintext: default_plaintext(),
            tracing_endpoint: None,
            log_level: default_log_level(),
            working_dir: default_working_dir(),
            pid_file: default_pid_file(),
        }
    }
}

impl Default for InvokeSettings {
    fn default() -> Self {
        Self {
            target: default_target(),
            payload: default_payload(),
            count: default_count(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name("/etc/aesbench/config.toml").required(false));

        // Load user config if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path));
        }

        // Add environment variables
        builder = builder.add_source(config::Environment::with_prefix("AESBENCH"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

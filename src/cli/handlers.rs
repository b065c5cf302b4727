use anyhow::{Context, Result};
use daemonize::Daemonize;
use std::sync::Arc;
use tonic::transport::Server;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cipher;
use crate::cli::commands::{InvokeCommand, ServerCommand};
use crate::client::BenchRunner;
use crate::config::{InvokeSettings, ServerSettings, Settings};
use crate::service::AesService;

pub fn handle_server(cmd: ServerCommand, settings: Settings) -> Result<()> {
    let mut server = settings.server;
    if let Some(listen) = cmd.listen {
        server.listen_addr = listen;
    }
    if let Some(key) = cmd.key {
        server.key_hex = key;
    }
    if let Some(text) = cmd.default_plaintext {
        server.default_plaintext = text;
    }
    if let Some(endpoint) = cmd.tracing_endpoint {
        server.tracing_endpoint = Some(endpoint);
    }

    // Set up logging before anything else
    LogTracer::init().context("Failed to initialize log tracer")?;

    // The console goes away in detached mode, so logs land in a file under
    // the working directory instead.
    let _guard = if cmd.detach {
        let file_appender =
            RollingFileAppender::new(Rotation::NEVER, &server.working_dir, "aesbench.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::new(&server.log_level))
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .compact()
            .init();
        Some(guard)
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::new(&server.log_level))
            .with_target(true)
            .with_level(true)
            .compact()
            .init();
        None
    };

    // Fail fast on a malformed key instead of deferring to the first request.
    cipher::decode_key(&server.key_hex).context("Invalid encryption key")?;

    if cmd.detach {
        let daemonize = Daemonize::new()
            .pid_file(&server.pid_file)
            .chown_pid_file(true)
            .working_directory(&server.working_dir);

        tracing::info!("Starting server in detached mode");
        tracing::info!("PID file: {}", server.pid_file);
        tracing::info!("Working directory: {}", server.working_dir);
        // Fork before the async runtime exists; worker threads do not
        // survive a fork.
        daemonize.start().context("Failed to start daemon")?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(run_server(server))
}

async fn run_server(settings: ServerSettings) -> Result<()> {
    let addr = settings
        .listen_addr
        .parse()
        .context("Invalid listen address")?;

    if let Some(endpoint) = &settings.tracing_endpoint {
        tracing::info!("Span collector configured at {} (accepted, not exported)", endpoint);
    }
    tracing::info!("Starting AES benchmark server on {}", addr);

    let service = AesService::new(Arc::new(settings));

    Server::builder()
        .add_service(service.into_service())
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}

pub fn handle_invoke(cmd: InvokeCommand, settings: Settings) -> Result<()> {
    let mut invoke = settings.invoke;
    if let Some(target) = cmd.target {
        invoke.target = target;
    }
    if let Some(payload) = cmd.payload {
        invoke.payload = payload;
    }
    if let Some(count) = cmd.count {
        invoke.count = count;
    }
    if let Some(secs) = cmd.deadline_secs {
        invoke.deadline_secs = secs;
    }

    fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(run_invoke(invoke))
}

async fn run_invoke(settings: InvokeSettings) -> Result<()> {
    let runner = BenchRunner::connect(&settings)
        .await
        .with_context(|| format!("Failed to connect to {}", settings.target))?;

    let report = runner.run().await.context("Benchmark run failed")?;

    if report.failures > 0 {
        tracing::warn!(
            "{} of {} loop calls failed",
            report.failures,
            report.loop_calls
        );
    }

    Ok(())
}

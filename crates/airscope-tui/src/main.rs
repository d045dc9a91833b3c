//! `airscope` — Real-time terminal dashboard for nearby wireless devices.
//!
//! Polls a scanner daemon's snapshot endpoint and renders a continuously
//! refreshing table of visible Wi-Fi networks and BLE peripherals, with
//! per-device signal-history sparklines, text/type/signal filtering,
//! column sorting, and MAC-address privacy masking.
//!
//! Logs are written to a file (default `/tmp/airscope.log`) to avoid
//! corrupting the terminal UI. A background data bridge task streams
//! snapshot replacements from the poller into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod config;
mod data_bridge;
mod debounce;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use airscope_core::{Monitor, MonitorConfig};

use crate::app::App;

/// Terminal dashboard for live Wi-Fi and BLE device monitoring.
#[derive(Parser, Debug)]
#[command(name = "airscope", version, about)]
struct Cli {
    /// Scanner endpoint URL (e.g., http://127.0.0.1:5000)
    #[arg(short = 'e', long, env = "AIRSCOPE_URL")]
    endpoint: Option<String>,

    /// Delay between poll cycles, in milliseconds (measured from completion)
    #[arg(short = 'i', long)]
    interval_ms: Option<u64>,

    /// Start with MAC masking disabled
    #[arg(long)]
    no_mask: bool,

    /// Accept self-signed certificates on HTTPS endpoints
    #[arg(long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/airscope.log)
    #[arg(long, default_value = "/tmp/airscope.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "airscope={log_level},airscope_core={log_level},airscope_api={log_level}"
        ))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("airscope.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve effective settings: CLI flags > config file/env > defaults.
fn build_monitor(cli: &Cli, file: &config::FileConfig) -> Result<(Monitor, bool)> {
    let defaults = MonitorConfig::default();

    let endpoint = cli
        .endpoint
        .as_deref()
        .or(file.endpoint.as_deref())
        .map_or_else(
            || Ok(defaults.endpoint.clone()),
            |raw| raw.parse().map_err(|e| eyre!("invalid endpoint URL: {e}")),
        )?;

    let poll_interval = cli
        .interval_ms
        .or(file.poll_interval_ms)
        .map_or(defaults.poll_interval, Duration::from_millis);

    let masking = if cli.no_mask {
        false
    } else {
        file.masking.unwrap_or(true)
    };

    let config = MonitorConfig {
        endpoint,
        poll_interval,
        accept_invalid_certs: cli.insecure || file.accept_invalid_certs.unwrap_or(false),
        ..defaults
    };

    Ok((Monitor::new(config), masking))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let file_config = config::load();
    let (monitor, masking) = build_monitor(&cli, &file_config)?;

    info!(
        endpoint = %monitor.config().endpoint,
        interval_ms = %monitor.config().poll_interval.as_millis(),
        masking,
        "starting airscope"
    );

    let mut app = App::new(monitor, masking);
    app.run().await?;

    Ok(())
}

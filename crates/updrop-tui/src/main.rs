mod action;
mod app;
mod app_state;
mod component;
mod components;
mod controller;
mod drop;
mod headless;
mod surface;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use updrop_proto::config::Config;
use updrop_proto::upload::HttpUploader;

#[derive(Parser, Debug)]
#[command(name = "updrop", about = "Upload a file to an HTTP endpoint", version)]
struct Cli {
    /// File to select on startup.
    file: Option<PathBuf>,

    /// Upload endpoint URL (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upload FILE once without the terminal UI and exit.
    #[arg(long, value_name = "FILE")]
    headless: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());

    if cli.headless.is_some() {
        // Nothing owns the terminal, so logs go to stderr and results to stdout.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
            )
            .init();
    } else {
        let log_path = updrop_proto::platform::log_path();
        if let Some(dir) = log_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(log_filter.as_str())
            .with_ansi(false)
            .init();

        // Print log path to stderr so the operator can tail it immediately.
        eprintln!("updrop log: {}", log_path.display());
    }

    tracing::info!("updrop starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {:#}", e);
        Config::default()
    });
    if let Some(url) = cli.endpoint {
        config.endpoint.url = url;
    }

    let uploader = HttpUploader::from_config(&config.endpoint)?;

    // ── Headless: one upload, exit status reflects the outcome ───────────────
    if let Some(path) = cli.headless {
        let (accepted, _) =
            headless::upload_once(uploader, &path, std::io::stdout().lock()).await;
        return Ok(if accepted {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let mut app = app::App::new(uploader, &config);
    if let Some(path) = &cli.file {
        app.preselect(path);
    }
    app.run().await?;

    Ok(ExitCode::SUCCESS)
}

//! portsweep binary: parse arguments, run the scan engine, print the report.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use portsweep::cli::{self, Args};
use portsweep::config::AppSettings;
use portsweep::output;
use portsweep::scanner::ScanCoordinator;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse_args();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let options = args.resolve(&settings).unwrap_or_else(|e| e.exit());
    init_tracing(options.log_filter());
    let request = &options.request;

    // Ctrl-C stops workers at their next dequeue; the partial report still prints.
    let cancel = CancellationToken::new();
    let ctrlc = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping workers");
            ctrlc.cancel();
        }
    });

    let mut coordinator = ScanCoordinator::tcp()
        .with_timeout(options.timeout)
        .with_retry_policy(options.retry)
        .with_cancellation(cancel);

    let progress = request.verbose().then(|| progress_bar(request.range().len() as u64));
    if let Some(pb) = &progress {
        coordinator = coordinator.with_progress(pb.clone());
    }

    let result = coordinator.run(request).await;

    if let Some(pb) = progress {
        pb.finish_with_message("Scan complete");
    }

    if request.verbose() {
        println!();
    }

    output::print_results(request, &result, options.format).context("failed to write results")?;
    info!(open = result.records().len(), "report written");
    Ok(())
}

/// An explicit `--config` must load; the default location falls back to
/// built-in defaults with a warning.
fn load_settings(args: &Args) -> Result<AppSettings> {
    match &args.config {
        Some(path) => AppSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(AppSettings::load().unwrap_or_else(|e| {
            output::print_warning(&format!("{}; using default settings", e));
            AppSettings::default()
        })),
    }
}

fn progress_bar(total: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    )
    .map(|style| style.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    let pb = ProgressBar::new(total);
    pb.set_style(style);
    pb
}

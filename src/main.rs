// src/main.rs

use anyhow::Result;
use clap::Parser;
use groupmirror::cli::Cli;
use groupmirror::config::ConfigBuilder;
use groupmirror::errors::Error;
use groupmirror::output::{write_dry_run, write_summary};
#[cfg(feature = "progress")]
use groupmirror::progress::IndicatifProgress;
use groupmirror::progress::ProgressReporter;
use groupmirror::signal::setup_signal_handler;
use groupmirror::{execute, CloneActivity};
use std::io::Write;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "groupmirror=debug".parse()?
                } else {
                    "groupmirror=info".parse()?
                },
            ),
        )
        .init();

    log::info!("Starting groupmirror v{}...", env!("CARGO_PKG_VERSION"));

    // Panic messages must not leak build paths.
    std::panic::set_hook(Box::new(|info| {
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => s.as_str(),
                None => "Box<Any>",
            },
        };
        eprintln!(
            "Application Error: {}",
            msg.replace(env!("CARGO_MANIFEST_DIR"), "<redacted>")
                .replace(std::path::MAIN_SEPARATOR, "/")
        );
    }));

    // --- Setup ---
    let cli = Cli::parse();

    // Show a progress bar only if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = match ConfigBuilder::from_cli(cli).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Configuration built successfully.");

    let token = setup_signal_handler()?;

    let report = match execute(&config, &token, progress_reporter) {
        Ok(report) => report,
        // --- Error Handling ---
        Err(e) => match e {
            Error::Interrupted => {
                eprintln!("\nOperation cancelled.");
                std::process::exit(130);
            }
            Error::NoGroups | Error::GroupNotFound { .. } => {
                eprintln!("groupmirror: {}", e);
                return Ok(());
            }
            _ => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    // --- Report ---
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    if let CloneActivity::Planned(requests) = &report.clones {
        write_dry_run(&mut writer, requests)?;
    }
    write_summary(&mut writer, &report)?;
    writer.flush()?;

    if report.has_failures() {
        log::warn!(
            "Finished with {} failed clone(s) and {} failed listing(s)",
            report.failed_clones().len(),
            report.tree.failures.len()
        );
    } else {
        log::info!("Finished successfully.");
    }
    Ok(())
}

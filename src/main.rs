//! gazekit - dwell-time gaze interaction
//!
//! Headless demo runner: sweeps a camera along a scripted look path and
//! reports what the gaze controller did.

mod config;
mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use config::DemoConfig;
use demo::RunOptions;
use gazekit_testkit::{EventRecord, JsonlSink, MetricsReport, MetricsSink, TestResult};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a headless gaze dwell demo", long_about = None)]
struct Args {
    /// Scene config (TOML). Falls back to config/scene.toml, then the built-in scene.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed ticks to simulate
    #[arg(long, default_value_t = 480)]
    ticks: u64,

    /// Ticks per simulated second
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f32,

    /// Write every gaze event as JSON lines
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Write a JSON metrics report
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Seed for target repaint colours
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Save the effective scene config as TOML and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting gazekit v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => DemoConfig::load_from_path(path),
        None => DemoConfig::load(),
    };

    if let Some(path) = args.write_config.as_deref() {
        config
            .save_to_path(path)
            .with_context(|| format!("failed to write scene config {}", path.display()))?;
        info!(path = %path.display(), "Wrote scene config");
        return Ok(());
    }

    let options = RunOptions {
        ticks: args.ticks,
        tick_rate: args.tick_rate,
        seed: args.seed,
    };
    let report = demo::run(&config, options)?;

    if let Some(path) = args.event_log.as_deref() {
        let mut sink = JsonlSink::create(path)?;
        for (tick, event) in &report.events {
            sink.write(&EventRecord {
                tick: *tick,
                kind: "gaze",
                payload: event,
            })?;
        }
        let end = gazekit_core::SimTick(report.metrics.ticks);
        for paint in &report.colors {
            sink.write(&EventRecord {
                tick: end,
                kind: "color",
                payload: paint,
            })?;
        }
        sink.flush()?;
        info!(path = %path.display(), events = report.events.len(), "Wrote event log");
    }

    if let Some(path) = args.metrics.as_deref() {
        let result = if report.metrics.activations > 0 {
            TestResult::Pass
        } else {
            TestResult::Fail
        };
        let metrics = MetricsReport::new("gaze_demo", result, report.metrics.clone());
        MetricsSink::create(path)?.write(&metrics)?;
        info!(path = %path.display(), "Wrote metrics report");
    }

    for line in report.overlay.lines() {
        info!("{line}");
    }

    Ok(())
}

//! Metrics report for gaze runs, exported as JSON for CI artifacts.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Top-level report written at the end of a gaze run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Run identifier
    pub test_name: String,

    /// Timestamp when metrics were collected (ISO 8601)
    pub timestamp: String,

    /// Overall result
    pub result: TestResult,

    /// Dwell/activation counters
    pub gaze: DwellMetrics,
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Run passed all validations
    Pass,
    /// Run failed
    Fail,
}

/// Counters accumulated over a gaze run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DwellMetrics {
    /// Ticks simulated
    pub ticks: u64,
    /// Simulated seconds
    pub simulated_seconds: f64,
    /// Times the dwell timer started
    pub dwell_starts: u32,
    /// Dwells cancelled before completion
    pub dwell_interruptions: u32,
    /// Activation dispatches (rapid re-fires included)
    pub activations: u32,
    /// Deactivation dispatches
    pub deactivations: u32,
    /// Distinct objects the ray landed on
    pub targets_seen: u32,
}

impl DwellMetrics {
    /// Share of started dwells that ran to completion, if any were started.
    pub fn completion_rate(&self) -> Option<f64> {
        if self.dwell_starts == 0 {
            return None;
        }
        let completed = self.dwell_starts.saturating_sub(self.dwell_interruptions);
        Some(f64::from(completed) / f64::from(self.dwell_starts))
    }
}

impl MetricsReport {
    /// Stamp a report with the current time.
    pub fn new(test_name: impl Into<String>, result: TestResult, gaze: DwellMetrics) -> Self {
        Self {
            test_name: test_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            result,
            gaze,
        }
    }
}

/// Sink for writing metrics reports to JSON files
pub struct MetricsSink {
    path: PathBuf,
}

impl MetricsSink {
    /// Create a new metrics sink at the specified path
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Write metrics report to file
    pub fn write(&self, report: &MetricsReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

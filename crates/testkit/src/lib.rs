#![warn(missing_docs)]
//! Test surfaces for gaze runs: event streams, metrics reports, probe
//! activatables, scripted ray queries and tick snapshots.

mod fixtures;
mod metrics;
mod tick_snapshot;

use anyhow::{Context, Result};
use gazekit_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use fixtures::*;
pub use metrics::*;
pub use tick_snapshot::*;

/// One line of a gaze event stream.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, T> {
    /// Tick when the event occurred.
    pub tick: SimTick,
    /// Short label of the stream the event belongs to.
    pub kind: &'a str,
    /// Event body.
    pub payload: T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    out: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, event: &EventRecord<'_, T>) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Unique path under the system temp dir for test artifacts.
pub fn temp_artifact_path(prefix: &str, extension: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!(
        "{prefix}-{}-{nanos}.{extension}",
        std::process::id()
    ))
}

//! Golden-file snapshots of small tick-by-tick runs.
//!
//! A run captures one frame before the first step and one after every step,
//! serializes them as pretty JSON with sorted keys, and compares the result
//! against a file on disk. Set `GAZEKIT_UPDATE_SNAPSHOTS=1` to rewrite goldens.

use anyhow::{bail, Context, Result};
use gazekit_core::SimTick;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "GAZEKIT_UPDATE_SNAPSHOTS";

/// Parameters for [`run_tick_snapshot`].
#[derive(Debug, Clone)]
pub struct TickSnapshotConfig {
    /// Name written into the report.
    pub name: String,
    /// Number of steps to run.
    pub ticks: u64,
    /// Golden file location.
    pub snapshot_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct Frame<S> {
    tick: u64,
    snapshot: S,
}

#[derive(Debug, Serialize)]
struct Report<S> {
    name: String,
    frames: Vec<Frame<S>>,
}

/// Step `state` `config.ticks` times and check the captured frames against the golden file.
pub fn run_tick_snapshot<State, Snap, Step, Capture>(
    config: TickSnapshotConfig,
    mut state: State,
    mut step: Step,
    mut capture: Capture,
) -> Result<()>
where
    Snap: Serialize,
    Step: FnMut(SimTick, &mut State),
    Capture: FnMut(SimTick, &State) -> Snap,
{
    let mut tick = SimTick::ZERO;
    let mut frames = vec![Frame {
        tick: tick.0,
        snapshot: capture(tick, &state),
    }];
    for _ in 0..config.ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(Frame {
            tick: tick.0,
            snapshot: capture(tick, &state),
        });
    }

    assert_json_snapshot(
        &config.snapshot_path,
        &Report {
            name: config.name,
            frames,
        },
    )
}

/// Compare `value` against the JSON golden at `path` (or rewrite it when updating).
pub fn assert_json_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let actual = canonical_json(value)?;

    if updating_snapshots() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, &actual)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "snapshot missing at {} (rerun with {UPDATE_SNAPSHOTS_ENV}=1)",
            path.display()
        )
    })?;

    // Goldens checked out on Windows may carry CRLF line endings.
    if expected.replace("\r\n", "\n") != actual {
        bail!(
            "snapshot mismatch at {} (rerun with {UPDATE_SNAPSHOTS_ENV}=1 to accept)\n--- actual ---\n{actual}",
            path.display()
        );
    }
    Ok(())
}

fn updating_snapshots() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value).context("failed to serialize snapshot")?);
    let mut out = serde_json::to_string_pretty(&value).context("failed to format snapshot")?;
    out.push('\n');
    Ok(out)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

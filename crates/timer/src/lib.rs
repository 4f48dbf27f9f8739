#![warn(missing_docs)]
//! Dwell countdown driven by an opaque progress animation.
//!
//! The cursor animation is whatever the host renders while the user stares
//! at something. This crate only needs four controls from it (length, speed,
//! restart, normalized progress) and turns them into a dwell timer whose
//! playback speed makes one full run last the configured duration.

mod animation;
mod dwell;

pub use animation::{Animation, ClipPlayer};
pub use dwell::{DwellTimer, TimerStop, COMPLETION_THRESHOLD};

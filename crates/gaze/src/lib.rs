#![warn(missing_docs)]
//! Dwell-time gaze interaction.
//!
//! A [`GazeController`] is ticked once per frame with the viewpoint's forward
//! ray. It resolves the nearest hit through a [`RaycastQuery`], runs the
//! target's activation conditions, drives a [`DwellTimer`] while the user keeps
//! looking, and dispatches `activate` / `deactivate` to every
//! [`Activatable`](gazekit_core::Activatable) attached to the target.
//!
//! # Example
//!
//! ```rust
//! use gazekit_core::{shared, Activatable};
//! use gazekit_gaze::{GazeController, GazeSettings, TickOutcome};
//! use gazekit_physics::{Aabb, Ray, Scene};
//! use gazekit_timer::ClipPlayer;
//! use glam::Vec3;
//!
//! struct Door;
//!
//! impl Activatable for Door {
//!     fn check_conditions(&mut self) -> bool { true }
//!     fn activate(&mut self) {}
//!     fn deactivate(&mut self) {}
//! }
//!
//! let mut scene = Scene::new();
//! scene.add_with(
//!     "door",
//!     Aabb::from_center_size(Vec3::new(0.0, 0.0, -4.0), Vec3::ONE),
//!     vec![shared(Door)],
//! );
//!
//! let settings = GazeSettings { gaze_timer_enabled: false, ..Default::default() };
//! let mut gaze = GazeController::new(settings, ClipPlayer::new(1.0)).unwrap();
//! let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
//! assert_eq!(gaze.tick(&ray, &scene, 1.0 / 60.0), TickOutcome::Activated { dispatched: 1 });
//! ```
//!
//! [`RaycastQuery`]: gazekit_physics::RaycastQuery
//! [`DwellTimer`]: gazekit_timer::DwellTimer

mod controller;
mod observer;
mod settings;

pub use controller::{GazeController, TickOutcome};
pub use observer::{EventLog, GazeDebugText, GazeEvent, GazeObserver};
pub use settings::GazeSettings;

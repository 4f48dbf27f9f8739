//! Headless gaze run over a configured scene and look path.

use crate::config::DemoConfig;
use anyhow::{bail, Result};
use gazekit_camera::Camera;
use gazekit_core::{scoped_rng, Activatable, SimTick, TargetId};
use gazekit_gaze::{EventLog, GazeController, GazeDebugText, GazeEvent, GazeSettings};
use gazekit_physics::{Aabb, Scene};
use gazekit_testkit::DwellMetrics;
use gazekit_timer::ClipPlayer;
use glam::Vec3;
use rand::{rngs::StdRng, Rng};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::{debug, info};

/// Target that always accepts gaze and repaints itself on activation.
pub struct ColorTarget {
    name: String,
    conditions: bool,
    color: [f32; 3],
    rng: StdRng,
    repaints: u32,
}

impl ColorTarget {
    pub fn new(name: impl Into<String>, conditions: bool, rng: StdRng) -> Self {
        Self {
            name: name.into(),
            conditions,
            color: [1.0, 1.0, 1.0],
            rng,
            repaints: 0,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn repaints(&self) -> u32 {
        self.repaints
    }
}

impl Activatable for ColorTarget {
    fn check_conditions(&mut self) -> bool {
        self.conditions
    }

    fn activate(&mut self) {
        self.color = [self.rng.gen(), self.rng.gen(), self.rng.gen()];
        self.repaints += 1;
        debug!(target_name = %self.name, color = ?self.color, "Repainted");
    }

    fn deactivate(&mut self) {}
}

/// Knobs that come from the command line rather than the scene file.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub ticks: u64,
    pub tick_rate: f32,
    pub seed: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 480,
            tick_rate: 60.0,
            seed: 0,
        }
    }
}

/// Final paint state of one interactive target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub target: String,
    pub rgb: [f32; 3],
    pub repaints: u32,
}

/// Everything a finished run produced.
pub struct DemoReport {
    pub events: Vec<(SimTick, GazeEvent)>,
    pub metrics: DwellMetrics,
    pub colors: Vec<Paint>,
    pub overlay: String,
}

struct DemoScene {
    scene: Scene,
    painted: Vec<(String, Rc<RefCell<ColorTarget>>)>,
}

fn build_scene(config: &DemoConfig, seed: u64) -> Result<DemoScene> {
    let mut scene = Scene::new();
    let mut painted = Vec::new();
    for target in &config.targets {
        if scene.find_by_name(&target.name).is_some() {
            bail!("duplicate target name '{}'", target.name);
        }
        let bounds = Aabb::from_center_size(Vec3::from(target.center), Vec3::from(target.size));
        let id = scene.add(target.name.clone(), bounds);
        if target.interactive {
            let paint = Rc::new(RefCell::new(ColorTarget::new(
                target.name.clone(),
                target.conditions,
                scoped_rng(seed, id, SimTick::ZERO),
            )));
            scene.attach(id, paint.clone());
            painted.push((target.name.clone(), paint));
        }
    }

    for waypoint in &config.look_path {
        if !waypoint.is_nothing() && config.target(&waypoint.target).is_none() {
            bail!(
                "look path waypoint at tick {} names unknown target '{}'",
                waypoint.tick,
                waypoint.target
            );
        }
    }

    Ok(DemoScene { scene, painted })
}

/// Point the camera according to the waypoint active at `tick`.
fn aim(camera: &mut Camera, config: &DemoConfig, tick: u64) {
    let Some(waypoint) = config.waypoint_at(tick) else {
        return;
    };
    match config.target(&waypoint.target) {
        Some(target) => camera.look_at(Vec3::from(target.center)),
        // Straight up, clear of every collider in a ground-level scene.
        None => camera.look_at(camera.position + Vec3::Y),
    }
}

fn tally(metrics: &mut DwellMetrics, seen: &mut BTreeSet<TargetId>, event: &GazeEvent) {
    match event {
        GazeEvent::TargetChanged {
            target: Some(id), ..
        } => {
            seen.insert(*id);
        }
        GazeEvent::DwellStarted { .. } => metrics.dwell_starts += 1,
        GazeEvent::DwellInterrupted { .. } => metrics.dwell_interruptions += 1,
        GazeEvent::Activated { .. } => metrics.activations += 1,
        GazeEvent::Deactivated { .. } => metrics.deactivations += 1,
        _ => {}
    }
}

/// Run the scene for `options.ticks` fixed steps.
pub fn run(config: &DemoConfig, options: RunOptions) -> Result<DemoReport> {
    if !options.tick_rate.is_finite() || options.tick_rate <= 0.0 {
        bail!("tick rate must be positive (got {})", options.tick_rate);
    }
    let dt = 1.0 / options.tick_rate;

    let DemoScene { scene, painted } = build_scene(config, options.seed)?;
    let settings: GazeSettings = config.gaze.clone();
    let mut gaze = GazeController::new(settings, ClipPlayer::new(config.cursor_clip_length))?;
    let log = Rc::new(RefCell::new(EventLog::new()));
    let overlay = Rc::new(RefCell::new(GazeDebugText::new()));
    gaze.add_observer(log.clone());
    gaze.add_observer(overlay.clone());

    info!(
        targets = scene.len(),
        ticks = options.ticks,
        tick_rate = options.tick_rate,
        seed = options.seed,
        "Starting gaze demo"
    );

    let mut camera = Camera::new(Vec3::from(config.camera_position));
    let mut metrics = DwellMetrics::default();
    let mut seen = BTreeSet::new();
    let mut events = Vec::new();
    let mut tick = SimTick::ZERO;

    for _ in 0..options.ticks {
        aim(&mut camera, config, tick.0);
        gaze.tick(&camera.gaze_ray(), &scene, dt);
        for event in log.borrow_mut().drain() {
            tally(&mut metrics, &mut seen, &event);
            events.push((tick, event));
        }
        tick = tick.advance(1);
    }

    metrics.ticks = options.ticks;
    metrics.simulated_seconds = options.ticks as f64 / f64::from(options.tick_rate);
    metrics.targets_seen = seen.len() as u32;

    let colors = painted
        .iter()
        .map(|(name, paint)| {
            let paint = paint.borrow();
            Paint {
                target: name.clone(),
                rgb: paint.color(),
                repaints: paint.repaints(),
            }
        })
        .collect();
    let overlay = overlay.borrow().text();

    info!(
        activations = metrics.activations,
        deactivations = metrics.deactivations,
        dwell_starts = metrics.dwell_starts,
        "Gaze demo finished"
    );

    Ok(DemoReport {
        events,
        metrics,
        colors,
        overlay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TargetConfig, Waypoint};
    use rand::SeedableRng;

    fn single_cube(settings: GazeSettings) -> DemoConfig {
        DemoConfig {
            gaze: settings,
            targets: vec![TargetConfig {
                name: "cube".to_string(),
                center: [5.0, 0.0, 0.0],
                ..TargetConfig::default()
            }],
            look_path: vec![Waypoint {
                tick: 0,
                target: "cube".to_string(),
            }],
            ..DemoConfig::default()
        }
    }

    fn activation_ticks(report: &DemoReport) -> Vec<u64> {
        report
            .events
            .iter()
            .filter(|(_, e)| matches!(e, GazeEvent::Activated { .. }))
            .map(|(t, _)| t.0)
            .collect()
    }

    #[test]
    fn color_target_repaints_on_activate() {
        let mut cube = ColorTarget::new("cube", true, StdRng::seed_from_u64(1));
        assert!(cube.check_conditions());
        let before = cube.color();
        cube.activate();
        assert_eq!(cube.repaints(), 1);
        assert_ne!(cube.color(), before);
        cube.deactivate();
        assert_eq!(cube.repaints(), 1);
    }

    #[test]
    fn two_second_dwell_activates_once() {
        let config = single_cube(GazeSettings::default());
        let report = run(
            &config,
            RunOptions {
                ticks: 120,
                ..RunOptions::default()
            },
        )
        .unwrap();

        let fired = activation_ticks(&report);
        assert_eq!(fired.len(), 1, "events: {:?}", report.events);
        assert!((110..120).contains(&fired[0]), "fired at {}", fired[0]);
        assert_eq!(report.metrics.dwell_starts, 1);
        assert_eq!(report.metrics.targets_seen, 1);
        assert_eq!(report.colors.len(), 1);
        assert_eq!(report.colors[0].repaints, 1);
        assert_ne!(report.colors[0].rgb, [1.0, 1.0, 1.0]);
        assert_eq!(
            report.overlay,
            "Looking At: cube\nIs Gazeable: Yes\nGaze Conditions: true"
        );
    }

    #[test]
    fn rapid_instant_mode_fires_every_tick() {
        let config = single_cube(GazeSettings {
            gaze_timer_enabled: false,
            rapid_activation: true,
            ..GazeSettings::default()
        });
        let report = run(
            &config,
            RunOptions {
                ticks: 10,
                ..RunOptions::default()
            },
        )
        .unwrap();
        assert_eq!(activation_ticks(&report), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn builtin_scene_runs_full_path() {
        let report = run(&DemoConfig::default(), RunOptions::default()).unwrap();
        let m = &report.metrics;
        assert_eq!(m.ticks, 480);
        assert!((m.simulated_seconds - 8.0).abs() < 1e-9);
        // cube, wall and locked_cube
        assert_eq!(m.targets_seen, 3);
        // Once on the first visit, once after coming back.
        assert_eq!(m.activations, 2);
        // Looking at the sky releases the first activation.
        assert_eq!(m.deactivations, 1);
        assert!(report.overlay.starts_with("Looking At: cube"));
    }

    #[test]
    fn same_seed_paints_same_colors() {
        let config = single_cube(GazeSettings {
            gaze_timer_enabled: false,
            ..GazeSettings::default()
        });
        let options = RunOptions {
            ticks: 3,
            seed: 9,
            ..RunOptions::default()
        };
        let a = run(&config, options).unwrap();
        let b = run(&config, options).unwrap();
        assert_eq!(a.colors, b.colors);
    }

    #[test]
    fn unknown_waypoint_target_is_rejected() {
        let mut config = DemoConfig::default();
        config.look_path.push(Waypoint {
            tick: 10,
            target: "ghost".to_string(),
        });
        let err = run(&config, RunOptions::default()).err().unwrap();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn invalid_dwell_duration_is_reported() {
        let mut config = DemoConfig::default();
        config.gaze.dwell_duration_seconds = 0.0;
        assert!(run(&config, RunOptions::default()).is_err());
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let options = RunOptions {
            tick_rate: 0.0,
            ..RunOptions::default()
        };
        assert!(run(&DemoConfig::default(), options).is_err());
    }
}

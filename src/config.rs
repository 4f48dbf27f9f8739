use anyhow::Result;
use gazekit_gaze::GazeSettings;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_SCENE_PATH: &str = "config/scene.toml";

/// Scene and gaze configuration for a demo run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub gaze: GazeSettings,
    /// Native length in seconds of the cursor fill clip.
    pub cursor_clip_length: f32,
    /// Viewer position.
    pub camera_position: [f32; 3],
    pub targets: Vec<TargetConfig>,
    /// Where the camera looks, sorted by tick when loaded.
    pub look_path: Vec<Waypoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub name: String,
    pub center: [f32; 3],
    pub size: [f32; 3],
    /// Whether the target carries a colour-changing activatable.
    pub interactive: bool,
    /// Initial answer of the target's condition check.
    pub conditions: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: "target".to_string(),
            center: [4.0, 0.0, 0.0],
            size: [1.0, 1.0, 1.0],
            interactive: true,
            conditions: true,
        }
    }
}

/// From `tick` on, the camera faces `target` (a target name, or `nothing`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Waypoint {
    pub tick: u64,
    pub target: String,
}

impl Waypoint {
    pub const NOTHING: &'static str = "nothing";

    fn new(tick: u64, target: &str) -> Self {
        Self {
            tick,
            target: target.to_string(),
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.target == Self::NOTHING
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            gaze: GazeSettings::default(),
            cursor_clip_length: 1.0,
            camera_position: [0.0, 0.0, 0.0],
            targets: vec![
                TargetConfig {
                    name: "cube".to_string(),
                    center: [5.0, 0.0, 0.0],
                    ..TargetConfig::default()
                },
                TargetConfig {
                    name: "wall".to_string(),
                    center: [0.0, 0.0, 6.0],
                    size: [4.0, 4.0, 0.5],
                    interactive: false,
                    ..TargetConfig::default()
                },
                TargetConfig {
                    name: "locked_cube".to_string(),
                    center: [-5.0, 0.0, 0.0],
                    conditions: false,
                    ..TargetConfig::default()
                },
            ],
            look_path: vec![
                Waypoint::new(0, "cube"),
                Waypoint::new(150, Waypoint::NOTHING),
                Waypoint::new(180, "wall"),
                Waypoint::new(210, "locked_cube"),
                Waypoint::new(300, "cube"),
            ],
        }
    }
}

impl DemoConfig {
    /// Load the scene from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_SCENE_PATH))
    }

    /// Load configuration from an explicit path, falling back to the built-in scene on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<DemoConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using built-in scene", path.display());
                    DemoConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!(
                        "Scene config not found at {}. Using built-in scene",
                        path.display()
                    );
                } else {
                    warn!("Failed to read {}: {err}. Using built-in scene", path.display());
                }
                DemoConfig::default()
            }
        };
        config.look_path.sort_by_key(|w| w.tick);
        config
    }

    /// Save the scene to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Waypoint in effect at `tick`, if the path has started.
    pub fn waypoint_at(&self, tick: u64) -> Option<&Waypoint> {
        self.look_path.iter().rev().find(|w| w.tick <= tick)
    }

    pub fn target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.name == name)
    }
}

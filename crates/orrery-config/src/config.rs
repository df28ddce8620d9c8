//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera projection and start placement.
    pub camera: CameraConfig,
    /// Mouse pan/zoom speeds.
    pub controls: ControlsConfig,
    /// Texture sources and load policy.
    pub textures: TextureConfig,
    /// The solar system description.
    pub system: SystemConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Camera projection parameters and start placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip plane distance.
    pub z_near: f32,
    /// Far clip plane distance.
    pub z_far: f32,
    /// Initial camera translation applied to the scene.
    pub start_position: [f32; 3],
}

/// Mouse control speeds. Both are per-event deltas, never scaled by frame time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Scene units moved per pixel of drag.
    pub move_speed: f32,
    /// Scene units moved along Z per scroll notch.
    pub zoom_speed: f32,
}

/// Texture sources keyed by the names the system description references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Texture key -> image file path.
    pub sources: HashMap<String, PathBuf>,
    /// Deadline for the whole startup texture load, in seconds.
    pub load_timeout_secs: u64,
}

/// The solar system: scaling, tessellation, and the body tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// Scalar converting body units (km) to scene units.
    pub global_scale: f32,
    /// Latitude bands for generated spheres.
    pub lat_bands: u32,
    /// Longitude bands for generated spheres.
    pub long_bands: u32,
    /// Top-level bodies, drawn in order.
    pub planets: Vec<BodyConfig>,
}

/// One celestial body and its satellites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    /// Display name.
    pub name: String,
    /// Body radius in source units (km).
    pub radius: f32,
    /// Orbit radius around the parent origin in source units (km).
    pub distance: f32,
    /// Revolution around the parent, degrees per second.
    pub orbital_speed: f32,
    /// Self-rotation, degrees per second.
    pub rotation_speed: f32,
    /// Texture key, resolved against [`TextureConfig::sources`].
    pub texture: String,
    /// Child bodies orbiting this one.
    pub moons: Vec<BodyConfig>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Show frame stats in the window title.
    pub show_fps: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 45.0,
            z_near: 10.0,
            z_far: 10000.0,
            start_position: [0.0, 0.0, -50.0],
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            zoom_speed: 5.0,
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        let mut sources = HashMap::new();
        sources.insert("earth".to_string(), PathBuf::from("textures/earth.jpg"));
        sources.insert("moon".to_string(), PathBuf::from("textures/moon.png"));
        Self {
            sources,
            load_timeout_secs: 30,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            global_scale: 0.001,
            lat_bands: 30,
            long_bands: 30,
            planets: vec![BodyConfig {
                name: "Earth".to_string(),
                radius: 12756.0,
                distance: 0.0,
                orbital_speed: 0.0,
                rotation_speed: 25.0,
                texture: "earth".to_string(),
                moons: vec![BodyConfig {
                    name: "Moon".to_string(),
                    radius: 3476.0,
                    distance: 20000.0,
                    orbital_speed: 10.0,
                    rotation_speed: 5.0,
                    texture: "moon".to_string(),
                    moons: Vec::new(),
                }],
            }],
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            radius: 1.0,
            distance: 0.0,
            orbital_speed: 0.0,
            rotation_speed: 0.0,
            texture: String::new(),
            moons: Vec::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "orrery.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `orrery.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Default config directory: the platform config dir, else the working dir.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("orrery"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

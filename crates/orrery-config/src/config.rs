//! Configuration sections, defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of each square body texture.
    pub texture_resolution: u32,
    /// Longitude divisions of the shared sphere mesh.
    pub sphere_sectors: u32,
    /// Latitude divisions of the shared sphere mesh.
    pub sphere_stacks: u32,
    /// Linear RGB background.
    pub clear_color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees per pixel of mouse drag.
    pub mouse_sensitivity: f32,
    /// World units per second.
    pub move_speed: f32,
    pub boost_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Multiplier on all angular rates. 0.5 runs the system at half speed.
    pub time_scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter when `RUST_LOG` is unset (e.g. "debug", "info,wgpu=warn").
    /// Empty selects the logger's built-in filter.
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            title: "Solar System Simulation".to_string(),
            vsync: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            texture_resolution: 512,
            sphere_sectors: 30,
            sphere_stacks: 30,
            clear_color: [0.0, 0.0, 0.1],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            move_speed: 10.0,
            boost_factor: 5.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { time_scale: 0.5 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: String::new(),
        }
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing defaults if it does not exist.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(config_dir)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)
    }

    fn read(config_dir: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE_NAME))
            .map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_viewer() {
        let config = Config::default();
        assert_eq!((config.window.width, config.window.height), (1200, 800));
        assert_eq!(config.window.title, "Solar System Simulation");
        assert_eq!(config.render.texture_resolution, 512);
        assert_eq!(config.render.sphere_sectors, 30);
        assert_eq!(config.camera.mouse_sensitivity, 0.1);
        assert_eq!(config.camera.boost_factor, 5.0);
        assert_eq!(config.simulation.time_scale, 0.5);
        assert!(config.debug.log_level.is_empty());
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("width: 1200"));
        assert!(ron_str.contains("texture_resolution: 512"));
        assert!(ron_str.contains("time_scale: 0.5"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.render.clear_color = [0.1, 0.2, 0.3];
        let ron_str = ron::to_string(&config).unwrap();
        let back: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = ron::from_str("(camera: (move_speed: 25.0))").unwrap();
        assert_eq!(config.camera.move_speed, 25.0);
        assert_eq!(config.camera.mouse_sensitivity, 0.1);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let result: Result<Config, _> = ron::from_str("(retired_option: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not ron").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("orrery");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.simulation.time_scale = 2.0;
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load_or_create(dir.path()).unwrap(), config);
    }
}

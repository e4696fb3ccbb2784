//! Scene configuration files.
//!
//! A [`SceneConfig`] picks a [`Preset`] and optionally overrides its grid
//! and camera defaults. It round-trips through JSON:
//!
//! ```json
//! {
//!   "preset": "einstein-rosen",
//!   "grid_size": 150,
//!   "speed": 0.5,
//!   "line_color": [0.6, 0.8, 1.0]
//! }
//! ```
//!
//! Every field except `preset` may be omitted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::preset::Preset;

fn default_speed() -> f32 {
    1.0
}

fn default_line_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_string_color() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn default_background() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

/// Everything needed to set up a [`Scene`](crate::Scene) and its window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    pub preset: Preset,
    /// Overrides [`Preset::grid_size`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<u32>,
    /// Overrides [`Preset::grid_range`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_range: Option<f32>,
    /// Overrides [`Preset::camera_distance`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_distance: Option<f32>,
    /// Time multiplier (1.0 = real time)
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Seed for noise and string spawning. Random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_line_color")]
    pub line_color: [f32; 3],
    #[serde(default = "default_string_color")]
    pub string_color: [f32; 3],
    #[serde(default = "default_background")]
    pub background: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl SceneConfig {
    /// A config that uses the preset's defaults unchanged.
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            grid_size: None,
            grid_range: None,
            camera_distance: None,
            speed: default_speed(),
            seed: None,
            line_color: default_line_color(),
            string_color: default_string_color(),
            background: default_background(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolve a command-line argument: a `.json` path or a preset name.
    pub fn from_arg(arg: &str) -> Result<Self, ConfigError> {
        if arg.ends_with(".json") {
            Self::load(arg)
        } else {
            Ok(Self::from_preset(arg.parse()?))
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size.unwrap_or_else(|| self.preset.grid_size())
    }

    pub fn grid_range(&self) -> f32 {
        self.grid_range.unwrap_or_else(|| self.preset.grid_range())
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
            .unwrap_or_else(|| self.preset.camera_distance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = SceneConfig::from_json(r#"{ "preset": "p-brane" }"#).unwrap();
        assert_eq!(config.preset, Preset::PBrane);
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.grid_size(), 100);
        assert_eq!(config.grid_range(), 10.0);
        assert_eq!(config.camera_distance(), 50.0);
        assert_eq!(config.line_color, [1.0, 1.0, 1.0]);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = SceneConfig::from_json(
            r#"{ "preset": "warp", "grid_size": 20, "grid_range": 2.5, "camera_distance": 8.0, "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.grid_size(), 20);
        assert_eq!(config.grid_range(), 2.5);
        assert_eq!(config.camera_distance(), 8.0);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_unknown_preset_is_parse_error() {
        let err = SceneConfig::from_json(r#"{ "preset": "wormhole" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_arg() {
        let config = SceneConfig::from_arg("super-equation").unwrap();
        assert_eq!(config.preset, Preset::SuperEquation);
        assert!(matches!(
            SceneConfig::from_arg("nope"),
            Err(ConfigError::UnknownPreset(_))
        ));
        assert!(matches!(
            SceneConfig::from_arg("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let mut config = SceneConfig::from_preset(Preset::LeewardWindward);
        config.speed = 0.25;
        config.seed = Some(42);

        let path = std::env::temp_dir().join(format!("warpfield-config-{}.json", std::process::id()));
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unset_overrides_are_not_written() {
        let json = SceneConfig::default().to_json().unwrap();
        assert!(!json.contains("grid_size"));
        assert!(json.contains("\"warp\""));
    }
}

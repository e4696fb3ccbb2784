//! Named visualizations with their default grid and camera.
//!
//! Each preset pairs a [`FieldVariant`] with the grid resolution, extent
//! and camera distance it was tuned for. Presets parse from kebab-case
//! names so they can be picked on the command line or in a scene file.
//!
//! ```ignore
//! let preset: Preset = "leeward-windward".parse()?;
//! assert_eq!(preset.grid_size(), 150);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::FieldVariant;

/// Schwarzschild radius used by the horizon presets.
pub const DEFAULT_SCHWARZSCHILD_RADIUS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    Warp,
    InvertedWarp,
    DissipatingWarp,
    TurbulentWarp,
    UnifiedForces,
    LeewardWindward,
    PBrane,
    EinsteinRosen,
    StretchedMassTime,
    SuperEquation,
    OctylCoeternal,
    /// Free strings drifting over a grid at rest.
    OpenClosedStrings,
}

impl Preset {
    pub const ALL: [Preset; 12] = [
        Preset::Warp,
        Preset::InvertedWarp,
        Preset::DissipatingWarp,
        Preset::TurbulentWarp,
        Preset::UnifiedForces,
        Preset::LeewardWindward,
        Preset::PBrane,
        Preset::EinsteinRosen,
        Preset::StretchedMassTime,
        Preset::SuperEquation,
        Preset::OctylCoeternal,
        Preset::OpenClosedStrings,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Warp => "warp",
            Preset::InvertedWarp => "inverted-warp",
            Preset::DissipatingWarp => "dissipating-warp",
            Preset::TurbulentWarp => "turbulent-warp",
            Preset::UnifiedForces => "unified-forces",
            Preset::LeewardWindward => "leeward-windward",
            Preset::PBrane => "p-brane",
            Preset::EinsteinRosen => "einstein-rosen",
            Preset::StretchedMassTime => "stretched-mass-time",
            Preset::SuperEquation => "super-equation",
            Preset::OctylCoeternal => "octyl-coeternal",
            Preset::OpenClosedStrings => "open-closed-strings",
        }
    }

    pub fn field(&self) -> FieldVariant {
        match self {
            Preset::Warp => FieldVariant::Warp,
            Preset::InvertedWarp => FieldVariant::InvertedWarp,
            Preset::DissipatingWarp => FieldVariant::DissipatingWarp,
            Preset::TurbulentWarp => FieldVariant::TurbulentWarp,
            Preset::UnifiedForces => FieldVariant::UnifiedForces,
            Preset::LeewardWindward => FieldVariant::LeewardWindward,
            Preset::PBrane => FieldVariant::PBrane,
            Preset::EinsteinRosen => FieldVariant::EinsteinRosen {
                schwarzschild_radius: DEFAULT_SCHWARZSCHILD_RADIUS,
            },
            Preset::StretchedMassTime => FieldVariant::StretchedMassTime {
                schwarzschild_radius: DEFAULT_SCHWARZSCHILD_RADIUS,
            },
            Preset::SuperEquation => FieldVariant::SuperEquation,
            Preset::OctylCoeternal => FieldVariant::OctylCoeternal,
            Preset::OpenClosedStrings => FieldVariant::Rest,
        }
    }

    /// Points per axis.
    pub fn grid_size(&self) -> u32 {
        match self {
            // 51 points per axis keeps the warp lattice at a 0.2 pitch
            Preset::Warp => 51,
            Preset::InvertedWarp | Preset::DissipatingWarp | Preset::TurbulentWarp => 200,
            Preset::LeewardWindward => 150,
            Preset::OpenClosedStrings => 50,
            _ => 100,
        }
    }

    /// Half-extent of the grid.
    pub fn grid_range(&self) -> f32 {
        match self {
            Preset::Warp
            | Preset::InvertedWarp
            | Preset::DissipatingWarp
            | Preset::TurbulentWarp
            | Preset::UnifiedForces => 5.0,
            _ => 10.0,
        }
    }

    /// Initial distance from the camera to the grid centre.
    pub fn camera_distance(&self) -> f32 {
        match self {
            Preset::Warp
            | Preset::InvertedWarp
            | Preset::DissipatingWarp
            | Preset::TurbulentWarp
            | Preset::UnifiedForces => 15.0,
            Preset::LeewardWindward => 60.0,
            _ => 50.0,
        }
    }

    pub fn has_strings(&self) -> bool {
        matches!(self, Preset::OpenClosedStrings)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

//! JSON configuration for a gradient, plus the numeric limits the controller enforces.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::animation::hue::{DEFAULT_HUE_SPEED, HueDirection};
use crate::animation::wander::DEFAULT_WANDER_SPEED;
use crate::effects::blur::BlurKind;
use crate::effects::distort::DistortionSpec;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{MeshgradError, MeshgradResult};
use crate::palette::color::Color;
use crate::palette::harmony::Harmony;

/// Inclusive range with a default, reported to hosts for slider setup.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Limits<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

pub const CELL_LIMITS: Limits<usize> = Limits {
    min: 3,
    max: 64,
    default: 12,
};

pub const BLUR_LIMITS: Limits<f64> = Limits {
    min: 0.0,
    max: 100.0,
    default: 40.0,
};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

impl Limits<usize> {
    pub fn clamp(&self, v: usize) -> usize {
        v.clamp(self.min, self.max)
    }
}

impl Limits<f64> {
    /// Non-finite input falls back to the default.
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_finite() {
            v.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Hue rotation speed in degrees per second.
    pub hue_speed: f64,
    pub hue_direction: HueDirection,
    /// Site drift speed in pixels per second.
    pub wander_speed: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hue_speed: DEFAULT_HUE_SPEED,
            hue_direction: HueDirection::Forward,
            wander_speed: DEFAULT_WANDER_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    pub width: u32,
    pub height: u32,
    pub cell_count: usize,
    pub blur_amount: f64,
    pub blur_kind: BlurKind,
    pub harmony: Harmony,
    /// Fixed seed for reproducible output; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Explicit site positions. Must match `cell_count` when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<Point>>,
    /// Palette as hex colors, installed over the generated one. Empty means generate.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<String>,
    /// Cell index -> hex color shown until the next regeneration.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<usize, String>,
    /// Cell index -> hex color pinned across regeneration.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub locks: BTreeMap<usize, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distortions: Vec<DistortionSpec>,
    pub show_overlay: bool,
    pub animation: AnimationConfig,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_count: CELL_LIMITS.default,
            blur_amount: BLUR_LIMITS.default,
            blur_kind: BlurKind::Gaussian,
            harmony: Harmony::Analogous,
            seed: None,
            sites: None,
            palette: Vec::new(),
            overrides: BTreeMap::new(),
            locks: BTreeMap::new(),
            distortions: Vec::new(),
            show_overlay: false,
            animation: AnimationConfig::default(),
        }
    }
}

impl GradientConfig {
    pub fn from_json_str(s: &str) -> MeshgradResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| MeshgradError::serde(format!("gradient config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader(r: impl Read) -> MeshgradResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MeshgradError::serde(format!("gradient config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> MeshgradResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> MeshgradResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MeshgradError::serde(format!("gradient config: {e}")))
    }

    pub fn canvas(&self) -> MeshgradResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn validate(&self) -> MeshgradResult<()> {
        self.canvas()?;
        if self.cell_count < CELL_LIMITS.min || self.cell_count > CELL_LIMITS.max {
            return Err(MeshgradError::validation(format!(
                "cell_count must be in {}..={}",
                CELL_LIMITS.min, CELL_LIMITS.max
            )));
        }
        if !self.blur_amount.is_finite()
            || self.blur_amount < BLUR_LIMITS.min
            || self.blur_amount > BLUR_LIMITS.max
        {
            return Err(MeshgradError::validation(format!(
                "blur_amount must be finite and in {}..={}",
                BLUR_LIMITS.min, BLUR_LIMITS.max
            )));
        }
        if let Some(sites) = &self.sites {
            if sites.len() != self.cell_count {
                return Err(MeshgradError::validation(format!(
                    "sites has {} entries but cell_count is {}",
                    sites.len(),
                    self.cell_count
                )));
            }
            if sites.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                return Err(MeshgradError::validation("site coordinates must be finite"));
            }
        }
        for hex in &self.palette {
            Color::from_hex(hex)?;
        }
        for (what, map) in [("override", &self.overrides), ("lock", &self.locks)] {
            for (&index, hex) in map {
                if index >= self.cell_count {
                    return Err(MeshgradError::validation(format!(
                        "{what} index {index} is out of range for {} cells",
                        self.cell_count
                    )));
                }
                Color::from_hex(hex)?;
            }
        }
        let speeds = [self.animation.hue_speed, self.animation.wander_speed];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(MeshgradError::validation(
                "animation speeds must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

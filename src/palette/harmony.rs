use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{lerp, normalize_hue};
use crate::palette::color::Color;

/// Color-wheel relationship used to derive a palette from one base hue.
///
/// Deserializes from any string; unknown names fall back to [`Harmony::Analogous`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Harmony {
    #[default]
    Analogous,
    Complementary,
    Triadic,
    Tetradic,
    Monochromatic,
    SplitComplementary,
    Random,
}

impl Harmony {
    pub const ALL: [Harmony; 7] = [
        Harmony::Analogous,
        Harmony::Complementary,
        Harmony::Triadic,
        Harmony::Tetradic,
        Harmony::Monochromatic,
        Harmony::SplitComplementary,
        Harmony::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Harmony::Analogous => "analogous",
            Harmony::Complementary => "complementary",
            Harmony::Triadic => "triadic",
            Harmony::Tetradic => "tetradic",
            Harmony::Monochromatic => "monochromatic",
            Harmony::SplitComplementary => "split-complementary",
            Harmony::Random => "random",
        }
    }

    /// Parse a harmony name; anything unrecognised resolves to analogous.
    pub fn parse_lossy(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "analogous" => Harmony::Analogous,
            "complementary" => Harmony::Complementary,
            "triadic" => Harmony::Triadic,
            "tetradic" => Harmony::Tetradic,
            "monochromatic" => Harmony::Monochromatic,
            "split-complementary" | "splitcomplementary" => Harmony::SplitComplementary,
            "random" => Harmony::Random,
            _ => {
                tracing::warn!(harmony = name, "unknown harmony, using analogous");
                Harmony::Analogous
            }
        }
    }
}

impl From<String> for Harmony {
    fn from(value: String) -> Self {
        Harmony::parse_lossy(&value)
    }
}

impl From<Harmony> for String {
    fn from(value: Harmony) -> Self {
        value.as_str().to_owned()
    }
}

/// Relative HSL shift applied to the working palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustment {
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub lightness: Option<f64>,
}

impl ColorAdjustment {
    fn component(v: Option<f64>) -> f64 {
        v.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn is_noop(&self) -> bool {
        Self::component(self.hue) == 0.0
            && Self::component(self.saturation) == 0.0
            && Self::component(self.lightness) == 0.0
    }
}

const ANALOGOUS_STEP_DEG: f64 = 15.0;
const SATURATION_RANGE: (f64, f64) = (70.0, 90.0);
const LIGHTNESS_RANGE: (f64, f64) = (40.0, 70.0);
const MONO_LIGHTNESS: (f64, f64) = (30.0, 70.0);

/// Generates harmony palettes and keeps the most recent one as a running working set.
#[derive(Debug)]
pub struct PaletteEngine {
    base_hue: f64,
    rng: StdRng,
    current: Vec<Color>,
}

impl Default for PaletteEngine {
    fn default() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }
}

impl PaletteEngine {
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let base_hue = rng.gen_range(0.0..360.0);
        Self {
            base_hue,
            rng,
            current: Vec::new(),
        }
    }

    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    pub fn set_base_hue(&mut self, hue: f64) {
        self.base_hue = normalize_hue(hue);
    }

    pub fn randomize_base_hue(&mut self) -> f64 {
        self.base_hue = self.rng.gen_range(0.0..360.0);
        self.base_hue
    }

    /// The most recently generated or adjusted palette.
    pub fn current(&self) -> &[Color] {
        &self.current
    }

    /// Produce `count` colors sharing one randomised saturation/lightness mood.
    ///
    /// The result also becomes the working palette for [`PaletteEngine::adjust_colors`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate(&mut self, harmony: Harmony, count: usize) -> Vec<Color> {
        let s = self.rng.gen_range(SATURATION_RANGE.0..=SATURATION_RANGE.1);
        let l = self.rng.gen_range(LIGHTNESS_RANGE.0..=LIGHTNESS_RANGE.1);
        let base = self.base_hue;

        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let color = match harmony {
                Harmony::Monochromatic => {
                    let t = unit_step(i, count);
                    Color::from_hsl(base, s, lerp(MONO_LIGHTNESS.0, MONO_LIGHTNESS.1, t))
                }
                Harmony::Random => Color::from_hsl(self.rng.gen_range(0.0..360.0), s, l),
                _ => Color::from_hsl(harmony_hue(harmony, base, i, count), s, l),
            };
            out.push(color);
        }

        self.current = out.clone();
        out
    }

    /// Shift the working palette. Hue wraps; saturation and lightness clamp to `[0,100]`.
    ///
    /// Adjustments accumulate across calls; per-cell overrides and locks live elsewhere
    /// and are not touched.
    pub fn adjust_colors(&mut self, adj: &ColorAdjustment) -> &[Color] {
        if adj.is_noop() {
            return &self.current;
        }
        let dh = ColorAdjustment::component(adj.hue);
        let ds = ColorAdjustment::component(adj.saturation);
        let dl = ColorAdjustment::component(adj.lightness);
        for c in &mut self.current {
            *c = Color::from_hsl(c.h() + dh, c.s() + ds, c.l() + dl);
        }
        &self.current
    }

    /// Replace the working palette wholesale (used when a host restores saved colors).
    pub fn set_current(&mut self, colors: Vec<Color>) {
        self.current = colors;
    }
}

/// `i / (count - 1)`, or the midpoint for a single swatch.
fn unit_step(i: usize, count: usize) -> f64 {
    if count <= 1 {
        0.5
    } else {
        i as f64 / (count - 1) as f64
    }
}

fn harmony_hue(harmony: Harmony, base: f64, i: usize, count: usize) -> f64 {
    let hue = match harmony {
        Harmony::Analogous => {
            let centre = (count.max(1) - 1) as f64 / 2.0;
            base + (i as f64 - centre) * ANALOGOUS_STEP_DEG
        }
        Harmony::Complementary => {
            if count <= 1 {
                base
            } else {
                base + 180.0 * unit_step(i, count)
            }
        }
        Harmony::Triadic => anchored_hue(base, i, count, 3),
        Harmony::Tetradic => anchored_hue(base, i, count, 4),
        Harmony::SplitComplementary => split_complementary_hue(base, i, count),
        // Handled by the caller; kept total for safety.
        Harmony::Monochromatic | Harmony::Random => base,
    };
    normalize_hue(hue)
}

/// Cycle through `anchors` hues spaced evenly on the wheel. Every full lap advances by a
/// fraction of one sector so counts that are not a multiple of `anchors` still spread out.
fn anchored_hue(base: f64, i: usize, count: usize, anchors: usize) -> f64 {
    let sector = 360.0 / anchors as f64;
    let laps = count.div_ceil(anchors).max(1);
    let anchor = i % anchors;
    let lap = i / anchors;
    base + anchor as f64 * sector + lap as f64 * sector / laps as f64
}

fn split_complementary_hue(base: f64, i: usize, count: usize) -> f64 {
    let n = count as f64;
    let head = ((n * 0.30).round() as usize).max(1);
    let band = (n * 0.35).round() as usize;
    if i < head {
        base
    } else if i < head + band {
        let t = if band > 1 {
            (i - head) as f64 / (band - 1) as f64
        } else {
            0.5
        };
        base + lerp(150.0, 180.0, t)
    } else {
        base + 210.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/harmony.rs"]
mod tests;

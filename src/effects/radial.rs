//! Center-based warps. Each maps a destination pixel back to a source position.

use std::f64::consts::TAU;

use crate::effects::sample::{Filter, opt_f64, remap};
use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleOptions {
    pub center_x: f64,
    pub center_y: f64,
    /// Peak displacement in pixels.
    pub amplitude: f64,
    /// Rings per 1000 px of radius.
    pub frequency: f64,
    /// Phase, in radians.
    pub time: f64,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            amplitude: 10.0,
            frequency: 12.0,
            time: 0.0,
        }
    }
}

impl RippleOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        let d = Self::default();
        Self {
            center_x: opt_f64(params, &["centerX", "center_x"], d.center_x),
            center_y: opt_f64(params, &["centerY", "center_y"], d.center_y),
            amplitude: opt_f64(params, &["amplitude"], d.amplitude),
            frequency: opt_f64(params, &["frequency"], d.frequency),
            time: opt_f64(params, &["time"], d.time),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwistOptions {
    pub center_x: f64,
    pub center_y: f64,
    /// Rotation at the center, in full turns.
    pub max_angle: f64,
    /// Fraction of the shorter canvas edge.
    pub radius: f64,
}

impl Default for TwistOptions {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            max_angle: 0.25,
            radius: 0.5,
        }
    }
}

impl TwistOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        let d = Self::default();
        Self {
            center_x: opt_f64(params, &["centerX", "center_x"], d.center_x),
            center_y: opt_f64(params, &["centerY", "center_y"], d.center_y),
            max_angle: opt_f64(params, &["maxAngle", "max_angle", "angle"], d.max_angle),
            radius: opt_f64(params, &["radius"], d.radius),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulgeOptions {
    pub center_x: f64,
    pub center_y: f64,
    /// Fraction of the shorter canvas edge.
    pub radius: f64,
    /// Positive bulges outward, negative pinches.
    pub strength: f64,
}

impl Default for BulgeOptions {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            radius: 0.5,
            strength: 0.5,
        }
    }
}

impl BulgeOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        let d = Self::default();
        Self {
            center_x: opt_f64(params, &["centerX", "center_x"], d.center_x),
            center_y: opt_f64(params, &["centerY", "center_y"], d.center_y),
            radius: opt_f64(params, &["radius"], d.radius),
            strength: opt_f64(params, &["strength"], d.strength),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BarrelOptions {
    /// Positive values give barrel distortion, negative values pincushion.
    pub power: f64,
}

impl Default for BarrelOptions {
    fn default() -> Self {
        Self { power: 0.5 }
    }
}

impl BarrelOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        Self {
            power: opt_f64(params, &["power", "strength"], Self::default().power),
        }
    }
}

// Smallest radial scale factor bulge and barrel will divide by.
const MIN_SCALE: f64 = 0.05;

fn center_px(src: &Bitmap, cx: f64, cy: f64) -> (f64, f64) {
    (cx * f64::from(src.width()), cy * f64::from(src.height()))
}

fn short_edge(src: &Bitmap) -> f64 {
    f64::from(src.width().min(src.height()))
}

/// Push every pixel along its own radial direction by `sin(k*r - time) * amplitude`,
/// with `k = 2*pi*frequency / 1000`.
pub fn ripple(src: &Bitmap, dst: &mut Bitmap, opts: &RippleOptions) {
    let (cx, cy) = center_px(src, opts.center_x, opts.center_y);
    let k = TAU * opts.frequency / 1000.0;
    remap(src, dst, Filter::Nearest, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let r = dx.hypot(dy);
        if r == 0.0 {
            return (x, y);
        }
        let disp = (k * r - opts.time).sin() * opts.amplitude;
        let scale = (r + disp) / r;
        (cx + dx * scale, cy + dy * scale)
    });
}

/// Rotate pixels around the center by an angle falling linearly from `max_angle` at the
/// center to zero at `radius`.
pub fn twist(src: &Bitmap, dst: &mut Bitmap, opts: &TwistOptions) {
    let (cx, cy) = center_px(src, opts.center_x, opts.center_y);
    let radius = opts.radius * short_edge(src);
    let max_angle = opts.max_angle * TAU;
    remap(src, dst, Filter::Nearest, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let r = dx.hypot(dy);
        if radius.is_nan() || radius <= 0.0 || r >= radius {
            return (x, y);
        }
        let angle = max_angle * (1.0 - r / radius);
        let (sin, cos) = angle.sin_cos();
        (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
    });
}

pub fn bulge(src: &Bitmap, dst: &mut Bitmap, opts: &BulgeOptions) {
    let (cx, cy) = center_px(src, opts.center_x, opts.center_y);
    let radius = opts.radius * short_edge(src);
    remap(src, dst, Filter::Bilinear, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let r = dx.hypot(dy);
        if radius.is_nan() || radius <= 0.0 || r >= radius {
            return (x, y);
        }
        let t = r / radius;
        let factor = (1.0 + opts.strength * (1.0 - t * t)).max(MIN_SCALE);
        (cx + dx / factor, cy + dy / factor)
    });
}

/// Lens warp over the whole image, in coordinates normalized to `[-1, 1]`.
pub fn barrel(src: &Bitmap, dst: &mut Bitmap, opts: &BarrelOptions) {
    let half_w = f64::from(src.width().saturating_sub(1)) / 2.0;
    let half_h = f64::from(src.height().saturating_sub(1)) / 2.0;
    let norm = |v: f64, half: f64| if half > 0.0 { v / half - 1.0 } else { 0.0 };
    remap(src, dst, Filter::Bilinear, |x, y| {
        let nx = norm(x, half_w);
        let ny = norm(y, half_h);
        let factor = (1.0 + opts.power * (nx * nx + ny * ny)).max(MIN_SCALE);
        ((nx / factor + 1.0) * half_w, (ny / factor + 1.0) * half_h)
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/radial.rs"]
mod tests;

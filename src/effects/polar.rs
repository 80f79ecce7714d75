use std::f64::consts::TAU;

use crate::effects::sample::{Filter, opt_f64, remap_sized};
use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolarOptions {
    pub center_x: f64,
    pub center_y: f64,
    /// Rotation of the angular axis, in full turns.
    pub angle_offset: f64,
    pub zoom: f64,
}

impl Default for PolarOptions {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            angle_offset: 0.0,
            zoom: 1.0,
        }
    }
}

impl PolarOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        let d = Self::default();
        Self {
            center_x: opt_f64(params, &["centerX", "center_x"], d.center_x),
            center_y: opt_f64(params, &["centerY", "center_y"], d.center_y),
            angle_offset: opt_f64(params, &["angleOffset", "angle_offset"], d.angle_offset),
            zoom: opt_f64(params, &["zoom"], d.zoom),
        }
    }
}

/// Wrap the image around a center point: the horizontal axis becomes angle and the
/// vertical axis becomes distance from the center.
///
/// The source is mirrored into a double-width strip first so the seam where the angle
/// wraps from 1 back to 0 lines up with matching pixels.
pub fn polar(src: &Bitmap, dst: &mut Bitmap, opts: &PolarOptions) {
    let (w, h) = src.dimensions();
    if src.is_empty() {
        dst.resize(w, h);
        return;
    }

    let strip = mirrored_strip(src);
    let strip_w = f64::from(strip.width());

    let cx = opts.center_x * f64::from(w);
    let cy = opts.center_y * f64::from(h);
    let max_r = farthest_corner(cx, cy, f64::from(w), f64::from(h)).max(1.0);
    let zoom = if opts.zoom.is_finite() && opts.zoom > 0.0 {
        opts.zoom
    } else {
        1.0
    };
    let last_row = f64::from(h - 1);

    remap_sized(&strip, dst, w, h, Filter::Bilinear, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let angle = (dy.atan2(dx) / TAU + 0.5 + opts.angle_offset).rem_euclid(1.0);
        let r = ((dx.hypot(dy) / max_r) / zoom).clamp(0.0, 1.0);
        (angle * (strip_w - 1.0), r * last_row)
    });
}

fn mirrored_strip(src: &Bitmap) -> Bitmap {
    let (w, h) = src.dimensions();
    let mut strip = Bitmap::new(w * 2, h);
    for y in 0..h {
        for x in 0..w {
            let px = src.pixel(x, y);
            strip.put_pixel(x, y, px);
            strip.put_pixel(2 * w - 1 - x, y, px);
        }
    }
    strip
}

fn farthest_corner(cx: f64, cy: f64, w: f64, h: f64) -> f64 {
    let fx = cx.abs().max((w - cx).abs());
    let fy = cy.abs().max((h - cy).abs());
    fx.hypot(fy)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/polar.rs"]
mod tests;

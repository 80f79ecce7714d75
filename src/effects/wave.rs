use std::f64::consts::TAU;

use crate::effects::sample::{Filter, opt_f64, opt_str, remap};
use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDirection {
    /// Each row slides sideways.
    #[default]
    Horizontal,
    /// Each column slides up or down.
    Vertical,
}

impl WaveDirection {
    fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" | "y" => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveOptions {
    pub amplitude: f64,
    /// Full periods across the image.
    pub frequency: f64,
    pub time: f64,
    pub direction: WaveDirection,
}

impl Default for WaveOptions {
    fn default() -> Self {
        Self {
            amplitude: 10.0,
            frequency: 3.0,
            time: 0.0,
            direction: WaveDirection::Horizontal,
        }
    }
}

impl WaveOptions {
    pub(crate) fn from_params(params: &serde_json::Value) -> Self {
        let d = Self::default();
        Self {
            amplitude: opt_f64(params, &["amplitude"], d.amplitude),
            frequency: opt_f64(params, &["frequency"], d.frequency),
            time: opt_f64(params, &["time"], d.time),
            direction: opt_str(params, &["direction", "axis"])
                .map(WaveDirection::parse_lossy)
                .unwrap_or(d.direction),
        }
    }
}

/// Shift rows (or columns) by `sin(2*pi*frequency*pos/extent + time) * amplitude` whole
/// pixels. Pixels pushed off one edge wrap onto the opposite edge.
pub fn wave(src: &Bitmap, dst: &mut Bitmap, opts: &WaveOptions) {
    let (w, h) = src.dimensions();
    // Shift reduced into [0, len) so huge amplitudes cannot overflow the subtraction.
    let shift_for = |pos: f64, extent: u32, len: u32| -> i64 {
        let s = (TAU * opts.frequency * pos / f64::from(extent.max(1)) + opts.time).sin()
            * opts.amplitude;
        if s.is_finite() {
            s.round().rem_euclid(f64::from(len.max(1))) as i64
        } else {
            0
        }
    };
    match opts.direction {
        WaveDirection::Horizontal => remap(src, dst, Filter::Nearest, |x, y| {
            let shift = shift_for(y, h, w);
            (wrap(x as i64 - shift, w), y)
        }),
        WaveDirection::Vertical => remap(src, dst, Filter::Nearest, |x, y| {
            let shift = shift_for(x, w, h);
            (x, wrap(y as i64 - shift, h))
        }),
    }
}

fn wrap(v: i64, len: u32) -> f64 {
    v.rem_euclid(i64::from(len.max(1))) as f64
}

#[cfg(test)]
#[path = "../../tests/unit/effects/wave.rs"]
mod tests;

use rayon::prelude::*;

use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Filter {
    Nearest,
    Bilinear,
}

/// Fill `dst` (resized to match `src`) by sampling `src` at `map(x, y)` for every
/// destination pixel. Source coordinates are clamped into the image, so `map` may return
/// anything, including non-finite values.
pub(crate) fn remap<F>(src: &Bitmap, dst: &mut Bitmap, filter: Filter, map: F)
where
    F: Fn(f64, f64) -> (f64, f64) + Sync,
{
    let (w, h) = src.dimensions();
    remap_sized(src, dst, w, h, filter, map);
}

/// Like [`remap`] but the destination takes explicit dimensions.
pub(crate) fn remap_sized<F>(src: &Bitmap, dst: &mut Bitmap, w: u32, h: u32, filter: Filter, map: F)
where
    F: Fn(f64, f64) -> (f64, f64) + Sync,
{
    dst.resize(w, h);
    if src.is_empty() || dst.is_empty() {
        dst.clear();
        return;
    }
    let stride = (w as usize) * 4;
    dst.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w as usize {
                let (sx, sy) = map(x as f64, y as f64);
                let px = match filter {
                    Filter::Nearest => sample_nearest(src, sx, sy),
                    Filter::Bilinear => sample_bilinear(src, sx, sy),
                };
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        });
}

fn clamp_coord(v: f64, len: u32) -> f64 {
    let max = f64::from(len.saturating_sub(1));
    if v.is_nan() { 0.0 } else { v.clamp(0.0, max) }
}

pub(crate) fn sample_nearest(src: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let cx = clamp_coord(x, src.width()).round() as u32;
    let cy = clamp_coord(y, src.height()).round() as u32;
    src.pixel(cx, cy)
}

pub(crate) fn sample_bilinear(src: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let fx = clamp_coord(x, src.width());
    let fy = clamp_coord(y, src.height());
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let dx = fx - f64::from(x0);
    let dy = fy - f64::from(y0);

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let v = f64::from(p00[c]) * (1.0 - dx) * (1.0 - dy)
            + f64::from(p10[c]) * dx * (1.0 - dy)
            + f64::from(p01[c]) * (1.0 - dx) * dy
            + f64::from(p11[c]) * dx * dy;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Read a numeric option under any of `keys`, falling back to `default` when missing or
/// non-finite. Numeric strings are accepted.
pub(crate) fn opt_f64(params: &serde_json::Value, keys: &[&str], default: f64) -> f64 {
    keys.iter()
        .filter_map(|k| params.get(*k))
        .find_map(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

pub(crate) fn opt_str<'a>(params: &'a serde_json::Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| params.get(*k))
        .find_map(|v| v.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sample.rs"]
mod tests;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::BLUR_LIMITS;
use crate::foundation::error::{MeshgradError, MeshgradResult};
use crate::render::bitmap::Bitmap;

/// Largest Gaussian kernel half-width; larger blur amounts are truncated to it.
pub const MAX_KERNEL_RADIUS: u32 = 256;

/// Blur strategy for the post-fx stage. The two are not expected to match visually.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurKind {
    /// Padded, edge-extended separable Gaussian with `sigma = amount`.
    #[default]
    Gaussian,
    /// Repeated 3-tap box filter; cheap fallback.
    Box,
}

/// Blur `bitmap` in place. `amount <= 0` (or non-finite) leaves it untouched; amounts
/// above [`BLUR_LIMITS`] are clamped to its maximum.
#[tracing::instrument(
    level = "debug",
    skip(bitmap),
    fields(w = bitmap.width(), h = bitmap.height())
)]
pub fn blur_in_place(bitmap: &mut Bitmap, amount: f64, kind: BlurKind) {
    if !amount.is_finite() || amount <= 0.0 || bitmap.is_empty() {
        return;
    }
    let amount = amount.min(BLUR_LIMITS.max);
    let result = match kind {
        BlurKind::Gaussian => gaussian_padded(bitmap, amount),
        BlurKind::Box => box_repeated(bitmap, amount),
    };
    match result {
        Ok(out) => *bitmap = out,
        Err(err) => tracing::warn!(%err, "blur skipped"),
    }
}

fn gaussian_padded(src: &Bitmap, amount: f64) -> MeshgradResult<Bitmap> {
    let sigma = amount as f32;
    let radius = ((amount * 3.0).ceil() as u32).clamp(1, MAX_KERNEL_RADIUS);
    let pad = (amount * 2.5).ceil() as u32;

    let padded = pad_edge_extended(src, pad);
    let blurred = blur_rgba8(padded.data(), padded.width(), padded.height(), radius, sigma)?;
    let blurred = Bitmap::from_raw(padded.width(), padded.height(), blurred)?;
    Ok(crop(&blurred, pad, src.width(), src.height()))
}

fn box_repeated(src: &Bitmap, amount: f64) -> MeshgradResult<Bitmap> {
    let iterations = ((amount / 4.0).ceil() as u32).clamp(1, 32);
    // 3 taps at 1/3 each, summing to exactly 1.0 in Q16.
    let kernel = [21845u32, 21846, 21845];
    let (w, h) = src.dimensions();
    let mut cur = src.data().to_vec();
    let mut tmp = vec![0u8; cur.len()];
    for _ in 0..iterations {
        horizontal_pass(&cur, &mut tmp, w, h, &kernel);
        vertical_pass(&tmp, &mut cur, w, h, &kernel);
    }
    Bitmap::from_raw(w, h, cur)
}

/// Copy `src` into the centre of a canvas grown by `pad` on every side, replicating the
/// border pixels outward.
fn pad_edge_extended(src: &Bitmap, pad: u32) -> Bitmap {
    let (w, h) = src.dimensions();
    let pw = w + 2 * pad;
    let ph = h + 2 * pad;
    let mut out = Bitmap::new(pw, ph);
    let src_data = src.data();
    let stride = (pw as usize) * 4;
    out.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            let sy = (py as i64 - i64::from(pad)).clamp(0, i64::from(h) - 1) as usize;
            for px in 0..pw as usize {
                let sx = (px as i64 - i64::from(pad)).clamp(0, i64::from(w) - 1) as usize;
                let si = (sy * w as usize + sx) * 4;
                row[px * 4..px * 4 + 4].copy_from_slice(&src_data[si..si + 4]);
            }
        });
    out
}

fn crop(src: &Bitmap, offset: u32, width: u32, height: u32) -> Bitmap {
    let mut out = Bitmap::new(width, height);
    let src_stride = (src.width() as usize) * 4;
    let dst_stride = (width as usize) * 4;
    let x0 = (offset as usize) * 4;
    for (y, row) in out.data_mut().chunks_exact_mut(dst_stride).enumerate() {
        let start = (y + offset as usize) * src_stride + x0;
        row.copy_from_slice(&src.data()[start..start + dst_stride]);
    }
    out
}

/// Separable fixed-point Gaussian over an RGBA8 buffer; edges clamp.
pub fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> MeshgradResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MeshgradError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(MeshgradError::render(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> MeshgradResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(MeshgradError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(MeshgradError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold the rounding residue into the centre tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let stride = (width as usize) * 4;
    debug_assert_eq!(dst.len(), stride * height as usize);
    dst.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        let src_row = &src[y * stride..(y + 1) * stride];
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1) as usize;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src_row[sx * 4 + c]);
                }
            }
            let out_idx = (x as usize) * 4;
            for c in 0..4 {
                row[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let stride = (width as usize) * 4;
    dst.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        for x in 0..width as usize {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1) as usize;
                let idx = sy * stride + x * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            for c in 0..4 {
                row[x * 4 + c] = q16_to_u8(acc[c]);
            }
        }
    });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;

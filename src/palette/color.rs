use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{MeshgradError, MeshgradResult};
use crate::foundation::math::normalize_hue;

/// HSL triple in degrees / percent, as returned by [`hex_to_hsl`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A palette entry: HSL (`h` in `[0,360)`, `s`/`l` in `[0,100]`) plus its canonical `#rrggbb`.
///
/// The hex string is derived at construction and never set independently, so the two
/// representations cannot drift apart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Color {
    h: f64,
    s: f64,
    l: f64,
    hex: String,
}

impl Color {
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = normalize_hue(h);
        let s = clamp_percent(s);
        let l = clamp_percent(l);
        Self {
            h,
            s,
            l,
            hex: hsl_to_hex(h, s, l),
        }
    }

    /// Parse `#rrggbb`, `#rgb` or `#rrggbbaa` (alpha ignored).
    ///
    /// HSL is kept unrounded so re-encoding yields the same hex.
    pub fn from_hex(hex: &str) -> MeshgradResult<Self> {
        let [r, g, b] = parse_hex_rgb(hex)?;
        let (h, s, l) = rgb_to_hsl(r, g, b);
        Ok(Self {
            h,
            s,
            l,
            hex: format_hex([r, g, b]),
        })
    }

    /// Neutral gray used when a cell has no palette entry at all.
    pub fn neutral() -> Self {
        Self::from_hsl(0.0, 0.0, 50.0)
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn hsl(&self) -> Hsl {
        Hsl {
            h: self.h,
            s: self.s,
            l: self.l,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        // The hex is authoritative for display, so decode it rather than re-run the HSL math.
        parse_hex_rgb(&self.hex).unwrap_or([128, 128, 128])
    }

    pub fn to_rgba8(&self) -> Rgba8 {
        let [r, g, b] = self.rgb();
        Rgba8::opaque(r, g, b)
    }

    /// Same saturation/lightness, hue rotated by `delta` degrees.
    pub fn rotated(&self, delta: f64) -> Self {
        Self::from_hsl(self.h + delta, self.s, self.l)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            HslObj { h: f64, s: f64, l: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Color::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::HslObj { h, s, l } => Ok(Color::from_hsl(h, s, l)),
        }
    }
}

/// Encode HSL (degrees, percent, percent) as lowercase `#rrggbb`.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    format_hex(hsl_to_rgb(h, s, l))
}

/// Decode a hex color into HSL rounded to whole degrees / percent.
pub fn hex_to_hsl(hex: &str) -> MeshgradResult<Hsl> {
    let [r, g, b] = parse_hex_rgb(hex)?;
    let (h, s, l) = rgb_to_hsl(r, g, b);
    Ok(Hsl {
        h: normalize_hue(h.round()),
        s: s.round(),
        l: l.round(),
    })
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

fn format_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn parse_hex_rgb(s: &str) -> MeshgradResult<[u8; 3]> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(MeshgradError::validation(format!("invalid hex color \"{s}\"")));
    }

    fn hex_byte(pair: &str) -> MeshgradResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| MeshgradError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                let nibble = hex_byte(&s[i..i + 1])?;
                *slot = nibble * 17;
            }
            Ok(out)
        }
        6 | 8 => Ok([hex_byte(&s[0..2])?, hex_byte(&s[2..4])?, hex_byte(&s[4..6])?]),
        _ => Err(MeshgradError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    let h = normalize_hue(h) / 360.0;
    let s = clamp_percent(s) / 100.0;
    let l = clamp_percent(l) / 100.0;

    if s == 0.0 {
        return [to_u8(l); 3];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    [
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta == 0.0 {
        return (0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (normalize_hue(h * 60.0), s * 100.0, l * 100.0)
}

#[cfg(test)]
#[path = "../../tests/unit/palette/color.rs"]
mod tests;

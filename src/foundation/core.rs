use crate::foundation::error::{MeshgradError, MeshgradResult};

pub use kurbo::{Point, Rect, Vec2};

/// Largest accepted canvas edge. Raster surfaces are addressed with `u16`.
pub const MAX_CANVAS_EDGE: u32 = 4096;

/// Pixel dimensions of the drawing area; also the bounding rectangle for sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> MeshgradResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshgradError::validation("canvas width and height must be > 0"));
        }
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(MeshgradError::validation(format!(
                "canvas edges must be <= {MAX_CANVAS_EDGE}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn pixel_len(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Clamp a point into `[0,width] x [0,height]`. Non-finite components snap to 0.
    pub fn clamp_point(self, x: f64, y: f64) -> Point {
        let fix = |v: f64, max: u32| {
            if v.is_finite() {
                v.clamp(0.0, f64::from(max))
            } else {
                0.0
            }
        };
        Point::new(fix(x, self.width), fix(y, self.height))
    }
}

/// Straight-alpha RGBA8 color, used for fills and the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

//! Interactive overlay geometry: hover ring and the three-segment control pill.

use kurbo::{BezPath, Circle, Line, Rect, RoundedRect, Shape};

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::render::raster::polygon_path;
use crate::sites::voronoi::Cell;

pub const PILL_SEGMENT_WIDTH: f64 = 34.0;
pub const PILL_HEIGHT: f64 = 28.0;
const PILL_MARGIN: f64 = 4.0;
const TOLERANCE: f64 = 0.1;

const RING_OUTER: Rgba8 = Rgba8::new(255, 255, 255, 230);
const RING_INNER: Rgba8 = Rgba8::new(0, 0, 0, 110);
const PILL_FILL: Rgba8 = Rgba8::new(20, 20, 24, 190);
const PILL_HOVER: Rgba8 = Rgba8::new(255, 255, 255, 60);
const ICON: Rgba8 = Rgba8::new(255, 255, 255, 235);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillSegment {
    /// Opens a color picker for the cell.
    Swap,
    /// Drags the cell's site.
    Move,
    /// Toggles the cell's color lock.
    Lock,
}

impl PillSegment {
    pub const ALL: [Self; 3] = [Self::Swap, Self::Move, Self::Lock];

    fn slot(self) -> f64 {
        match self {
            Self::Swap => 0.0,
            Self::Move => 1.0,
            Self::Lock => 2.0,
        }
    }
}

/// Placement of the pill for one hovered cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillLayout {
    rect: Rect,
}

impl PillLayout {
    /// Center the pill on `anchor`, nudged to stay inside the canvas where it fits.
    pub fn around(anchor: Point, canvas: Canvas) -> Self {
        let w = PILL_SEGMENT_WIDTH * 3.0;
        let h = PILL_HEIGHT;
        let fit = |center: f64, size: f64, extent: f64| {
            let lo = PILL_MARGIN;
            let hi = extent - size - PILL_MARGIN;
            let start = center - size / 2.0;
            if hi < lo { (extent - size) / 2.0 } else { start.clamp(lo, hi) }
        };
        let x0 = fit(anchor.x, w, f64::from(canvas.width));
        let y0 = fit(anchor.y, h, f64::from(canvas.height));
        Self {
            rect: Rect::new(x0, y0, x0 + w, y0 + h),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn segment_rect(&self, seg: PillSegment) -> Rect {
        let x0 = self.rect.x0 + seg.slot() * PILL_SEGMENT_WIDTH;
        Rect::new(x0, self.rect.y0, x0 + PILL_SEGMENT_WIDTH, self.rect.y1)
    }

    pub fn segment_at(&self, p: Point) -> Option<PillSegment> {
        PillSegment::ALL
            .into_iter()
            .find(|&seg| contains_half_open(self.segment_rect(seg), p))
    }
}

fn contains_half_open(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x < r.x1 && p.y >= r.y0 && p.y < r.y1
}

/// What the overlay should show this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayView {
    pub cell: usize,
    pub segment: Option<PillSegment>,
    pub show_pill: bool,
    pub swatch: Rgba8,
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum OverlayShape {
    Fill { path: BezPath, color: Rgba8 },
    Stroke { path: BezPath, width: f64, color: Rgba8 },
}

pub(crate) fn build_overlay(
    cells: &[Cell],
    sites: &[Point],
    canvas: Canvas,
    view: &OverlayView,
) -> Vec<OverlayShape> {
    let mut out = Vec::new();
    let Some(cell) = cells.get(view.cell).filter(|c| !c.is_empty()) else {
        return out;
    };

    let ring = polygon_path(&cell.polygon);
    out.push(OverlayShape::Stroke {
        path: ring.clone(),
        width: 3.0,
        color: RING_OUTER,
    });
    out.push(OverlayShape::Stroke {
        path: ring,
        width: 1.0,
        color: RING_INNER,
    });

    if !view.show_pill {
        return out;
    }
    let Some(anchor) = sites.get(view.cell).copied().or_else(|| cell.centroid()) else {
        return out;
    };
    let pill = PillLayout::around(anchor, canvas);
    out.push(OverlayShape::Fill {
        path: RoundedRect::from_rect(pill.rect(), PILL_HEIGHT / 2.0).to_path(TOLERANCE),
        color: PILL_FILL,
    });
    if let Some(seg) = view.segment {
        out.push(OverlayShape::Fill {
            path: RoundedRect::from_rect(pill.segment_rect(seg).inset(-2.0), 8.0)
                .to_path(TOLERANCE),
            color: PILL_HOVER,
        });
    }
    for seg in PillSegment::ALL {
        push_icon(&mut out, seg, pill.segment_rect(seg).center(), view);
    }
    out
}

fn push_icon(out: &mut Vec<OverlayShape>, seg: PillSegment, c: Point, view: &OverlayView) {
    match seg {
        PillSegment::Swap => {
            let dot = Circle::new(c, 7.0).to_path(TOLERANCE);
            out.push(OverlayShape::Fill {
                path: dot.clone(),
                color: Rgba8::new(view.swatch.r, view.swatch.g, view.swatch.b, 255),
            });
            out.push(OverlayShape::Stroke {
                path: dot,
                width: 1.5,
                color: ICON,
            });
        }
        PillSegment::Move => {
            let mut path = Line::new((c.x - 7.0, c.y), (c.x + 7.0, c.y)).to_path(TOLERANCE);
            let vertical = Line::new((c.x, c.y - 7.0), (c.x, c.y + 7.0)).to_path(TOLERANCE);
            path.extend(vertical.elements().iter().copied());
            out.push(OverlayShape::Stroke {
                path,
                width: 2.0,
                color: ICON,
            });
        }
        PillSegment::Lock => {
            let body = Rect::new(c.x - 6.0, c.y - 1.0, c.x + 6.0, c.y + 7.0);
            let shackle = Rect::new(c.x - 4.0, c.y - 7.0, c.x + 4.0, c.y - 1.0);
            out.push(OverlayShape::Stroke {
                path: RoundedRect::from_rect(shackle, 3.0).to_path(TOLERANCE),
                width: 1.5,
                color: ICON,
            });
            let body_path = RoundedRect::from_rect(body, 1.5).to_path(TOLERANCE);
            if view.locked {
                out.push(OverlayShape::Fill {
                    path: body_path,
                    color: ICON,
                });
            } else {
                out.push(OverlayShape::Stroke {
                    path: body_path,
                    width: 1.5,
                    color: ICON,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;

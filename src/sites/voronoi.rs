//! Bounded Voronoi partition by half-plane clipping.
//!
//! Each cell starts as the bounding rectangle and is clipped against the perpendicular
//! bisector of its site and every neighbour that can still reach it. Neighbours are visited
//! nearest-first (ties broken by index) and the scan stops once the next neighbour is
//! farther than twice the cell's current radius, since its bisector can no longer cut the
//! cell. The result is exact for convex cells and fully deterministic: identical inputs
//! produce identical vertex sequences.

use crate::foundation::core::{Point, Rect};

/// One polygonal region of the partition, paired with its originating site index.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Cell {
    pub site: usize,
    /// Convex polygon, counter-clockwise in canvas space (y down). Empty when the site is
    /// an exact duplicate of a lower-indexed site.
    pub polygon: Vec<Point>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.polygon.len() < 3
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.polygon)
    }

    /// Area-weighted centroid, or `None` for an empty cell.
    pub fn centroid(&self) -> Option<Point> {
        let a = signed_area(&self.polygon);
        if self.is_empty() || a.abs() < f64::EPSILON {
            return None;
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for (p, q) in edges(&self.polygon) {
            let cross = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        Some(Point::new(cx / (6.0 * a), cy / (6.0 * a)))
    }

    /// Point-in-convex-polygon test; boundary points count as inside.
    pub fn contains(&self, p: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let orientation = signed_area(&self.polygon).signum();
        edges(&self.polygon).all(|(a, b)| {
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            cross * orientation >= -1e-9
        })
    }
}

/// Absolute polygon area (shoelace).
pub fn polygon_area(poly: &[Point]) -> f64 {
    signed_area(poly).abs()
}

fn signed_area(poly: &[Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    edges(poly).map(|(p, q)| p.x * q.y - q.x * p.y).sum::<f64>() / 2.0
}

fn edges(poly: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    poly.iter()
        .enumerate()
        .map(move |(i, &p)| (p, poly[(i + 1) % poly.len()]))
}

/// Partition `bounds` into one cell per site.
///
/// Sites outside `bounds` still own the part of the rectangle closest to them (possibly
/// nothing). `cells[i].site == i` always holds.
pub fn compute_cells(sites: &[Point], bounds: Rect) -> Vec<Cell> {
    let rect = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x0, bounds.y1),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x1, bounds.y0),
    ];

    let mut order: Vec<(f64, usize)> = Vec::with_capacity(sites.len());
    let mut cells = Vec::with_capacity(sites.len());
    for (i, &site) in sites.iter().enumerate() {
        order.clear();
        order.extend(
            sites
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, &other)| ((other - site).hypot2(), j)),
        );
        order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut poly = rect.to_vec();
        for &(d2, j) in &order {
            if poly.len() < 3 {
                break;
            }
            if d2 == 0.0 {
                // Coincident sites: the lower index owns the region.
                if j < i {
                    poly.clear();
                }
                continue;
            }
            let reach2 = poly
                .iter()
                .map(|&v| (v - site).hypot2())
                .fold(0.0f64, f64::max);
            if d2 > 4.0 * reach2 {
                break;
            }
            poly = clip_to_bisector(&poly, site, sites[j]);
        }
        if poly.len() < 3 {
            poly.clear();
        }
        cells.push(Cell {
            site: i,
            polygon: poly,
        });
    }
    cells
}

/// Keep the part of `poly` closer to `a` than to `b` (Sutherland-Hodgman, one plane).
fn clip_to_bisector(poly: &[Point], a: Point, b: Point) -> Vec<Point> {
    // Inside iff n·p <= c, with n = b - a and c = (|b|² - |a|²) / 2.
    let n = b - a;
    let c = (b.to_vec2().hypot2() - a.to_vec2().hypot2()) / 2.0;
    let side = |p: Point| n.x * p.x + n.y * p.y - c;

    let mut out = Vec::with_capacity(poly.len() + 1);
    for (p, q) in edges(poly) {
        let sp = side(p);
        let sq = side(q);
        let p_in = sp <= 0.0;
        let q_in = sq <= 0.0;
        if p_in {
            out.push(p);
        }
        if p_in != q_in {
            let t = sp / (sp - sq);
            out.push(p.lerp(q, t));
        }
    }
    dedup_closed(&mut out);
    out
}

fn dedup_closed(poly: &mut Vec<Point>) {
    const EPS2: f64 = 1e-18;
    poly.dedup_by(|a, b| (*a - *b).hypot2() <= EPS2);
    while poly.len() > 1 {
        let first = poly[0];
        let last = poly[poly.len() - 1];
        if (first - last).hypot2() <= EPS2 {
            poly.pop();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sites/voronoi.rs"]
mod tests;

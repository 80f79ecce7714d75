use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::{Canvas, Point};
use crate::sites::voronoi::{Cell, compute_cells};

/// Authoritative site positions plus the cached partition derived from them.
///
/// Every mutator recomputes the partition in full; callers that drag sites should batch to
/// one move per frame.
#[derive(Debug)]
pub struct SiteField {
    canvas: Canvas,
    sites: Vec<Point>,
    cells: Vec<Cell>,
    stale: bool,
    rng: StdRng,
}

impl SiteField {
    pub fn new(canvas: Canvas) -> Self {
        Self::from_rng(canvas, StdRng::from_entropy())
    }

    pub fn with_seed(canvas: Canvas, seed: u64) -> Self {
        Self::from_rng(canvas, StdRng::seed_from_u64(seed))
    }

    fn from_rng(canvas: Canvas, rng: StdRng) -> Self {
        Self {
            canvas,
            sites: Vec::new(),
            cells: Vec::new(),
            stale: false,
            rng,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Replace all sites with `count` uniform random points. `count == 0` is a no-op.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_random_sites(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        self.sites = (0..count)
            .map(|_| Point::new(self.rng.gen_range(0.0..=w), self.rng.gen_range(0.0..=h)))
            .collect();
        self.recompute();
    }

    /// Install explicit site positions (clamped into the canvas).
    pub fn set_sites(&mut self, sites: impl IntoIterator<Item = Point>) {
        let canvas = self.canvas;
        self.sites = sites
            .into_iter()
            .map(|p| canvas.clamp_point(p.x, p.y))
            .collect();
        self.recompute();
    }

    /// Change the clip rectangle. Sites keep their stored coordinates, even when they now
    /// fall outside.
    pub fn set_dimensions(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        if !self.sites.is_empty() {
            self.recompute();
        }
    }

    /// Move one site, clamped into the canvas. Returns `false` for a stale index.
    pub fn move_site(&mut self, index: usize, x: f64, y: f64) -> bool {
        let clamped = self.canvas.clamp_point(x, y);
        let Some(site) = self.sites.get_mut(index) else {
            tracing::debug!(index, "move_site ignored: index out of range");
            return false;
        };
        *site = clamped;
        self.recompute();
        true
    }

    /// Nearest site by Euclidean distance; ties resolve to the lower index.
    pub fn find_closest_site_index(&self, x: f64, y: f64) -> Option<usize> {
        let p = Point::new(x, y);
        let mut best: Option<(usize, f64)> = None;
        for (i, &s) in self.sites.iter().enumerate() {
            let d = (s - p).hypot2();
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// The cached partition. `force_recompute` rebuilds it unconditionally; the cache is
    /// also rebuilt when sites were mutated through [`SiteField::sites_mut`].
    pub fn get_cells(&mut self, force_recompute: bool) -> &[Cell] {
        if force_recompute || self.stale {
            self.recompute();
        }
        &self.cells
    }

    /// Last computed partition without any recomputation.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Direct write access for animation drivers. Marks the partition stale; it is rebuilt
    /// on the next [`SiteField::get_cells`].
    pub fn sites_mut(&mut self) -> &mut [Point] {
        self.stale = true;
        &mut self.sites
    }

    fn recompute(&mut self) {
        self.cells = compute_cells(&self.sites, self.canvas.rect());
        self.stale = false;
        tracing::trace!(cells = self.cells.len(), "partition recomputed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sites/field.rs"]
mod tests;

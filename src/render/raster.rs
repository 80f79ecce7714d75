use kurbo::BezPath;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{MeshgradError, MeshgradResult};
use crate::render::bitmap::Bitmap;
use crate::render::composite::{over_straight_in_place, unpremultiply_into};
use crate::render::overlay::OverlayShape;
use crate::sites::voronoi::Cell;

// Width of the same-color stroke drawn around each fill so anti-aliased edges between
// neighbouring cells do not let the background show through.
const SEAM_STROKE: f64 = 1.0;

/// Closed path through `points`; empty when fewer than three points.
pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 3 {
        return path;
    }
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    path.close_path();
    path
}

/// CPU rasterizer for cell fills and overlay shapes. The render context and pixmap are
/// reused between frames while the surface size stays the same.
pub(crate) struct CellRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl Default for CellRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CellRasterizer {
    pub(crate) fn new() -> Self {
        Self {
            ctx: None,
            pixmap: None,
        }
    }

    /// Fill every cell polygon with `color_of(cell.site)` into `out`, which is resized to
    /// `width x height` and starts transparent.
    #[tracing::instrument(skip_all, fields(cells = cells.len()))]
    pub(crate) fn paint_cells(
        &mut self,
        width: u32,
        height: u32,
        cells: &[Cell],
        color_of: impl Fn(usize) -> Rgba8,
        out: &mut Bitmap,
    ) -> MeshgradResult<()> {
        let (w, h) = surface_size(width, height)?;
        self.with_ctx_mut(w, h, |ctx, pixmap| {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(SEAM_STROKE));
            for cell in cells.iter().filter(|c| !c.is_empty()) {
                let c = color_of(cell.site);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                let path = bezpath_to_cpu(&polygon_path(&cell.polygon));
                ctx.fill_path(&path);
                ctx.stroke_path(&path);
            }
            ctx.flush();
            ctx.render_to_pixmap(pixmap);
        });
        out.resize(width, height);
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| MeshgradError::render("cell pixmap missing after paint"))?;
        unpremultiply_into(out.data_mut(), pixmap.data_as_u8_slice())
    }

    /// Draw `shapes` into a transparent layer and composite it over `target`.
    pub(crate) fn paint_overlay(
        &mut self,
        shapes: &[OverlayShape],
        target: &mut Bitmap,
    ) -> MeshgradResult<()> {
        if shapes.is_empty() || target.is_empty() {
            return Ok(());
        }
        let (w, h) = surface_size(target.width(), target.height())?;
        self.with_ctx_mut(w, h, |ctx, pixmap| {
            for shape in shapes {
                match shape {
                    OverlayShape::Fill { path, color } => {
                        ctx.set_paint(cpu_color(*color));
                        ctx.fill_path(&bezpath_to_cpu(path));
                    }
                    OverlayShape::Stroke { path, width, color } => {
                        ctx.set_paint(cpu_color(*color));
                        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                        ctx.stroke_path(&bezpath_to_cpu(path));
                    }
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(pixmap);
        });
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| MeshgradError::render("overlay pixmap missing after paint"))?;
        over_straight_in_place(target.data_mut(), pixmap.data_as_u8_slice())
    }

    fn with_ctx_mut(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext, &mut vello_cpu::Pixmap),
    ) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == width && p.height() == height => p,
            _ => vello_cpu::Pixmap::new(width, height),
        };
        ctx.reset();
        pixmap.data_as_u8_slice_mut().fill(0);
        f(&mut ctx, &mut pixmap);
        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);
    }
}

fn surface_size(width: u32, height: u32) -> MeshgradResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MeshgradError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MeshgradError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MeshgradError::render("surface must be at least 1x1"));
    }
    Ok((w, h))
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

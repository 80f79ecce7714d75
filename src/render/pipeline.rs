//! Four-stage render scheduler: `cells -> bitmap -> post_fx -> ui`.
//!
//! Each stage caches its output and only re-runs when it, or a stage upstream of it, has
//! been marked dirty since its last run. Marking a stage dirty always marks everything
//! downstream of it too, so a displayed frame never mixes fresh and stale stages.

use crate::colors::state::ColorState;
use crate::effects::blur::{BlurKind, blur_in_place};
use crate::effects::distort::DistortionStack;
use crate::foundation::error::MeshgradResult;
use crate::palette::color::Color;
use crate::palette::harmony::{Harmony, PaletteEngine};
use crate::render::bitmap::Bitmap;
use crate::render::overlay::{OverlayView, build_overlay};
use crate::render::raster::CellRasterizer;
use crate::sites::field::SiteField;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Cells,
    Bitmap,
    PostFx,
    Ui,
}

impl Stage {
    pub const ALL: [Self; 4] = [Self::Cells, Self::Bitmap, Self::PostFx, Self::Ui];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyFlags([bool; 4]);

impl Default for DirtyFlags {
    /// Everything starts dirty so the first render runs every stage.
    fn default() -> Self {
        Self([true; 4])
    }
}

impl DirtyFlags {
    pub fn is_dirty(&self, stage: Stage) -> bool {
        self.0[stage.index()]
    }

    pub fn is_clean(&self) -> bool {
        self.0.iter().all(|d| !d)
    }

    fn mark_from(&mut self, stage: Stage) {
        for d in &mut self.0[stage.index()..] {
            *d = true;
        }
    }

    fn clear(&mut self, stage: Stage) {
        self.0[stage.index()] = false;
    }
}

/// How many times each stage has executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub cells: u64,
    pub bitmap: u64,
    pub post_fx: u64,
    pub ui: u64,
}

/// Borrowed view of the model for one render call.
pub struct RenderScene<'a> {
    pub sites: &'a mut SiteField,
    pub colors: &'a mut ColorState,
    pub palette: &'a mut PaletteEngine,
    pub distortions: &'a DistortionStack,
    pub overlay: Option<OverlayView>,
    pub blur_amount: f64,
    pub blur_kind: BlurKind,
    pub harmony: Harmony,
    /// A continuous animation is running: cells are recomputed every time and the overlay
    /// is skipped.
    pub animating: bool,
}

/// Explicit color input for the bitmap stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorRequest<'a> {
    pub colors: Option<&'a [Color]>,
    /// When false the palette is replaced: by `colors` if given, otherwise by a fresh
    /// palette from the engine.
    pub preserve: bool,
}

impl ColorRequest<'_> {
    pub fn keep() -> Self {
        Self {
            colors: None,
            preserve: true,
        }
    }
}

pub struct RenderPipeline {
    dirty: DirtyFlags,
    painted: Bitmap,
    offscreen: Bitmap,
    onscreen: Bitmap,
    raster: CellRasterizer,
    stats: PipelineStats,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::default(),
            painted: Bitmap::new(0, 0),
            offscreen: Bitmap::new(0, 0),
            onscreen: Bitmap::new(0, 0),
            raster: CellRasterizer::new(),
            stats: PipelineStats::default(),
        }
    }

    /// Mark `stage` and every later stage dirty. The only way to dirty a stage.
    pub fn mark_dirty_from(&mut self, stage: Stage) {
        self.dirty.mark_from(stage);
    }

    pub fn is_dirty(&self, stage: Stage) -> bool {
        self.dirty.is_dirty(stage)
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Cell fills as painted, before blur.
    pub fn painted(&self) -> &Bitmap {
        &self.painted
    }

    /// Blurred cell image before distortion and overlay.
    pub fn offscreen(&self) -> &Bitmap {
        &self.offscreen
    }

    /// Last displayed frame.
    pub fn frame(&self) -> &Bitmap {
        &self.onscreen
    }

    /// Bring every dirty stage up to date and return the displayed frame.
    #[tracing::instrument(skip_all, fields(dirty = ?self.dirty))]
    pub fn render(
        &mut self,
        scene: RenderScene<'_>,
        request: ColorRequest<'_>,
    ) -> MeshgradResult<&Bitmap> {
        let RenderScene {
            sites,
            colors,
            palette,
            distortions,
            overlay,
            blur_amount,
            blur_kind,
            harmony,
            animating,
        } = scene;

        if self.dirty.is_dirty(Stage::Cells) {
            sites.get_cells(animating);
            self.stats.cells += 1;
            self.dirty.mark_from(Stage::Bitmap);
            self.dirty.clear(Stage::Cells);
        }

        if self.dirty.is_dirty(Stage::Bitmap) {
            match (request.preserve, request.colors) {
                (_, Some(explicit)) => colors.set_palette(explicit.to_vec()),
                (false, None) => {
                    let fresh = palette.generate(harmony, colors.cell_count());
                    colors.regenerate(fresh);
                }
                (true, None) => {}
            }
            let canvas = sites.canvas();
            let colors: &ColorState = colors;
            self.raster.paint_cells(
                canvas.width,
                canvas.height,
                sites.cells(),
                |i| colors.get_cell_color(i).to_rgba8(),
                &mut self.painted,
            )?;
            self.stats.bitmap += 1;
            self.dirty.mark_from(Stage::PostFx);
            self.dirty.clear(Stage::Bitmap);
        }

        if self.dirty.is_dirty(Stage::PostFx) {
            self.offscreen.copy_from(&self.painted);
            if blur_amount > 0.0 {
                blur_in_place(&mut self.offscreen, blur_amount, blur_kind);
            }
            self.stats.post_fx += 1;
            self.dirty.mark_from(Stage::Ui);
            self.dirty.clear(Stage::PostFx);
        }

        if self.dirty.is_dirty(Stage::Ui) {
            self.onscreen.clear();
            distortions.apply(&self.offscreen, &mut self.onscreen);
            let overlay = overlay.filter(|_| !distortions.has_active() && !animating);
            if let Some(view) = overlay {
                let shapes = build_overlay(sites.cells(), sites.sites(), sites.canvas(), &view);
                self.raster.paint_overlay(&shapes, &mut self.onscreen)?;
            }
            self.stats.ui += 1;
            self.dirty.clear(Stage::Ui);
        }

        Ok(&self.onscreen)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

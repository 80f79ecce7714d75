//! [`MeshGradient`]: the single owner of the site field, palette, color state, distortion
//! stack and render pipeline. Every mutation goes through it, marks the right pipeline
//! stage dirty, and queues an advisory [`GradientEvent`].

use std::path::Path;

use crate::animation::hue::{HueAnimator, HueDirection};
use crate::animation::wander::CellWander;
use crate::colors::state::ColorState;
use crate::config::{AnimationConfig, BLUR_LIMITS, CELL_LIMITS, GradientConfig, Limits};
use crate::effects::blur::BlurKind;
use crate::effects::distort::{DistortionSpec, DistortionStack};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::MeshgradResult;
use crate::interact::input::{Interaction, InteractionEffect, PointerPhase};
use crate::palette::color::Color;
use crate::palette::harmony::{ColorAdjustment, Harmony, PaletteEngine};
use crate::render::bitmap::Bitmap;
use crate::render::pipeline::{ColorRequest, RenderPipeline, RenderScene, Stage};
use crate::sites::field::SiteField;
use crate::sites::voronoi::Cell;

// Offsets that split one user seed into independent streams.
const PALETTE_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;
const WANDER_STREAM: u64 = 0xd1b5_4a32_d192_ed03;

/// Advisory notifications for UI collaborators. Nothing in the model depends on them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GradientEvent {
    ColorsChanged,
    CellCountChanged { count: usize },
    DistortionChanged,
    AnimationStateChanged { hue: bool, wander: bool },
    ColorPickRequested { cell: usize, current: String },
}

/// Optional overrides for [`MeshGradient::setup_generation`]. Missing fields keep the
/// current setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub cell_count: Option<usize>,
    pub blur_amount: Option<f64>,
    pub color_harmony: Option<Harmony>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LimitState<T> {
    pub min: T,
    pub max: T,
    pub current: T,
    pub default: T,
}

impl<T: Copy> LimitState<T> {
    fn of(limits: Limits<T>, current: T) -> Self {
        Self {
            min: limits.min,
            max: limits.max,
            current,
            default: limits.default,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Constraints {
    pub blur: LimitState<f64>,
    pub cells: LimitState<usize>,
}

pub struct MeshGradient {
    sites: SiteField,
    colors: ColorState,
    palette: PaletteEngine,
    distortions: DistortionStack,
    pipeline: RenderPipeline,
    interaction: Interaction,
    hue: HueAnimator,
    wander: CellWander,
    blur_amount: f64,
    blur_kind: BlurKind,
    harmony: Harmony,
    show_overlay: bool,
    animation: AnimationConfig,
    pending_drag: Option<(usize, Point)>,
    events: Vec<GradientEvent>,
    seed: Option<u64>,
}

impl MeshGradient {
    /// Default settings, seeded from entropy, with a first generation already done.
    pub fn new(canvas: Canvas) -> Self {
        Self::assemble(
            SiteField::new(canvas),
            PaletteEngine::default(),
            CellWander::default(),
            GenerationOptions::default(),
        )
    }

    /// Like [`MeshGradient::new`] but reproducible.
    pub fn with_seed(canvas: Canvas, seed: u64) -> Self {
        let (sites, palette, wander) = seeded_parts(canvas, seed);
        let mut g = Self::assemble(sites, palette, wander, GenerationOptions::default());
        g.seed = Some(seed);
        g
    }

    #[tracing::instrument(
        skip_all,
        fields(width = cfg.width, height = cfg.height, cells = cfg.cell_count)
    )]
    pub fn from_config(cfg: &GradientConfig) -> MeshgradResult<Self> {
        cfg.validate()?;
        let canvas = cfg.canvas()?;
        let opts = GenerationOptions {
            cell_count: Some(cfg.cell_count),
            blur_amount: Some(cfg.blur_amount),
            color_harmony: Some(cfg.harmony),
        };
        let mut g = match cfg.seed {
            Some(seed) => {
                let (sites, palette, wander) = seeded_parts(canvas, seed);
                Self::assemble(sites, palette, wander, opts)
            }
            None => Self::assemble(
                SiteField::new(canvas),
                PaletteEngine::default(),
                CellWander::default(),
                opts,
            ),
        };
        g.seed = cfg.seed;
        g.blur_kind = cfg.blur_kind;
        g.show_overlay = cfg.show_overlay;
        g.animation = cfg.animation;
        if let Some(sites) = &cfg.sites {
            g.sites.set_sites(sites.iter().copied());
        }
        if !cfg.palette.is_empty() {
            let colors = cfg
                .palette
                .iter()
                .map(|hex| Color::from_hex(hex))
                .collect::<MeshgradResult<Vec<_>>>()?;
            g.palette.set_current(colors.clone());
            g.hue.rebase(colors.clone());
            g.colors.set_palette(colors);
        }
        for (&index, hex) in &cfg.overrides {
            g.colors.set_cell_color(index, hex, false);
        }
        for (&index, hex) in &cfg.locks {
            g.colors.set_cell_color(index, hex, true);
        }
        g.distortions = DistortionStack::from_specs(&cfg.distortions);
        g.pipeline.mark_dirty_from(Stage::Cells);
        g.events.clear();
        Ok(g)
    }

    fn assemble(
        sites: SiteField,
        palette: PaletteEngine,
        wander: CellWander,
        opts: GenerationOptions,
    ) -> Self {
        let mut g = Self {
            sites,
            colors: ColorState::new(0),
            palette,
            distortions: DistortionStack::new(),
            pipeline: RenderPipeline::new(),
            interaction: Interaction::new(),
            hue: HueAnimator::new(),
            wander,
            blur_amount: BLUR_LIMITS.default,
            blur_kind: BlurKind::default(),
            harmony: Harmony::default(),
            show_overlay: true,
            animation: AnimationConfig::default(),
            pending_drag: None,
            events: Vec::new(),
            seed: None,
        };
        g.colors.set_cell_count(CELL_LIMITS.default);
        g.setup_generation(opts);
        g.events.clear();
        g
    }

    /// Snapshot of the current state as a config that reproduces this image: sites,
    /// palette, overrides and locks are written out explicitly.
    pub fn to_config(&self) -> GradientConfig {
        let canvas = self.sites.canvas();
        GradientConfig {
            width: canvas.width,
            height: canvas.height,
            cell_count: self.colors.cell_count(),
            blur_amount: self.blur_amount,
            blur_kind: self.blur_kind,
            harmony: self.harmony,
            seed: self.seed,
            sites: Some(self.sites.sites().to_vec()),
            palette: self
                .colors
                .palette()
                .iter()
                .map(|c| c.hex().to_owned())
                .collect(),
            overrides: self
                .colors
                .overrides()
                .map(|(i, c)| (i, c.hex().to_owned()))
                .collect(),
            locks: self
                .colors
                .locked_indices()
                .map(|i| (i, self.colors.get_cell_color(i).hex().to_owned()))
                .collect(),
            distortions: self.distortions.to_specs(),
            show_overlay: self.show_overlay,
            animation: self.animation,
        }
    }

    /// Regenerate sites and palette. Re-randomizes the base hue, clears overrides and
    /// keeps locks.
    #[tracing::instrument(skip(self))]
    pub fn setup_generation(&mut self, opts: GenerationOptions) {
        let previous = self.colors.cell_count();
        let count = CELL_LIMITS.clamp(opts.cell_count.unwrap_or(previous));
        if let Some(blur) = opts.blur_amount {
            self.blur_amount = BLUR_LIMITS.clamp(blur);
        }
        if let Some(h) = opts.color_harmony {
            self.harmony = h;
        }

        self.palette.randomize_base_hue();
        self.sites.generate_random_sites(count);
        self.colors.set_cell_count(count);
        let fresh = self.palette.generate(self.harmony, count);
        self.hue.rebase(fresh.clone());
        self.colors.regenerate(fresh);

        self.interaction.reset();
        self.pending_drag = None;
        self.pipeline.mark_dirty_from(Stage::Cells);

        if count != previous {
            self.events.push(GradientEvent::CellCountChanged { count });
        }
        self.events.push(GradientEvent::ColorsChanged);
    }

    /// Fresh sites and palette with the current settings.
    pub fn generate(&mut self) {
        self.setup_generation(GenerationOptions::default());
    }

    pub fn set_cell_count(&mut self, count: usize) {
        self.setup_generation(GenerationOptions {
            cell_count: Some(count),
            ..GenerationOptions::default()
        });
    }

    pub fn cell_count(&self) -> usize {
        self.colors.cell_count()
    }

    pub fn blur_amount(&self) -> f64 {
        self.blur_amount
    }

    pub fn set_blur_amount(&mut self, amount: f64) {
        let amount = BLUR_LIMITS.clamp(amount);
        if amount != self.blur_amount {
            self.blur_amount = amount;
            self.pipeline.mark_dirty_from(Stage::PostFx);
        }
    }

    pub fn blur_kind(&self) -> BlurKind {
        self.blur_kind
    }

    pub fn set_blur_kind(&mut self, kind: BlurKind) {
        if kind != self.blur_kind {
            self.blur_kind = kind;
            self.pipeline.mark_dirty_from(Stage::PostFx);
        }
    }

    pub fn harmony(&self) -> Harmony {
        self.harmony
    }

    /// Switch harmony and regenerate the palette; sites stay where they are.
    pub fn set_harmony(&mut self, harmony: Harmony) {
        self.harmony = harmony;
        let fresh = self.palette.generate(harmony, self.colors.cell_count());
        self.hue.rebase(fresh.clone());
        self.colors.regenerate(fresh);
        self.colors_changed();
    }

    /// Shift the working palette. Overrides and locks are not touched.
    pub fn adjust_colors(&mut self, adj: &ColorAdjustment) {
        if adj.is_noop() {
            return;
        }
        let adjusted = self.palette.adjust_colors(adj).to_vec();
        self.hue.rebase(adjusted.clone());
        self.colors.set_palette(adjusted);
        self.colors_changed();
    }

    pub fn canvas(&self) -> Canvas {
        self.sites.canvas()
    }

    /// Change the canvas size. Sites are not rescaled; only the clip rectangle changes.
    pub fn resize(&mut self, width: u32, height: u32) -> MeshgradResult<()> {
        let canvas = Canvas::new(width, height)?;
        if canvas != self.sites.canvas() {
            self.sites.set_dimensions(canvas);
            self.pipeline.mark_dirty_from(Stage::Cells);
        }
        Ok(())
    }

    pub fn sites(&self) -> &[Point] {
        self.sites.sites()
    }

    /// Current partition; up to date as of the last render or site mutation.
    pub fn cells(&self) -> &[Cell] {
        self.sites.cells()
    }

    pub fn move_site(&mut self, index: usize, x: f64, y: f64) -> bool {
        let moved = self.sites.move_site(index, x, y);
        if moved {
            self.pipeline.mark_dirty_from(Stage::Cells);
        }
        moved
    }

    pub fn find_closest_site_index(&self, x: f64, y: f64) -> Option<usize> {
        self.sites.find_closest_site_index(x, y)
    }

    pub fn get_cell_color(&self, index: usize) -> Color {
        self.colors.get_cell_color(index)
    }

    pub fn set_cell_color(&mut self, index: usize, hex: &str, lock: bool) -> bool {
        let changed = self.colors.set_cell_color(index, hex, lock);
        if changed {
            self.colors_changed();
        }
        changed
    }

    pub fn lock_cell_color(&mut self, index: usize) -> bool {
        let changed = self.colors.lock_cell_color(index);
        if changed {
            self.colors_changed();
        }
        changed
    }

    pub fn unlock_cell_color(&mut self, index: usize) -> bool {
        let changed = self.colors.unlock_cell_color(index);
        if changed {
            self.colors_changed();
        }
        changed
    }

    pub fn toggle_cell_lock(&mut self, index: usize) -> bool {
        if self.colors.is_cell_color_locked(index) {
            self.unlock_cell_color(index)
        } else {
            self.lock_cell_color(index)
        }
    }

    pub fn is_cell_color_locked(&self, index: usize) -> bool {
        self.colors.is_cell_color_locked(index)
    }

    /// Effective color of every cell, in index order.
    pub fn current_palette(&self) -> Vec<Color> {
        self.colors.resolved_colors()
    }

    pub fn palette_hex(&self) -> Vec<String> {
        self.current_palette()
            .into_iter()
            .map(|c| c.hex().to_owned())
            .collect()
    }

    pub fn distortions(&self) -> &DistortionStack {
        &self.distortions
    }

    pub fn set_distortions(&mut self, specs: &[DistortionSpec]) {
        self.set_distortion_stack(DistortionStack::from_specs(specs));
    }

    pub fn set_distortion_stack(&mut self, stack: DistortionStack) {
        if stack == self.distortions {
            return;
        }
        self.distortions = stack;
        if self.distortions.has_active() && !self.interaction.is_dragging() {
            self.interaction.reset();
        }
        self.pipeline.mark_dirty_from(Stage::Ui);
        self.events.push(GradientEvent::DistortionChanged);
    }

    pub fn clear_distortions(&mut self) {
        self.set_distortion_stack(DistortionStack::new());
    }

    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    pub fn set_show_overlay(&mut self, show: bool) {
        if show != self.show_overlay {
            self.show_overlay = show;
            self.pipeline.mark_dirty_from(Stage::Ui);
        }
    }

    pub fn constraints(&self) -> Constraints {
        Constraints {
            blur: LimitState::of(BLUR_LIMITS, self.blur_amount),
            cells: LimitState::of(CELL_LIMITS, self.colors.cell_count()),
        }
    }

    pub fn pointer_phase(&self) -> PointerPhase {
        self.interaction.phase()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let effect = self
            .interaction
            .pointer_move(Point::new(x, y), &self.sites, self.distortions.has_active());
        self.apply_effect(effect);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let effect = self
            .interaction
            .pointer_down(Point::new(x, y), &self.sites, self.distortions.has_active());
        self.apply_effect(effect);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        let effect = self
            .interaction
            .pointer_up(Point::new(x, y), &self.sites, self.distortions.has_active());
        self.apply_effect(effect);
    }

    pub fn pointer_leave(&mut self) {
        let effect = self.interaction.pointer_leave();
        self.apply_effect(effect);
    }

    fn apply_effect(&mut self, effect: InteractionEffect) {
        match effect {
            InteractionEffect::None => {}
            InteractionEffect::Redraw | InteractionEffect::DragStarted { .. } => {
                if self.show_overlay {
                    self.pipeline.mark_dirty_from(Stage::Ui);
                }
            }
            InteractionEffect::MoveSite { site, to } => {
                self.pending_drag = Some((site, to));
            }
            InteractionEffect::DragEnded { .. } => {
                self.flush_drag();
                if self.show_overlay {
                    self.pipeline.mark_dirty_from(Stage::Ui);
                }
            }
            InteractionEffect::RequestColorPick { cell } => {
                let current = self.colors.get_cell_color(cell).hex().to_owned();
                self.events
                    .push(GradientEvent::ColorPickRequested { cell, current });
            }
            InteractionEffect::ToggleLock { cell } => {
                self.toggle_cell_lock(cell);
            }
        }
    }

    /// Apply the newest pending drag target, if any. Called once per render.
    pub fn flush_drag(&mut self) -> bool {
        match self.pending_drag.take() {
            Some((site, to)) => self.move_site(site, to.x, to.y),
            None => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.hue.is_active() || self.wander.is_active()
    }

    /// Start hue rotation with the configured speed and direction.
    pub fn start_hue_animation(&mut self, now_s: f64) {
        let AnimationConfig {
            hue_speed,
            hue_direction,
            ..
        } = self.animation;
        self.start_hue_animation_with(now_s, hue_speed, hue_direction);
    }

    pub fn start_hue_animation_with(&mut self, now_s: f64, speed: f64, direction: HueDirection) {
        self.hue
            .start(self.colors.palette().to_vec(), now_s, speed, direction);
        self.animation_changed();
    }

    /// Returns false when hue rotation was not running.
    pub fn stop_hue_animation(&mut self) -> bool {
        if !self.hue.stop() {
            return false;
        }
        self.palette.set_current(self.colors.palette().to_vec());
        self.animation_changed();
        true
    }

    pub fn start_wander(&mut self, now_s: f64) {
        self.wander
            .start(self.sites.len(), now_s, self.animation.wander_speed);
        self.animation_changed();
    }

    /// Returns false when wander was not running.
    pub fn stop_wander(&mut self) -> bool {
        if !self.wander.stop() {
            return false;
        }
        self.pipeline.mark_dirty_from(Stage::Cells);
        self.animation_changed();
        true
    }

    /// Advance running animations to `now_s` and render one frame.
    pub fn tick(&mut self, now_s: f64) -> MeshgradResult<&Bitmap> {
        if self.wander.is_active() {
            let canvas = self.sites.canvas();
            if self.wander.step(self.sites.sites_mut(), canvas, now_s) {
                self.pipeline.mark_dirty_from(Stage::Cells);
            }
        }
        if let Some(rotated) = self.hue.colors_at(now_s) {
            self.colors.set_palette(rotated);
            self.pipeline.mark_dirty_from(Stage::Bitmap);
        }
        self.render()
    }

    /// Bring the frame up to date with the model.
    pub fn render(&mut self) -> MeshgradResult<&Bitmap> {
        self.render_with(ColorRequest::keep())
    }

    /// Render with explicit color input. Supplying colors, or asking for a fresh palette,
    /// repaints the bitmap stage and rebases a running hue rotation on the new palette.
    pub fn render_with(&mut self, request: ColorRequest<'_>) -> MeshgradResult<&Bitmap> {
        self.flush_drag();
        let recolor = request.colors.is_some() || !request.preserve;
        if recolor {
            self.pipeline.mark_dirty_from(Stage::Bitmap);
            self.events.push(GradientEvent::ColorsChanged);
        }
        let overlay = if self.show_overlay {
            self.interaction.overlay_view(&self.colors)
        } else {
            None
        };
        let animating = self.is_animating();
        let scene = RenderScene {
            sites: &mut self.sites,
            colors: &mut self.colors,
            palette: &mut self.palette,
            distortions: &self.distortions,
            overlay,
            blur_amount: self.blur_amount,
            blur_kind: self.blur_kind,
            harmony: self.harmony,
            animating,
        };
        self.pipeline.render(scene, request)?;
        if recolor {
            self.hue.rebase(self.colors.palette().to_vec());
        }
        Ok(self.pipeline.frame())
    }

    /// The last rendered frame, overlay included.
    pub fn frame(&self) -> &Bitmap {
        self.pipeline.frame()
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// Render and return the image without the interactive overlay.
    pub fn export_bitmap(&mut self) -> MeshgradResult<Bitmap> {
        self.render()?;
        let mut out = Bitmap::new(0, 0);
        self.distortions.apply(self.pipeline.offscreen(), &mut out);
        Ok(out)
    }

    #[tracing::instrument(skip(self))]
    pub fn export_png(&mut self, path: &Path) -> MeshgradResult<()> {
        self.export_bitmap()?.save_png(path)
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GradientEvent> {
        std::mem::take(&mut self.events)
    }

    fn colors_changed(&mut self) {
        self.pipeline.mark_dirty_from(Stage::Bitmap);
        self.events.push(GradientEvent::ColorsChanged);
    }

    fn animation_changed(&mut self) {
        self.pipeline.mark_dirty_from(Stage::Ui);
        self.events.push(GradientEvent::AnimationStateChanged {
            hue: self.hue.is_active(),
            wander: self.wander.is_active(),
        });
    }
}

fn seeded_parts(canvas: Canvas, seed: u64) -> (SiteField, PaletteEngine, CellWander) {
    (
        SiteField::with_seed(canvas, seed),
        PaletteEngine::with_seed(seed.wrapping_add(PALETTE_STREAM)),
        CellWander::with_seed(seed.wrapping_add(WANDER_STREAM)),
    )
}

#[cfg(test)]
#[path = "../tests/unit/gradient.rs"]
mod tests;

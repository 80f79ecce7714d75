//! meshgrad generates "mesh gradient" images.
//!
//! A canvas is partitioned into Voronoi cells, each cell is filled from a color-harmony
//! palette, and the result is blurred and optionally run through a pixel distortion.
//! Cells can be edited one at a time (drag sites, recolor, lock colors) and the image
//! exported as PNG.
//!
//! - Build a [`MeshGradient`] from a [`Canvas`] or a [`GradientConfig`]
//! - Mutate it (generation, colors, distortions, pointer input, animation)
//! - [`MeshGradient::render`] or [`MeshGradient::tick`] to get a [`Bitmap`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod colors;
pub mod config;
/// Blur and pixel-remapping distortions.
pub mod effects;
pub mod gradient;
pub(crate) mod interact;
pub(crate) mod palette;
pub(crate) mod render;
pub(crate) mod sites;

pub use crate::foundation::core::{Canvas, MAX_CANVAS_EDGE, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{MeshgradError, MeshgradResult};

pub use crate::animation::hue::{DEFAULT_HUE_SPEED, HueAnimator, HueDirection};
pub use crate::animation::wander::{CellWander, DEFAULT_WANDER_SPEED};
pub use crate::colors::state::ColorState;
pub use crate::config::{AnimationConfig, BLUR_LIMITS, CELL_LIMITS, GradientConfig, Limits};
pub use crate::effects::blur::BlurKind;
pub use crate::effects::distort::{Distortion, DistortionSpec, DistortionStack};
pub use crate::gradient::{
    Constraints, GenerationOptions, GradientEvent, LimitState, MeshGradient,
};
pub use crate::interact::input::{Interaction, InteractionEffect, PointerPhase};
pub use crate::palette::color::{Color, Hsl, hex_to_hsl, hsl_to_hex};
pub use crate::palette::harmony::{ColorAdjustment, Harmony, PaletteEngine};
pub use crate::render::bitmap::Bitmap;
pub use crate::render::overlay::{
    OverlayView, PILL_HEIGHT, PILL_SEGMENT_WIDTH, PillLayout, PillSegment,
};
pub use crate::render::pipeline::{
    ColorRequest, DirtyFlags, PipelineStats, RenderPipeline, RenderScene, Stage,
};
pub use crate::sites::field::SiteField;
pub use crate::sites::voronoi::{Cell, compute_cells, polygon_area};

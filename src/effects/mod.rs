pub(crate) mod blur;
pub(crate) mod distort;
pub(crate) mod polar;
pub(crate) mod radial;
pub(crate) mod sample;
pub(crate) mod wave;

pub use blur::{BlurKind, MAX_KERNEL_RADIUS, blur_in_place, blur_rgba8};
pub use distort::{Distortion, DistortionSpec, DistortionStack};
pub use polar::{PolarOptions, polar};
pub use radial::{
    BarrelOptions, BulgeOptions, RippleOptions, TwistOptions, barrel, bulge, ripple, twist,
};
pub use wave::{WaveDirection, WaveOptions, wave};

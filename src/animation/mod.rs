pub(crate) mod hue;
pub(crate) mod wander;

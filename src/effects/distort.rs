use crate::effects::polar::{PolarOptions, polar};
use crate::effects::radial::{
    BarrelOptions, BulgeOptions, RippleOptions, TwistOptions, barrel, bulge, ripple, twist,
};
use crate::effects::wave::{WaveOptions, wave};
use crate::render::bitmap::Bitmap;

/// Serialized distortion descriptor: a kind name plus loosely typed options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DistortionSpec {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, alias = "opts")]
    pub params: serde_json::Value,
}

impl DistortionSpec {
    pub fn new(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Distortion {
    /// Identity; a stack headed by this entry is inactive.
    None,
    Polar(PolarOptions),
    Ripple(RippleOptions),
    Wave(WaveOptions),
    Twist(TwistOptions),
    Bulge(BulgeOptions),
    Barrel(BarrelOptions),
    /// Unrecognized kind. Counts as active but renders as a copy.
    Unknown { kind: String },
}

impl Distortion {
    /// Parse a descriptor. Missing or malformed options take their defaults; unknown
    /// kinds are kept as [`Distortion::Unknown`].
    pub fn from_spec(spec: &DistortionSpec) -> Self {
        let kind = spec.kind.trim().to_ascii_lowercase();
        let p = &spec.params;
        match kind.as_str() {
            "" | "none" | "identity" => Self::None,
            "polar" => Self::Polar(PolarOptions::from_params(p)),
            "ripple" => Self::Ripple(RippleOptions::from_params(p)),
            "wave" => Self::Wave(WaveOptions::from_params(p)),
            "twist" | "swirl" => Self::Twist(TwistOptions::from_params(p)),
            "bulge" | "pinch" => Self::Bulge(BulgeOptions::from_params(p)),
            "barrel" | "lens" => Self::Barrel(BarrelOptions::from_params(p)),
            _ => {
                tracing::warn!(kind = %spec.kind, "unknown distortion kind; rendering as identity");
                Self::Unknown {
                    kind: spec.kind.clone(),
                }
            }
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Polar(_) => "polar",
            Self::Ripple(_) => "ripple",
            Self::Wave(_) => "wave",
            Self::Twist(_) => "twist",
            Self::Bulge(_) => "bulge",
            Self::Barrel(_) => "barrel",
            Self::Unknown { kind } => kind,
        }
    }

    pub fn to_spec(&self) -> DistortionSpec {
        let params = match self {
            Self::None | Self::Unknown { .. } => serde_json::Value::Null,
            Self::Polar(o) => serde_json::to_value(o).unwrap_or_default(),
            Self::Ripple(o) => serde_json::to_value(o).unwrap_or_default(),
            Self::Wave(o) => serde_json::to_value(o).unwrap_or_default(),
            Self::Twist(o) => serde_json::to_value(o).unwrap_or_default(),
            Self::Bulge(o) => serde_json::to_value(o).unwrap_or_default(),
            Self::Barrel(o) => serde_json::to_value(o).unwrap_or_default(),
        };
        DistortionSpec::new(self.kind(), params)
    }

    /// Render `src` through this transform into `dst`, which ends up with the same
    /// dimensions as `src`.
    pub fn apply(&self, src: &Bitmap, dst: &mut Bitmap) {
        match self {
            Self::None | Self::Unknown { .. } => dst.copy_from(src),
            Self::Polar(o) => polar(src, dst, o),
            Self::Ripple(o) => ripple(src, dst, o),
            Self::Wave(o) => wave(src, dst, o),
            Self::Twist(o) => twist(src, dst, o),
            Self::Bulge(o) => bulge(src, dst, o),
            Self::Barrel(o) => barrel(src, dst, o),
        }
    }
}

/// Ordered distortion list. Only the first entry is ever rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistortionStack {
    entries: Vec<Distortion>,
}

impl DistortionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: &[DistortionSpec]) -> Self {
        Self {
            entries: specs.iter().map(Distortion::from_spec).collect(),
        }
    }

    pub fn entries(&self) -> &[Distortion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set(&mut self, entries: Vec<Distortion>) {
        self.entries = entries;
    }

    pub fn push(&mut self, d: Distortion) {
        self.entries.push(d);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True when the stack is non-empty and its head is not [`Distortion::None`].
    pub fn has_active(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|d| !matches!(d, Distortion::None))
    }

    pub fn active(&self) -> Option<&Distortion> {
        self.entries.first().filter(|_| self.has_active())
    }

    pub fn to_specs(&self) -> Vec<DistortionSpec> {
        self.entries.iter().map(Distortion::to_spec).collect()
    }

    /// Copy `src` into `dst` through the head entry, or verbatim when nothing is active.
    pub fn apply(&self, src: &Bitmap, dst: &mut Bitmap) {
        match self.active() {
            Some(d) => d.apply(src, dst),
            None => dst.copy_from(src),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/distort.rs"]
mod tests;

use crate::palette::color::Color;

pub const DEFAULT_HUE_SPEED: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueDirection {
    #[default]
    Forward,
    Reverse,
}

impl HueDirection {
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct HueAnimation {
    base_colors: Vec<Color>,
    start_s: f64,
    speed: f64,
    direction: HueDirection,
}

/// Rotates a snapshot of the palette around the hue wheel over time.
///
/// The snapshot is taken at start, so each frame is computed from the original colors
/// rather than accumulated; long runs do not drift.
#[derive(Clone, Debug, Default)]
pub struct HueAnimator {
    state: Option<HueAnimation>,
}

impl HueAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Start (or restart) rotating `base_colors` at `speed` degrees per second.
    pub fn start(
        &mut self,
        base_colors: Vec<Color>,
        now_s: f64,
        speed: f64,
        direction: HueDirection,
    ) {
        let speed = if speed.is_finite() { speed.abs() } else { DEFAULT_HUE_SPEED };
        self.state = Some(HueAnimation {
            base_colors,
            start_s: now_s,
            speed,
            direction,
        });
        tracing::debug!(speed, ?direction, "hue animation started");
    }

    /// Returns false when nothing was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.state.take().is_some();
        if was_active {
            tracing::debug!("hue animation stopped");
        }
        was_active
    }

    /// Replace the snapshot without restarting the clock. No-op when inactive.
    pub fn rebase(&mut self, base_colors: Vec<Color>) {
        if let Some(s) = &mut self.state {
            s.base_colors = base_colors;
        }
    }

    pub fn base_colors(&self) -> Option<&[Color]> {
        self.state.as_ref().map(|s| s.base_colors.as_slice())
    }

    /// Hue offset in degrees at `now_s`.
    pub fn offset_at(&self, now_s: f64) -> Option<f64> {
        let s = self.state.as_ref()?;
        let elapsed = (now_s - s.start_s).max(0.0);
        Some((elapsed * s.speed * s.direction.sign()).rem_euclid(360.0))
    }

    pub fn colors_at(&self, now_s: f64) -> Option<Vec<Color>> {
        let offset = self.offset_at(now_s)?;
        let s = self.state.as_ref()?;
        Some(s.base_colors.iter().map(|c| c.rotated(offset)).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/hue.rs"]
mod tests;

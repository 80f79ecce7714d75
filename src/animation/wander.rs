use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::{Canvas, Point, Vec2};

pub const DEFAULT_WANDER_SPEED: f64 = 40.0;

// Longest step a single tick may integrate; a stalled frame does not teleport sites.
const MAX_STEP_S: f64 = 0.1;

/// Drifts every site along its own velocity, bouncing off the canvas edges.
#[derive(Debug)]
pub struct CellWander {
    velocities: Vec<Vec2>,
    speed: f64,
    last_s: Option<f64>,
    active: bool,
    rng: StdRng,
}

impl Default for CellWander {
    fn default() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }
}

impl CellWander {
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            velocities: Vec::new(),
            speed: DEFAULT_WANDER_SPEED,
            last_s: None,
            active: false,
            rng,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Begin wandering `count` sites at `speed` pixels per second.
    pub fn start(&mut self, count: usize, now_s: f64, speed: f64) {
        self.speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_WANDER_SPEED
        };
        self.velocities.clear();
        self.fit(count);
        self.last_s = Some(now_s);
        self.active = true;
        tracing::debug!(count, speed = self.speed, "cell wander started");
    }

    /// Returns false when nothing was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.last_s = None;
        was_active
    }

    /// Advance `sites` to `now_s`. Returns true when anything moved.
    pub fn step(&mut self, sites: &mut [Point], canvas: Canvas, now_s: f64) -> bool {
        if !self.active || sites.is_empty() {
            return false;
        }
        let dt = match self.last_s {
            Some(last) => (now_s - last).clamp(0.0, MAX_STEP_S),
            None => 0.0,
        };
        self.last_s = Some(now_s);
        if dt <= 0.0 {
            return false;
        }
        self.fit(sites.len());

        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        for (p, v) in sites.iter_mut().zip(self.velocities.iter_mut()) {
            let (x, vx) = reflect(p.x + v.x * dt, v.x, w);
            let (y, vy) = reflect(p.y + v.y * dt, v.y, h);
            *p = Point::new(x, y);
            *v = Vec2::new(vx, vy);
        }
        true
    }

    /// Keep one velocity per site when the count changes mid-run.
    fn fit(&mut self, count: usize) {
        self.velocities.truncate(count);
        while self.velocities.len() < count {
            let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
            let (sin, cos) = angle.sin_cos();
            self.velocities.push(Vec2::new(cos * self.speed, sin * self.speed));
        }
    }
}

fn reflect(pos: f64, vel: f64, extent: f64) -> (f64, f64) {
    if pos < 0.0 {
        ((-pos).min(extent), vel.abs())
    } else if pos > extent {
        ((2.0 * extent - pos).max(0.0), -vel.abs())
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/wander.rs"]
mod tests;

//! Single particle motion.

/// Pointer push is strongest here and fades to nothing at the repulse radius.
const REPULSE_VELOCITY: f64 = 100.0;

/// Largest push applied in one frame.
const REPULSE_MAX_SHIFT: f64 = 50.0;

/// State for one particle, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Horizontal direction, in `-0.5..0.5`.
    pub vx: f64,
    /// Vertical direction, in `-0.5..0.5`.
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    /// Place a particle at a random position with a random drift direction.
    pub fn spawn(rng: &mut fastrand::Rng, width: f64, height: f64, radius: f64) -> Self {
        Self {
            x: rng.f64() * width,
            y: rng.f64() * height,
            vx: rng.f64() - 0.5,
            vy: rng.f64() - 0.5,
            radius,
        }
    }

    /// Move by `frames` 60 Hz frames at `speed`, wrapping at the canvas edges.
    pub fn drift(&mut self, speed: f64, frames: f64, width: f64, height: f64) {
        let per_frame = speed / 2.0;
        self.x += self.vx * per_frame * frames;
        self.y += self.vy * per_frame * frames;
        self.wrap(width, height);
    }

    /// Push away from the pointer at (`px`, `py`) if within `radius`.
    pub fn repulse(&mut self, px: f64, py: f64, radius: f64, frames: f64, width: f64, height: f64) {
        let dx = self.x - px;
        let dy = self.y - py;
        let dist = dx.hypot(dy);
        if dist == 0.0 || dist >= radius {
            return;
        }

        let falloff = 1.0 - (dist / radius).powi(2);
        let shift = (falloff * REPULSE_VELOCITY).clamp(0.0, REPULSE_MAX_SHIFT) * frames;
        self.x += dx / dist * shift;
        self.y += dy / dist * shift;
        self.wrap(width, height);
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    /// Re-enter from the opposite edge once fully outside the canvas.
    fn wrap(&mut self, width: f64, height: f64) {
        let r = self.radius;
        if self.x - r > width {
            self.x = -r;
        } else if self.x + r < 0.0 {
            self.x = width + r;
        }
        if self.y - r > height {
            self.y = -r;
        } else if self.y + r < 0.0 {
            self.y = height + r;
        }
    }
}

//! Spin angles of the scene hierarchies

use log::debug;

/// Degrees each hierarchy root turns per animation frame at speed 1.0
pub const SPIN_RATES: [f32; 5] = [1.0, 1.3, 1.6, 1.9, 2.1];

/// Multiplier applied by a single speed-up or slow-down step
pub const SPEED_STEP: f32 = 1.2;

/// Frame-rate independent spin state
///
/// Angles advance by `rate * speed` degrees per animation frame, where an
/// animation frame is `1 / frames_per_second` seconds of wall time.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub angles: [f32; 5],
    pub speed: f32,
    pub running: bool,
    frames_per_second: f32,
}

impl Animation {
    pub fn new(frames_per_second: f32) -> Self {
        Self {
            angles: [0.0; 5],
            speed: 1.0,
            running: true,
            frames_per_second,
        }
    }

    /// Advances every angle by the time elapsed, when running
    pub fn advance(&mut self, dt_seconds: f32) {
        if !self.running || dt_seconds <= 0.0 {
            return;
        }

        let frames = dt_seconds * self.frames_per_second;
        for (angle, rate) in self.angles.iter_mut().zip(SPIN_RATES) {
            // Wrap to keep precision over long sessions
            *angle = (*angle + rate * self.speed * frames) % 360.0;
        }
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
        debug!("animation running: {}", self.running);
    }

    pub fn speed_up(&mut self) {
        self.speed *= SPEED_STEP;
        debug!("animation speed: {:.3}", self.speed);
    }

    pub fn slow_down(&mut self) {
        self.speed /= SPEED_STEP;
        debug!("animation speed: {:.3}", self.speed);
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(30.0)
    }
}

// Exponential smoothing of the raw fingertip position. Suppresses
// per-frame tracker jitter without unbounded lag.

use crate::types::Position;

pub struct Smoother {
    alpha: f32,
    // Seeded at the origin, so the very first real sample produces one
    // large jump toward the true position. Known startup artifact, kept.
    prev: Position,
}

impl Smoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            prev: Position::new(0, 0),
        }
    }

    /// `emitted = prev + alpha * (raw - prev)`, per axis, truncated to
    /// integer pixels. The emitted position becomes the new state.
    pub fn smooth(&mut self, raw: Position) -> Position {
        let x = self.prev.x + (self.alpha * (raw.x - self.prev.x) as f32) as i32;
        let y = self.prev.y + (self.alpha * (raw.y - self.prev.y) as f32) as i32;
        self.prev = Position::new(x, y);
        self.prev
    }
}

// Session state owned by the frame loop: the current ink color and the
// brush thickness. Components receive only the fields they need.

use crate::config::{BRUSH_MAX, BRUSH_MIN};
use crate::types::Rgb;

pub struct Session {
    pub color: Rgb,
    brush: u32,
}

impl Session {
    pub fn new(color: Rgb, brush: u32) -> Self {
        Self {
            color,
            brush: brush.clamp(BRUSH_MIN, BRUSH_MAX),
        }
    }

    pub fn brush(&self) -> u32 {
        self.brush
    }

    /// Grow the brush by one, silently clamped at the upper bound.
    pub fn brush_up(&mut self) {
        self.brush = (self.brush + 1).min(BRUSH_MAX);
    }

    /// Shrink the brush by one, silently clamped at the lower bound.
    pub fn brush_down(&mut self) {
        self.brush = self.brush.saturating_sub(1).max(BRUSH_MIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_clamp_at_twenty() {
        let mut session = Session::new(Rgb::new(255, 0, 0), 2);
        for _ in 0..6 {
            session.brush_up();
        }
        assert_eq!(session.brush(), 8);

        for _ in 0..20 {
            session.brush_up();
        }
        assert_eq!(session.brush(), 20);
    }

    #[test]
    fn decrements_clamp_at_one() {
        let mut session = Session::new(Rgb::new(255, 0, 0), 3);
        for _ in 0..10 {
            session.brush_down();
        }
        assert_eq!(session.brush(), 1);
    }

    #[test]
    fn out_of_range_start_is_clamped() {
        assert_eq!(Session::new(Rgb::new(0, 0, 0), 99).brush(), 20);
        assert_eq!(Session::new(Rgb::new(0, 0, 0), 0).brush(), 1);
    }
}

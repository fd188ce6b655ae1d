// On-canvas buttons: three fixed rectangles in a band across the top of
// the frame, sharing one debounce timer.

use std::time::{Duration, Instant};

use crate::draw;
use crate::types::{FrameBuffer, Position, Rgb};

/// Rows above this are the button band. While the cursor is inside the
/// band no drawing sample is appended, whatever the pen state.
pub const BAND_HEIGHT: i32 = 65;

// Button rectangles, x/y bounds inclusive.
const CLEAR_RECT: (i32, i32, i32, i32) = (20, 10, 140, 60);
const COLOR_RECT: (i32, i32, i32, i32) = (160, 10, 260, 60);
const SAVE_RECT: (i32, i32, i32, i32) = (500, 10, 620, 60);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Clear,
    PickColor,
    Save,
}

/// Which button, if any, lies under a cursor position.
pub fn hit_region(pos: Position) -> Option<ButtonAction> {
    if pos.y >= BAND_HEIGHT {
        return None;
    }
    let within = |r: (i32, i32, i32, i32)| r.0 <= pos.x && pos.x <= r.2;
    if within(CLEAR_RECT) {
        Some(ButtonAction::Clear)
    } else if within(COLOR_RECT) {
        Some(ButtonAction::PickColor)
    } else if within(SAVE_RECT) {
        Some(ButtonAction::Save)
    } else {
        None
    }
}

pub fn in_band(pos: Position) -> bool {
    pos.y < BAND_HEIGHT
}

/// One timer gates all three buttons. Moving between different buttons
/// inside the cooldown window is ignored too; that asymmetry is the
/// intended guard against double activation from tracking jitter.
pub struct ButtonBar {
    cooldown: Duration,
    last_fired: Instant,
}

impl ButtonBar {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            // Buttons start cold for one cooldown window.
            last_fired: Instant::now(),
        }
    }

    /// At most one action per press: the hit button, if the shared
    /// cooldown window has passed. Firing re-arms the window for all
    /// three buttons.
    pub fn dispatch(&mut self, pos: Position, now: Instant) -> Option<ButtonAction> {
        if now.duration_since(self.last_fired) <= self.cooldown {
            return None;
        }
        let action = hit_region(pos)?;
        self.last_fired = now;
        Some(action)
    }
}

/// Draw the button band onto the tracking frame: the three buttons plus
/// the brush-size readout. The color button is filled with the current
/// ink so the band doubles as a color indicator.
pub fn render_band(fb: &mut FrameBuffer, current_color: Rgb, brush: u32) {
    let white = 0x00FF_FFFF;
    let black = 0x0000_0000;

    draw::fill_rect(fb, CLEAR_RECT.0, CLEAR_RECT.1, CLEAR_RECT.2, CLEAR_RECT.3, 0x0032_3232);
    draw::draw_text(fb, CLEAR_RECT.0 + 20, CLEAR_RECT.1 + 18, "CLEAR", white, 2);

    draw::fill_rect(
        fb,
        COLOR_RECT.0,
        COLOR_RECT.1,
        COLOR_RECT.2,
        COLOR_RECT.3,
        current_color.packed(),
    );
    // Flip the label to black on bright inks so it stays readable.
    let label = if current_color.channel_sum() < 382 { white } else { black };
    draw::draw_text(fb, COLOR_RECT.0 + 15, COLOR_RECT.1 + 18, "COLOR", label, 2);

    draw::fill_rect(fb, SAVE_RECT.0, SAVE_RECT.1, SAVE_RECT.2, SAVE_RECT.3, 0x0064_6464);
    draw::draw_text(fb, SAVE_RECT.0 + 26, SAVE_RECT.1 + 18, "SAVE", white, 2);

    let size = format!("SIZE: {brush}");
    draw::draw_text(fb, 280, 25, &size, 0x0032_3232, 2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn regions_map_to_their_buttons() {
        assert_eq!(hit_region(at(20, 30)), Some(ButtonAction::Clear));
        assert_eq!(hit_region(at(140, 30)), Some(ButtonAction::Clear));
        assert_eq!(hit_region(at(160, 30)), Some(ButtonAction::PickColor));
        assert_eq!(hit_region(at(260, 30)), Some(ButtonAction::PickColor));
        assert_eq!(hit_region(at(500, 30)), Some(ButtonAction::Save));
        assert_eq!(hit_region(at(620, 30)), Some(ButtonAction::Save));
    }

    #[test]
    fn band_gaps_hit_nothing() {
        assert_eq!(hit_region(at(10, 30)), None);
        assert_eq!(hit_region(at(150, 30)), None);
        assert_eq!(hit_region(at(400, 30)), None);
        assert_eq!(hit_region(at(700, 30)), None);
    }

    #[test]
    fn below_the_band_nothing_is_a_button() {
        assert_eq!(hit_region(at(80, BAND_HEIGHT)), None);
        assert!(!in_band(at(80, BAND_HEIGHT)));
        assert!(in_band(at(80, BAND_HEIGHT - 1)));
    }

    #[test]
    fn two_hits_inside_the_window_fire_once() {
        let cooldown = Duration::from_secs(1);
        let mut bar = ButtonBar::new(cooldown);
        let t0 = Instant::now();

        let first = bar.dispatch(at(80, 30), t0 + Duration::from_secs(2));
        assert_eq!(first, Some(ButtonAction::Clear));

        let second = bar.dispatch(at(80, 30), t0 + Duration::from_millis(2300));
        assert_eq!(second, None);
    }

    #[test]
    fn the_window_is_shared_across_buttons() {
        let mut bar = ButtonBar::new(Duration::from_secs(1));
        let t0 = Instant::now();

        assert!(bar.dispatch(at(80, 30), t0 + Duration::from_secs(2)).is_some());
        // A different button inside the same window is ignored too.
        assert_eq!(bar.dispatch(at(200, 30), t0 + Duration::from_millis(2500)), None);
        // And accepted once the window has passed.
        assert_eq!(
            bar.dispatch(at(200, 30), t0 + Duration::from_millis(3100)),
            Some(ButtonAction::PickColor)
        );
    }

    #[test]
    fn hits_separated_by_more_than_the_cooldown_both_fire() {
        let mut bar = ButtonBar::new(Duration::from_secs(1));
        let t0 = Instant::now();

        assert!(bar.dispatch(at(550, 30), t0 + Duration::from_secs(2)).is_some());
        assert!(bar.dispatch(at(550, 30), t0 + Duration::from_secs(4)).is_some());
    }
}

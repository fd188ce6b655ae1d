// Turns the retained stroke history into raster output. The entire
// history of every color is replayed each frame; the cost is bounded by
// the per-color capacity, and the replay keeps the tracking frame, the
// overlay and the persistent canvas coherent through clears and color
// switches.

use crate::draw;
use crate::strokes::StrokeStore;
use crate::types::{FrameBuffer, Sample};

/// Replay every color's history into one raster. A segment is drawn only
/// between two consecutive non-gap entries.
pub fn render(store: &StrokeStore, thickness: u32, target: &mut FrameBuffer) {
    for (color, history) in store.iter() {
        let packed = color.packed();
        for i in 1..history.len() {
            if let (Sample::Point(a), Sample::Point(b)) = (history[i - 1], history[i]) {
                draw::draw_line_thick(target, a, b, packed, thickness);
            }
        }
    }
}

/// Per-frame compositing pass: the same segments land on the live
/// tracking frame, the display overlay and the persistent canvas.
pub fn composite(
    store: &StrokeStore,
    thickness: u32,
    frame: &mut FrameBuffer,
    overlay: &mut FrameBuffer,
    persistent: &mut FrameBuffer,
) {
    render(store, thickness, frame);
    render(store, thickness, overlay);
    render(store, thickness, persistent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Rgb};

    const RED: Rgb = Rgb::new(255, 0, 0);
    const WHITE: u32 = 0x00FF_FFFF;

    fn pixel(fb: &FrameBuffer, x: usize, y: usize) -> u32 {
        fb.pixels[y * fb.width + x]
    }

    fn scenario_store() -> StrokeStore {
        let mut store = StrokeStore::new(16);
        store.append(RED, Sample::Point(Position::new(10, 10)));
        store.append(RED, Sample::Point(Position::new(20, 20)));
        store.append(RED, Sample::Gap);
        store.append(RED, Sample::Point(Position::new(30, 30)));
        store
    }

    #[test]
    fn gap_splits_the_stroke_into_one_segment() {
        let mut target = FrameBuffer::filled(64, 64, WHITE);
        render(&scenario_store(), 2, &mut target);

        // The (10,10)-(20,20) segment is inked...
        assert_eq!(pixel(&target, 10, 10), RED.packed());
        assert_eq!(pixel(&target, 15, 15), RED.packed());
        assert_eq!(pixel(&target, 20, 20), RED.packed());
        // ...and nothing touches the point after the gap.
        assert_eq!(pixel(&target, 30, 30), WHITE);
        assert_eq!(pixel(&target, 25, 25), WHITE);
    }

    #[test]
    fn compositing_twice_leaves_the_raster_unchanged() {
        let store = scenario_store();
        let mut once = FrameBuffer::filled(64, 64, WHITE);
        render(&store, 2, &mut once);

        let mut twice = once.clone();
        render(&store, 2, &mut twice);
        assert_eq!(once.pixels, twice.pixels);
    }

    #[test]
    fn all_three_targets_receive_the_same_ink() {
        let store = scenario_store();
        let mut frame = FrameBuffer::filled(64, 64, 0x0020_4060);
        let mut overlay = FrameBuffer::filled(64, 64, WHITE);
        let mut persistent = FrameBuffer::filled(64, 64, WHITE);

        composite(&store, 2, &mut frame, &mut overlay, &mut persistent);

        assert_eq!(pixel(&frame, 15, 15), RED.packed());
        assert_eq!(pixel(&overlay, 15, 15), RED.packed());
        assert_eq!(pixel(&persistent, 15, 15), RED.packed());
        assert_eq!(overlay.pixels, persistent.pixels);
    }

    #[test]
    fn an_empty_store_draws_nothing() {
        let store = StrokeStore::new(16);
        let mut target = FrameBuffer::filled(32, 32, WHITE);
        render(&store, 2, &mut target);
        assert!(target.pixels.iter().all(|&p| p == WHITE));
    }

    #[test]
    fn consecutive_gaps_draw_nothing() {
        let mut store = StrokeStore::new(16);
        store.append(RED, Sample::Gap);
        store.append(RED, Sample::Gap);
        store.append(RED, Sample::Point(Position::new(5, 5)));
        store.append(RED, Sample::Gap);

        let mut target = FrameBuffer::filled(32, 32, WHITE);
        render(&store, 3, &mut target);
        assert!(target.pixels.iter().all(|&p| p == WHITE));
    }
}

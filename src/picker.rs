// The modal color dialog: a small dedicated window with the basic
// swatches. Blocks the frame loop until the user clicks a swatch or
// cancels, so no frames are processed and no strokes appended while it
// is open.

use crate::draw::{self, Drawer};
use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

const PALETTE: [(&str, Rgb); 8] = [
    ("RED", Rgb::new(255, 0, 0)),
    ("GREEN", Rgb::new(0, 255, 0)),
    ("BLUE", Rgb::new(0, 0, 255)),
    ("YELLOW", Rgb::new(255, 255, 0)),
    ("MAGENTA", Rgb::new(255, 0, 255)),
    ("CYAN", Rgb::new(0, 255, 255)),
    ("BLACK", Rgb::new(0, 0, 0)),
    ("WHITE", Rgb::new(255, 255, 255)),
];

const DIALOG_WIDTH: usize = 240;
const ROW_HEIGHT: usize = 40;

/// The swatch under a dialog-window coordinate.
fn swatch_at(x: usize, y: usize) -> Option<Rgb> {
    if x >= DIALOG_WIDTH {
        return None;
    }
    PALETTE.get(y / ROW_HEIGHT).map(|&(_, color)| color)
}

fn render_palette(current: Rgb) -> FrameBuffer {
    let height = PALETTE.len() * ROW_HEIGHT;
    let mut fb = FrameBuffer::filled(DIALOG_WIDTH, height, 0x0020_2020);

    for (row, &(name, color)) in PALETTE.iter().enumerate() {
        let y0 = (row * ROW_HEIGHT) as i32;
        let y1 = y0 + ROW_HEIGHT as i32 - 1;
        draw::fill_rect(&mut fb, 0, y0, DIALOG_WIDTH as i32 - 1, y1, color.packed());

        let label = if color.channel_sum() < 382 { 0x00FF_FFFF } else { 0x0000_0000 };
        draw::draw_text(&mut fb, 34, y0 + 13, name, label, 2);

        // Mark the row of the current ink.
        if color == current {
            draw::fill_rect(&mut fb, 8, y0 + 14, 20, y0 + 26, label);
        }
    }
    fb
}

/// Open the palette with the current color and block until a choice is
/// made. `Ok(None)` means cancelled (Escape or window closed); the caller
/// leaves the color unchanged.
pub fn pick(current: Rgb) -> Result<Option<Rgb>, Error> {
    let fb = render_palette(current);
    let mut dialog = Drawer::new("Choose Color", fb.width, fb.height)?;

    let mut was_down = false;
    while dialog.is_open() {
        dialog.present(&fb)?;

        if dialog.escape_pressed() {
            return Ok(None);
        }

        // Select on the press edge, not while held.
        let down = dialog.left_mouse_down();
        if down && !was_down {
            if let Some((mx, my)) = dialog.mouse_pos() {
                if let Some(color) = swatch_at(mx, my) {
                    return Ok(Some(color));
                }
            }
        }
        was_down = down;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_to_palette_entries() {
        assert_eq!(swatch_at(10, 0), Some(Rgb::new(255, 0, 0)));
        assert_eq!(swatch_at(10, 39), Some(Rgb::new(255, 0, 0)));
        assert_eq!(swatch_at(10, 40), Some(Rgb::new(0, 255, 0)));
        assert_eq!(swatch_at(239, 7 * 40 + 5), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn clicks_outside_the_palette_select_nothing() {
        assert_eq!(swatch_at(10, 8 * 40), None);
        assert_eq!(swatch_at(240, 10), None);
    }

    #[test]
    fn palette_render_fills_the_swatch_rows() {
        let fb = render_palette(Rgb::new(255, 0, 0));
        assert_eq!(fb.width, DIALOG_WIDTH);
        assert_eq!(fb.height, PALETTE.len() * ROW_HEIGHT);
        // A pixel well inside the GREEN row carries the green ink.
        let idx = (ROW_HEIGHT + 5) * fb.width + 200;
        assert_eq!(fb.pixels[idx], Rgb::new(0, 255, 0).packed());
    }
}

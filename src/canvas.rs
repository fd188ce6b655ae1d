// The persistent canvas: the one authoritative raster that accumulates
// every committed stroke between clears and is what gets saved to disk.

use std::path::PathBuf;

use image::RgbImage;

use crate::error::Error;
use crate::types::FrameBuffer;

pub struct PersistentCanvas {
    buffer: FrameBuffer,
    background: u32,
}

impl PersistentCanvas {
    pub fn new(width: usize, height: usize, background: u32) -> Self {
        Self {
            buffer: FrameBuffer::filled(width, height, background),
            background,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Reset every pixel to the uniform background.
    pub fn clear(&mut self) {
        self.buffer.fill(self.background);
    }

    /// Copy the current canvas into the per-frame overlay buffer.
    pub fn snapshot_into(&self, overlay: &mut FrameBuffer) {
        overlay.copy_from(&self.buffer);
    }

    /// PNG-encode the canvas, unmodified, into the working directory.
    /// The name embeds the save time, so repeated saves never overwrite
    /// each other.
    pub fn save(&self, epoch_seconds: u64) -> Result<PathBuf, Error> {
        let path = PathBuf::from(save_filename(epoch_seconds));
        let mut img = RgbImage::new(self.buffer.width as u32, self.buffer.height as u32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let px = self.buffer.pixels[(y as usize) * self.buffer.width + (x as usize)];
            *pixel = image::Rgb([
                ((px >> 16) & 0xFF) as u8,
                ((px >> 8) & 0xFF) as u8,
                (px & 0xFF) as u8,
            ]);
        }
        img.save(&path)
            .map_err(|e| Error::CanvasSave(format!("{}: {e}", path.display())))?;
        Ok(path)
    }
}

pub fn save_filename(epoch_seconds: u64) -> String {
    format!("air_canvas_{epoch_seconds}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_embeds_the_epoch_timestamp() {
        assert_eq!(save_filename(1754000000), "air_canvas_1754000000.png");
        assert_ne!(save_filename(1), save_filename(2));
    }

    #[test]
    fn clear_restores_a_uniform_background_and_is_idempotent() {
        let mut canvas = PersistentCanvas::new(8, 8, 0x00FF_FFFF);
        canvas.buffer_mut().pixels[10] = 0x00FF_0000;

        canvas.clear();
        assert!(canvas.buffer.pixels.iter().all(|&p| p == 0x00FF_FFFF));

        let once = canvas.buffer.pixels.clone();
        canvas.clear();
        assert_eq!(canvas.buffer.pixels, once);
    }

    #[test]
    fn snapshot_copies_the_canvas_into_the_overlay() {
        let mut canvas = PersistentCanvas::new(4, 4, 0);
        canvas.buffer_mut().pixels[5] = 0x1234;

        let mut overlay = FrameBuffer::filled(4, 4, 0x00FF_FFFF);
        canvas.snapshot_into(&mut overlay);
        assert_eq!(overlay.pixels, canvas.buffer.pixels);
    }
}

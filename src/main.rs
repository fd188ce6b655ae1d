// Air canvas: draw in the air with your index finger.
// • Two windows: "Air Canvas" shows the accumulated drawing, "Tracking"
//   shows the mirrored camera feed with the button band and cursor.
// • Separate index finger and thumb to draw; pinch them to lift the pen.
// • Hover the top band to hit CLEAR / COLOR / SAVE (1 s shared cooldown).
// • Keys: + / - change brush size, Q or ESC quits.

mod buttons;
mod camera;
mod canvas;
mod compositor;
mod config;
mod draw;
mod error;
mod gesture;
mod logging;
mod picker;
mod session;
mod smoother;
mod strokes;
mod tracker;
mod types;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use buttons::{ButtonAction, ButtonBar};
use camera::CameraCapture;
use canvas::PersistentCanvas;
use config::Config;
use draw::Drawer;
use error::Error;
use gesture::{GestureClassifier, PenState};
use session::Session;
use smoother::Smoother;
use strokes::StrokeStore;
use tracker::HandTracker;
use types::{FrameBuffer, Sample};

fn main() -> Result<(), Error> {
    logging::init();
    let cfg = Config::from_env();

    /* --- Camera + tracker + windows --- */
    let mut cam = CameraCapture::new(cfg.camera_index, cfg.frame_width, cfg.frame_height)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    tracing::info!(width = w, height = h, "camera stream open");

    let mut tracker = HandTracker::new(cfg.min_detection_confidence)?;
    let mut tracking_view = Drawer::new("Tracking", w, h)?;
    let mut canvas_view = Drawer::new("Air Canvas", w, h)?;

    /* --- Pipeline state, all owned here --- */
    let mut session = Session::new(cfg.initial_color, cfg.initial_brush);
    let mut smoother = Smoother::new(cfg.smoothing);
    let classifier = GestureClassifier::new(cfg.pinch_threshold);
    let mut bar = ButtonBar::new(cfg.button_cooldown);
    let mut store = StrokeStore::new(cfg.history_capacity);
    let mut persistent = PersistentCanvas::new(w, h, config::BACKGROUND);
    let mut overlay = FrameBuffer::filled(w, h, config::BACKGROUND);

    /* --- FPS bookkeeping --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while tracking_view.is_open() && canvas_view.is_open() {
        /* 1) Acquire one mirrored frame. A dead stream ends the run
              gracefully; it is not retried. */
        let mut frame = match cam.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "camera stream ended");
                break;
            }
        };

        /* 2) The overlay starts as a snapshot of the persistent canvas;
              this frame's strokes land on top of it below. */
        persistent.snapshot_into(&mut overlay);

        /* 3) Hands for this frame. Zero hands is ordinary; a broken
              tracker ends the run like a dead camera. */
        let detections = match tracker.detect(&frame) {
            Ok(detections) => detections,
            Err(e) => {
                tracing::error!(error = %e, "hand tracker failed");
                break;
            }
        };

        /* 4) Button band over the tracking view. */
        buttons::render_band(&mut frame, session.color, session.brush());

        /* 5) Feed the stroke store (or the button bar). */
        if detections.is_empty() {
            // Implicit pen-up: break the current color's stroke.
            store.append(session.color, Sample::Gap);
        } else {
            for hand in &detections {
                let raw_tip = hand.index_tip.to_pixels(w, h);
                let cursor = smoother.smooth(raw_tip);
                draw::fill_circle(&mut frame, cursor.x, cursor.y, 8, 0x0000_0000);

                // Pinch is judged on the raw landmarks, not the smoothed cursor.
                let pen = classifier.classify(raw_tip, hand.thumb_tip.to_pixels(w, h));

                if buttons::in_band(cursor) {
                    // Inside the band nothing is appended, whatever the pen state.
                    if let Some(action) = bar.dispatch(cursor, Instant::now()) {
                        match action {
                            ButtonAction::Clear => {
                                store.clear();
                                persistent.clear();
                                tracing::info!("canvas cleared");
                            }
                            // Modal: the loop is suspended until the dialog returns.
                            ButtonAction::PickColor => match picker::pick(session.color) {
                                Ok(Some(color)) => {
                                    session.color = color;
                                    tracing::info!(?color, "ink color changed");
                                }
                                Ok(None) => {}
                                Err(e) => tracing::warn!(error = %e, "color dialog failed"),
                            },
                            ButtonAction::Save => {
                                let epoch = SystemTime::now()
                                    .duration_since(UNIX_EPOCH)
                                    .map(|d| d.as_secs())
                                    .unwrap_or_default();
                                // A failed save is reported, never fatal.
                                match persistent.save(epoch) {
                                    Ok(path) => {
                                        tracing::info!(path = %path.display(), "canvas saved");
                                    }
                                    Err(e) => tracing::error!(error = %e, "canvas save failed"),
                                }
                            }
                        }
                    }
                } else if pen == PenState::Down {
                    store.append(session.color, Sample::Point(cursor));
                } else {
                    store.append(session.color, Sample::Gap);
                }
            }
        }

        /* 6) Replay the stroke history into all three rasters. */
        compositor::composite(
            &store,
            session.brush(),
            &mut frame,
            &mut overlay,
            persistent.buffer_mut(),
        );

        /* 7) HUD + present both windows. */
        draw::draw_text(&mut frame, 8, h as i32 - 16, &hud_fps_text, 0x00FF_FFFF, 1);
        canvas_view.present(&overlay)?;
        tracking_view.present(&frame)?;

        /* 8) Keyboard, checked once per frame after the frame completed. */
        if tracking_view.quit_pressed() || canvas_view.quit_pressed() {
            break;
        }
        if tracking_view.brush_up_pressed() || canvas_view.brush_up_pressed() {
            session.brush_up();
        }
        if tracking_view.brush_down_pressed() || canvas_view.brush_down_pressed() {
            session.brush_down();
        }

        /* 9) FPS counter, once per second. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::debug!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    // Camera stream, subprocess and windows are released on drop.
    Ok(())
}

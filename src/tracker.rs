//! Hand tracking glue: a MediaPipe hand landmarker driven through a
//! Python subprocess.
//!
//! Per frame we write a small binary header (width, height, channels as
//! LE u32) followed by raw RGB24 bytes to the child's stdin, and read one
//! JSON line of detections back. The child is expected at
//! `scripts/hand_detect.py`, run under the project's virtualenv python
//! (`python3 -m venv .venv && .venv/bin/pip install mediapipe numpy`).

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::Deserialize;

use crate::error::Error;
use crate::types::{FrameBuffer, Position};

/// MediaPipe hand landmark indices (the subset this pipeline reads).
pub const INDEX_FINGER_TIP: usize = 8;
pub const THUMB_TIP: usize = 4;

/// A landmark in normalized image coordinates, `[0,1]` on each axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    /// Convert to pixel space for a `width x height` frame.
    pub fn to_pixels(self, width: usize, height: usize) -> Position {
        Position::new(
            (self.x * width as f32) as i32,
            (self.y * height as f32) as i32,
        )
    }
}

/// One detected hand, reduced to the two landmarks the gesture needs.
#[derive(Clone, Copy, Debug)]
pub struct HandDetection {
    pub index_tip: Landmark,
    pub thumb_tip: Landmark,
}

/// JSON structures for parsing the subprocess output.
#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionJson {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HandTracker {
    process: Child,
    stdout_reader: BufReader<std::process::ChildStdout>,
    /// Detections scoring below this are dropped.
    min_confidence: f32,
}

impl HandTracker {
    /// Start the detector subprocess and wait for its READY handshake.
    pub fn new(min_confidence: f32) -> Result<Self, Error> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::TrackerInit(format!("Resolve working dir: {e}")))?;
        let script_path = cwd.join("scripts/hand_detect.py");
        let venv_python = cwd.join(".venv/bin/python");

        if !script_path.exists() {
            return Err(Error::TrackerInit(format!(
                "detector script not found at {}",
                script_path.display()
            )));
        }
        if !venv_python.exists() {
            return Err(Error::TrackerInit(
                "virtualenv not found; run: python3 -m venv .venv && .venv/bin/pip install mediapipe numpy".into(),
            ));
        }

        tracing::info!("starting hand detector subprocess");

        let mut process = Command::new(&venv_python)
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::TrackerInit(format!("Spawn detector: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::TrackerInit("detector stdout unavailable".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        // The child prints READY once the landmarker model is loaded.
        let mut ready_line = String::new();
        stdout_reader
            .read_line(&mut ready_line)
            .map_err(|e| Error::TrackerInit(format!("Read handshake: {e}")))?;
        if ready_line.trim() != "READY" {
            return Err(Error::TrackerInit(format!(
                "detector did not signal ready, got: {ready_line}"
            )));
        }

        tracing::info!("hand detector ready");

        Ok(Self {
            process,
            stdout_reader,
            min_confidence,
        })
    }

    /// Detect hands in one frame. Zero hands is an ordinary result, not an
    /// error; protocol failures are errors and end the run.
    pub fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<HandDetection>, Error> {
        let rgb = frame_to_rgb24(frame);

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| Error::TrackerProtocol("detector stdin unavailable".into()))?;

        let send = |e: std::io::Error| Error::TrackerProtocol(format!("Send frame: {e}"));
        stdin.write_all(&(frame.width as u32).to_le_bytes()).map_err(send)?;
        stdin.write_all(&(frame.height as u32).to_le_bytes()).map_err(send)?;
        stdin.write_all(&3u32.to_le_bytes()).map_err(send)?;
        stdin.write_all(&rgb).map_err(send)?;
        stdin.flush().map_err(send)?;

        let mut response = String::new();
        self.stdout_reader
            .read_line(&mut response)
            .map_err(|e| Error::TrackerProtocol(format!("Read detections: {e}")))?;

        parse_detections(&response, self.min_confidence)
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        // Kill the Python subprocess when the tracker is dropped
        let _ = self.process.kill();
    }
}

/// Flatten a packed 0x00RRGGBB buffer into the RGB24 byte stream the
/// detector consumes.
fn frame_to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.pixels.len() * 3);
    for px in &frame.pixels {
        out.push(((px >> 16) & 0xFF) as u8);
        out.push(((px >> 8) & 0xFF) as u8);
        out.push((px & 0xFF) as u8);
    }
    out
}

fn parse_detections(line: &str, min_confidence: f32) -> Result<Vec<HandDetection>, Error> {
    let result: DetectionJson = serde_json::from_str(line)
        .map_err(|e| Error::TrackerProtocol(format!("Parse detections: {e} in {line:?}")))?;

    if let Some(error) = result.error {
        tracing::warn!(%error, "detector reported a per-frame error");
        return Ok(Vec::new());
    }

    let mut hands = Vec::new();
    for hand in result.hands {
        if hand.score < min_confidence {
            continue;
        }
        if hand.landmarks.len() != 21 {
            tracing::warn!(got = hand.landmarks.len(), "expected 21 landmarks");
            continue;
        }
        let lm = |i: usize| Landmark {
            x: hand.landmarks[i].x,
            y: hand.landmarks[i].y,
        };
        hands.push(HandDetection {
            index_tip: lm(INDEX_FINGER_TIP),
            thumb_tip: lm(THUMB_TIP),
        });
    }
    Ok(hands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection_line(score: f32) -> String {
        let landmarks: Vec<String> = (0..21)
            .map(|i| format!(r#"{{"x":{},"y":{},"z":0.0}}"#, i as f32 * 0.01, 0.5))
            .collect();
        format!(
            r#"{{"hands":[{{"handedness":"Right","score":{score},"landmarks":[{}]}}]}}"#,
            landmarks.join(",")
        )
    }

    #[test]
    fn confident_detection_exposes_both_tips() {
        let hands = parse_detections(&detection_line(0.95), 0.8).expect("parse");
        assert_eq!(hands.len(), 1);
        let hand = hands[0];
        assert!((hand.index_tip.x - 0.08).abs() < 1e-6);
        assert!((hand.thumb_tip.x - 0.04).abs() < 1e-6);
    }

    #[test]
    fn low_confidence_hands_are_dropped() {
        let hands = parse_detections(&detection_line(0.4), 0.8).expect("parse");
        assert!(hands.is_empty());
    }

    #[test]
    fn detector_error_line_counts_as_no_detection() {
        let hands = parse_detections(r#"{"hands":[],"error":"no frame"}"#, 0.8).expect("parse");
        assert!(hands.is_empty());
    }

    #[test]
    fn garbage_line_is_a_protocol_error() {
        assert!(parse_detections("not json", 0.8).is_err());
    }

    #[test]
    fn landmarks_scale_to_pixel_space() {
        let lm = Landmark { x: 0.5, y: 0.25 };
        assert_eq!(lm.to_pixels(1080, 720), Position::new(540, 180));
    }

    #[test]
    fn rgb24_flattening_keeps_channel_order() {
        let fb = FrameBuffer {
            width: 2,
            height: 1,
            pixels: vec![0x00AA_BBCC, 0x0011_2233],
        };
        assert_eq!(frame_to_rgb24(&fb), vec![0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33]);
    }
}

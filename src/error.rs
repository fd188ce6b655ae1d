// Every variant states *where* things went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),
    #[error("window update error: {0}")]
    WindowUpdate(String),
    #[error("camera init error: {0}")]
    CameraInit(String),
    #[error("camera frame error: {0}")]
    CameraFrame(String),
    #[error("hand tracker init error: {0}")]
    TrackerInit(String),
    #[error("hand tracker protocol error: {0}")]
    TrackerProtocol(String),
    #[error("canvas save error: {0}")]
    CanvasSave(String),
}

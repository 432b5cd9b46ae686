// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Camera init error: {0}")]
    CameraInit(String),

    /// The video source yielded no frame. Ends the run loop.
    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// The external recognizer failed; the frame is shown without a result.
    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Brush size {0} is not one of the offered sizes")]
    InvalidBrushSize(u32),

    #[error("Colour {0:?} is not on the palette")]
    UnknownColor(crate::types::Rgb),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Surface error types

use thiserror::Error;

/// Errors raised by surface lifecycle operations
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Width or height was zero or negative
    #[error("Invalid surface size: {width}x{height}")]
    InvalidArgument { width: i32, height: i32 },

    /// The handle does not reference a live surface
    #[error("Surface is not live (state: {0})")]
    PreconditionFailed(&'static str),

    /// MuPDF could not allocate the pixmap or bind a device to it
    #[error("Surface backend error: {0}")]
    Backend(String),
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

impl From<mupdf::Error> for SurfaceError {
    fn from(err: mupdf::Error) -> Self {
        SurfaceError::Backend(err.to_string())
    }
}

//! Render pipeline error types

use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::SurfaceError;

/// Anything that can go wrong between reading the input and producing a PNG
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load document: {0}")]
    DocumentLoad(String),

    #[error("Failed to render page {page}: {message}")]
    PageRender { page: usize, message: String },

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("PNG encoding error: {0}")]
    Encode(String),

    #[error("Render timed out after {0} seconds")]
    Timeout(u64),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl RenderError {
    /// Classify a failed read of the input file
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            RenderError::InputNotFound(path)
        } else {
            RenderError::Io { path, source }
        }
    }

    pub(crate) fn page(page: usize, err: impl ToString) -> Self {
        RenderError::PageRender {
            page,
            message: err.to_string(),
        }
    }
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

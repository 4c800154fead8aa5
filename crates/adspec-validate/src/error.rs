use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a validation run. Undecodable images are not errors
/// here; they are reported inside the `ValidationResult`.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("read creative {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("image has zero width or height ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

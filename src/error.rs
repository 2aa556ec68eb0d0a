//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum, one variant per failure class
//! - Module-specific errors ([`EnrichmentError`], [`ConfigError`]) for detailed handling
//! - Only [`Error::Config`] and [`Error::NotFound`] on the top-level input are
//!   fatal; every other class makes the caller skip one file or folder
//!
//! [`EnrichmentError`]: crate::enrichment::EnrichmentError
//! [`ConfigError`]: crate::config::ConfigError

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag reading/writing error for one audio file
    #[error("Metadata error for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Bytes that are empty or can't be decoded as an image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Artwork provider or download failure
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] crate::enrichment::EnrichmentError),

    /// File or directory not found
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid image error.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage(message.into())
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) is an invalid image.
    pub fn is_invalid_image(&self) -> bool {
        match self {
            Self::InvalidImage(_) => true,
            Self::WithContext { source, .. } => source.is_invalid_image(),
            _ => false,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::Io(e),
            other => Self::InvalidImage(other.to_string()),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/music/Queen/Innuendo");
        assert!(err.to_string().contains("/music/Queen/Innuendo"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::invalid_image("truncated JPEG").context("reading cover.jpg");
        let msg = err.to_string();
        assert!(msg.contains("reading cover.jpg"));
        assert!(msg.contains("truncated JPEG"));
    }

    #[test]
    fn test_metadata_error() {
        let err = Error::metadata("/music/song.mp3", "no ID3v2 tag");
        let msg = err.to_string();
        assert!(msg.contains("song.mp3"));
        assert!(msg.contains("no ID3v2 tag"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::invalid_image("test"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }

    #[test]
    fn test_invalid_image_survives_context() {
        let err = Error::invalid_image("bad").context("outer");
        assert!(err.is_invalid_image());
        assert!(!Error::not_found("/x").is_invalid_image());
    }

    #[test]
    fn test_image_io_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = image::ImageError::IoError(io).into();
        assert!(matches!(err, Error::Io(_)));
    }
}

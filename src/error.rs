//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter outside its allowed range (axis extent, degenerate line, negative radius).
    #[error("Domain error: {0}")]
    Domain(String),

    /// Scalar division by zero in vector arithmetic.
    #[error("Division by zero")]
    DivisionByZero,

    /// Normalize or angle requested on a zero-length vector.
    #[error("Zero-length vector")]
    ZeroVector,

    /// Prompt or DSL input could not be parsed.
    #[error("Input parse error: {0}")]
    InputParse(String),

    /// The render host failed to initialise or lost its surface.
    #[error("Graphics initialization error: {0}")]
    GraphicsInit(String),

    /// I/O error (file operations, prompt streams).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Configuration file could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    Config {
        /// 1-based line of the offending YAML (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Domain`] with a formatted message.
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Shorthand for a [`Error::InputParse`] with a formatted message.
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Self::InputParse(msg.into())
    }
}

//! Error types for glyphrun

use thiserror::Error;

use crate::attributes::AttributeKey;

pub type Result<T> = std::result::Result<T, GlyphRunError>;

/// Main error type for glyphrun
#[derive(Debug, Error)]
pub enum GlyphRunError {
    /// An offset fell outside the bounds of the run (or document) it was checked against
    #[error("Offset {offset} out of range {start}..={end}")]
    OutOfRange {
        offset: usize,
        start: usize,
        end: usize,
    },

    /// The authoritative text could not be read
    #[error("Text source unavailable: {0}")]
    SourceUnavailable(String),

    /// A shape-transform attribute held something other than a transform
    #[error("Unsupported shape transform under {key:?}: {found}")]
    UnsupportedTransform { key: AttributeKey, found: String },

    #[error("Shaping failed: {0}")]
    Shaping(#[from] ShapingError),

    #[error("Other error: {0}")]
    Other(String),
}

impl GlyphRunError {
    /// Shorthand for range failures
    pub fn out_of_range(offset: usize, start: usize, end: usize) -> Self {
        Self::OutOfRange { offset, start, end }
    }
}

/// Shaping errors reported by the font-shaping service
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Font not usable: {0}")]
    InvalidFont(String),
}

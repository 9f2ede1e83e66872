//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, rasterizing or presenting a scene.
#[derive(Error, Debug)]
pub enum Error {
    /// A scene command whose tag is none of `v`, `p`, `l`, `t`.
    #[error("Unknown command: '{command}'")]
    UnknownCommand {
        /// The offending command text.
        command: String,
    },

    /// A numeric field failed strict parsing or is out of its valid range.
    #[error("Malformed field '{field}' in command '{command}': {reason}")]
    MalformedField {
        /// The offending command text.
        command: String,
        /// The field text that failed to parse.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A command carried the wrong number of fields for its tag.
    #[error("Command '{command}' expects {expected} fields, found {found}")]
    FieldCount {
        /// The offending command text.
        command: String,
        /// Number of fields after the tag the command requires.
        expected: usize,
        /// Number of fields after the tag actually present.
        found: usize,
    },

    /// A draw command referenced a vertex that was never declared.
    #[error("Invalid vertex index {index} in command '{command}' ({count} vertices declared)")]
    InvalidVertexIndex {
        /// The offending command text.
        command: String,
        /// The referenced index.
        index: i64,
        /// Number of declared vertices.
        count: usize,
    },

    /// A pixel write or read outside `[0, pixels_wide)`.
    #[error("Pixel ({x}, {y}) is outside the {pixels_wide}x{pixels_wide} buffer")]
    OutOfBounds {
        /// X coordinate.
        x: i64,
        /// Y coordinate.
        y: i64,
        /// Buffer side length.
        pixels_wide: u32,
    },

    /// Pixel buffer constructed with a non-positive side length.
    #[error("Invalid buffer size: {pixels_wide}")]
    InvalidSize {
        /// Requested side length.
        pixels_wide: u32,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Configuration could not be parsed or is invalid.
    #[error("Config error at line {line}: {message}")]
    Config {
        /// Line number in the YAML source (0 if unknown).
        line: usize,
        /// Parser or validation message.
        message: String,
    },
}

impl Error {
    /// Whether this error was raised while parsing scene text, before any drawing.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::MalformedField { .. }
                | Self::FieldCount { .. }
                | Self::InvalidVertexIndex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidSize { pixels_wide: 0 };
        assert!(err.to_string().contains("Invalid buffer size"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = Error::OutOfBounds { x: -1, y: 7, pixels_wide: 4 };
        let msg = err.to_string();
        assert!(msg.contains("-1"));
        assert!(msg.contains("4x4"));
    }

    #[test]
    fn test_vertex_index_names_command() {
        let err = Error::InvalidVertexIndex { command: "p,5".into(), index: 5, count: 3 };
        assert!(err.to_string().contains("p,5"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_io_is_not_parse_error() {
        let err = Error::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("boom"));
    }
}

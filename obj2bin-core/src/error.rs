/// Error types for OBJ conversion and the triangle binary format
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Only triangles are supported.
    #[error("line {line}: face has {count} indices, expected exactly 3")]
    FaceArity { line: usize, count: usize },

    /// Faces may only reference vertices declared earlier in the file.
    #[error("line {line}: vertex index {index} out of range (1..={available})")]
    IndexOutOfRange {
        line: usize,
        index: u32,
        available: usize,
    },

    #[error("{0} triangles do not fit in a u32 count")]
    TooManyTriangles(usize),

    #[error("binary mesh too small: {len} bytes, need at least 4")]
    TooShort { len: usize },

    #[error("binary mesh truncated: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("binary mesh has trailing data: expected {expected} bytes, got {got}")]
    TrailingBytes { expected: usize, got: usize },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

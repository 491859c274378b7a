/// Error types for mesh acquisition
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while loading or generating a mesh
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input file could not be opened or read
    #[error("Failed to read mesh {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record did not match its expected layout
    #[error("Malformed record on line {line}: {message}")]
    Format { line: usize, message: String },

    /// A generator was called with an unusable parameter
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Attribute streams differ in length and cannot be packed together
    #[error(
        "Attribute streams are not padded: {vertices} vertices, {normals} normals, {uvs} uvs"
    )]
    AttributeMismatch {
        vertices: usize,
        normals: usize,
        uvs: usize,
    },
}

impl MeshError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}

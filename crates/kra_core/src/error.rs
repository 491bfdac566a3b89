use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a readable archive: {0}")]
    Archive(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Preview declares {declared} bytes, above the {max} byte limit")]
    PreviewTooLarge { declared: u64, max: u64 },

    #[error("Cannot allocate {0} bytes for the preview")]
    Allocation(u64),

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },

    #[error("Raster decode failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

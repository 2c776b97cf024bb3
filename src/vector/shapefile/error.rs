use std::io;
use thiserror::Error;

/// Result type for shapefile decoding
pub type Result<T> = std::result::Result<T, ShapefileError>;

/// Errors that abort a shapefile parse. None of them are recoverable for
/// the invocation that raised them.
#[derive(Error, Debug)]
pub enum ShapefileError {
    #[error("Invalid or corrupted shapefile: file code is {found}, should be 9994.")]
    InvalidFormat { found: i32 },

    #[error("Found unsupported record type: {code}: {name}")]
    UnsupportedShapeType { code: i32, name: &'static str },

    #[error(
        "Invalid {what}, found {found} should be {expected} for shape type {shape_type} in record number {record_number}."
    )]
    CorruptRecord {
        what: String,
        found: i64,
        expected: i64,
        shape_type: i32,
        record_number: i32,
    },

    #[error("Shapefile stream ends part way through a field at byte offset {offset}.")]
    TruncatedStream { offset: usize },

    #[error("No attribute row for record number {record_number}; the table holds {rows} rows including the field-name row.")]
    MissingAttributes { record_number: i32, rows: usize },

    #[error("Invalid attribute table: {0}")]
    InvalidAttributes(String),

    #[error("Could not read settings: {0}")]
    Configs(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ShapefileError {
    /// Maps a failed primitive read at `offset` onto the error taxonomy. A
    /// short read is a truncated stream; anything else stays an I/O error.
    pub fn from_read(err: io::Error, offset: usize) -> ShapefileError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ShapefileError::TruncatedStream { offset: offset }
        } else {
            ShapefileError::Io(err)
        }
    }
}

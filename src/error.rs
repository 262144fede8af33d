//! Error types for the mapping pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while loading inputs or writing output.
///
/// All of these are fatal: the run aborts before any output file is written.
/// Data-quality findings (duplicate barcodes, orders without barcodes) are
/// not errors; they are resolved in place and reported through the
/// diagnostics sink.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Failed to open, read or persist a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// An input file lacks one of its required columns
    #[error("{table} input is missing required column '{column}'")]
    MissingColumn { table: String, column: String },
}

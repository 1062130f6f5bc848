use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Error type covering the different failure cases that can occur when the
/// tool discovers, opens, or extracts records from a spreadsheet export.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Wrapper for IO failures such as reading files or listing directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the configured identifier column matches no header cell.
    #[error("identifier column '{0}' could not be resolved")]
    UnresolvedIdentifier(String),

    /// Raised when a positional column reference does not follow the
    /// `col<N>` convention.
    #[error("invalid positional column reference '{0}'")]
    InvalidColumnRef(String),

    /// Raised when directory discovery finds no matching export file.
    #[error("no export file starting with '{prefix}' in {}", .directory.display())]
    SourceNotFound { directory: PathBuf, prefix: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Raised when the configuration is missing a required setting.
    #[error("incomplete configuration: {0}")]
    IncompleteConfig(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

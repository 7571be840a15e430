//! Error taxonomy for a run of the importer.
//!
//! Per-event submission failures are deliberately not represented here: they
//! are counted and reported by the submission loop and never propagate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("configuration value '{0}' is still set to its placeholder default")]
    Configuration(&'static str),

    #[error("could not find CSV file '{0}'")]
    SourceNotFound(String),

    /// A date/time cell that does not match `YYYY-MM-DD HH:MM`. Fatal for the
    /// whole run: a corrupt timestamp means the export format has changed,
    /// and skipping the row would hide data loss.
    #[error("malformed timestamp '{0}' (expected YYYY-MM-DD HH:MM)")]
    MalformedTimestamp(String),

    #[error("import cancelled")]
    Cancelled,
}

//! The module contains the error the engine can throw.
//!
//! Aggregation itself never fails: malformed records are skipped, not
//! rejected. The only fallible step is naming a window, so:
//!
//! - [`UnknownWindow`] thrown when a window label is not recognized.
//!
//!  [`UnknownWindow`]: EngineError::UnknownWindow
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" is not a known analysis window")]
    UnknownWindow(String),
}

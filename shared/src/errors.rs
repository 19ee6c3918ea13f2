//! Error types for the body metrics core
//!
//! Numeric input never produces an error: missing or malformed numbers are
//! normalized to the "incomplete" state instead. Errors only exist for
//! selection values (unit system, sex, activity level) that do not name a
//! known option.

use thiserror::Error;

/// Failure to parse a selection value into one of the known options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown unit system: {0}")]
    UnitSystem(String),

    #[error("Unknown biological sex: {0}")]
    BiologicalSex(String),

    #[error("Unknown activity level: {0}")]
    ActivityLevel(String),
}

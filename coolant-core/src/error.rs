/// Error types for the Coolant Pro core library
use thiserror::Error;

/// Main error type for domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoolantError {
    /// Shop or machine identifier was not supplied; the reading cannot be saved
    #[error("Missing {field}: a reading needs both a shop name and a machine ID")]
    MissingIdentity { field: &'static str },

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    InvalidDate(String),

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Metal category label not recognised
    #[error("Unknown metal category: {0}")]
    UnknownMetal(String),

    /// Quick note name or index not recognised
    #[error("Unknown quick note: {0}")]
    UnknownQuickNote(String),
}

/// Type alias for Results using CoolantError
pub type Result<T> = std::result::Result<T, CoolantError>;

//! Error types for spam-rs

use thiserror::Error;

/// Result type alias for rule table operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Spam classifier error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// A pattern could not be compiled as a regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

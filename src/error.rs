//! Error types for the typofinder library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TypofinderError`] enum.
//!
//! # Examples
//!
//! ```
//! use typofinder::error::{Result, TypofinderError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TypofinderError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for typofinder operations.
#[derive(Error, Debug)]
pub enum TypofinderError {
    /// I/O errors (reading text files, writing the dictionary, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required file or directory does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A persisted dictionary exists but is not a flat word to frequency mapping
    #[error("Malformed dictionary: {0}")]
    Malformed(String),

    /// Invalid user input (paths, flags, argument combinations)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Scanning was requested against a dictionary without any words
    #[error("Empty dictionary: {0}")]
    EmptyDictionary(String),

    /// Operation not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TypofinderError.
pub type Result<T> = std::result::Result<T, TypofinderError>;

impl TypofinderError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TypofinderError::NotFound(msg.into())
    }

    /// Create a new malformed dictionary error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        TypofinderError::Malformed(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TypofinderError::InvalidArgument(msg.into())
    }

    /// Create a new empty dictionary error.
    pub fn empty_dictionary<S: Into<String>>(msg: S) -> Self {
        TypofinderError::EmptyDictionary(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        TypofinderError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TypofinderError::Other(msg.into())
    }

    /// Whether the caller may carry on with the surrounding workflow.
    ///
    /// Missing or malformed dictionaries and empty dictionaries only abort the
    /// operation that hit them; everything else is fatal for the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TypofinderError::NotFound(_)
                | TypofinderError::Malformed(_)
                | TypofinderError::EmptyDictionary(_)
        )
    }
}

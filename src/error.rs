//! Error types for template construction, schema lookup, and array
//! persistence.
//!
//! ## Error Categories
//!
//! - **Structure Definition**: a template request is inconsistent with
//!   the resolved schema (for example a storage-kind list whose length
//!   does not match the layer count)
//! - **Schema**: the external schema service could not resolve a data
//!   path
//! - **I/O**: file writing failures during array persistence
//! - **Unsupported Rank**: array persistence outside the supported
//!   rank range
//!
//! Numeric token classification never produces an error; parse
//! failures are reported as plain `false` by the predicates in
//! [`crate::tokenize`].
//!
//! ## Examples
//!
//! ```rust
//! use siminput::Error;
//!
//! let err = Error::structure_definition("storage kind list has size 2 but 3 layers");
//! assert!(err.to_string().contains("structure definition"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
///
/// Message payloads are stored as strings so the error type stays
/// `Clone`-able across retry and reporting paths.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A template request conflicts with the resolved data structure
    #[error("structure definition error: {0}")]
    StructureDefinition(String),

    /// The external schema service could not resolve a data path
    #[error("schema lookup failed for '{path}': {msg}")]
    Schema { path: String, msg: String },

    /// Array persistence only supports ranks 1 through 4
    #[error("arrays of rank {rank} are not supported, expected rank 1 through 4")]
    UnsupportedRank { rank: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a structure-definition error.
    ///
    /// Raised when a caller-supplied template request cannot be
    /// reconciled with the schema, for example a storage-kind list
    /// sized differently from the layer count.
    pub fn structure_definition<T: fmt::Display>(msg: T) -> Self {
        Error::StructureDefinition(msg.to_string())
    }

    /// Creates a schema lookup error for an unresolvable data path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::Error;
    ///
    /// let err = Error::schema("gwf6/dis/griddata/botm", "unknown block");
    /// assert!(err.to_string().contains("gwf6/dis/griddata/botm"));
    /// ```
    pub fn schema(path: &str, msg: &str) -> Self {
        Error::Schema {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported-rank error for array persistence.
    pub fn unsupported_rank(rank: usize) -> Self {
        Error::UnsupportedRank { rank }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

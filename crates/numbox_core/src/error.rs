//! Error types for name lookups (cultures, number kinds).

use thiserror::Error;

/// Errors raised when resolving a textual name to a core type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No culture preset is registered under this name
    #[error("Unknown culture: '{name}'")]
    UnknownCulture {
        /// The name that was looked up
        name: String,
    },

    /// The name does not match any number kind
    #[error("Unknown number kind: '{name}'")]
    UnknownKind {
        /// The name that was looked up
        name: String,
    },
}

impl LookupError {
    /// Create an unknown culture error.
    pub fn unknown_culture(name: impl Into<String>) -> Self {
        Self::UnknownCulture { name: name.into() }
    }

    /// Create an unknown kind error.
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }
}

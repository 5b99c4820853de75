//! Error types for the Frame engine
//!
//! Every failure in the core is synchronous, detected locally and
//! non-retryable: it reflects an authoring or configuration defect,
//! not a transient condition.

use std::fmt;

/// Result type for Frame engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frame engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Id or name absent from the store, or id of another resource kind
    NotFound(String),

    /// A texture is declared as output by more than one program
    AmbiguousProducer(String),

    /// A texture has no declared producer in the dependency chain
    NoProducer(String),

    /// Texture already occupies a slot of the material
    AlreadyBound(String),

    /// Texture does not occupy any slot of the material
    NotBound(String),

    /// Every slot of the material is occupied
    NoFreeSlots(String),

    /// A mesh has no resolvable material at draw time
    NoMaterial(String),

    /// Malformed size, missing default camera/root, bad descriptor, ...
    ConfigurationError(String),

    /// Failure reported by the graphics device
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::AmbiguousProducer(msg) => write!(f, "Ambiguous producer: {}", msg),
            Error::NoProducer(msg) => write!(f, "No producer: {}", msg),
            Error::AlreadyBound(msg) => write!(f, "Already bound: {}", msg),
            Error::NotBound(msg) => write!(f, "Not bound: {}", msg),
            Error::NoFreeSlots(msg) => write!(f, "No free slots: {}", msg),
            Error::NoMaterial(msg) => write!(f, "No material: {}", msg),
            Error::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

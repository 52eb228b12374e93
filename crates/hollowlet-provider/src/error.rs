//! Error types for the provider crate.

use hollowlet_core::PodKey;
use thiserror::Error;

/// Errors that can occur during pod lifecycle operations.
///
/// The node status and stub log/exec surfaces have no failure mode;
/// only registry lookups and inserts can error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A live pod with the same `(namespace, name)` identity exists.
    #[error("pod already exists: {0}")]
    AlreadyExists(PodKey),

    /// No live pod with the given identity is registered.
    #[error("pod not found: {0}")]
    NotFound(PodKey),

    /// The submitted manifest is missing identity metadata.
    #[error("invalid pod manifest: {0}")]
    InvalidPod(String),
}

impl ProviderError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyExists(_) => 409,
            Self::NotFound(_) => 404,
            Self::InvalidPod(_) => 400,
        }
    }
}

/// A specialized Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

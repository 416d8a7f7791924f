//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a session
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or bincode failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding from JSON or bincode failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The checkpoint was written by an incompatible format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot does not fit the engine it is resumed with
    #[error("Checkpoint does not match engine: {0}")]
    Mismatch(String),
}

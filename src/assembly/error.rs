//! Assembly error taxonomy
//!
//! Underfill is deliberately absent: an exhausted source pool is reported on
//! the result, not raised.

/// Errors surfaced by the assembly engine
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("block {index}: empty source playlist reference")]
    EmptySourceRef { index: usize },

    #[error("manual block order must cover {expected} blocks, got {got}")]
    OrderLengthMismatch { expected: usize, got: usize },

    #[error("manual block order position {position} is out of range for {count} blocks")]
    OrderOutOfRange { position: usize, count: usize },

    #[error("manual block order repeats position {position}")]
    OrderDuplicate { position: usize },

    #[error("block {index}: playlist '{playlist_id}' is not in the catalog")]
    MissingPlaylist { index: usize, playlist_id: String },
}

/// Result type specialized to the assembly engine
pub type Result<T> = std::result::Result<T, AssemblyError>;

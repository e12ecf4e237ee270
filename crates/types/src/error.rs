//! Error types for frame operations.

/// Errors raised while reading or extending a [`crate::FeatureFrame`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// A requested feature column is absent from the frame. Fatal for the
    /// call that requested it; nothing is retried.
    #[error("missing column: {0}")]
    MissingColumn(String),
}

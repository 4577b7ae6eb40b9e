//! Viewer error taxonomy

use thiserror::Error;

/// Errors the preview session can produce
///
/// Stale-load discards are intentionally absent: dropping a superseded
/// load is normal operation, not an error.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The window reports no usable drawing area - fatal to session creation
    #[error("viewport unavailable: {width}x{height}")]
    ViewportUnavailable { width: f32, height: f32 },
    /// An asset failed to fetch or decode - the previous model stays up
    #[error("failed to load model {src}: {reason}")]
    AssetLoadFailure { src: String, reason: String },
}

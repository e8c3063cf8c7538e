//! Conversion error types.

use thiserror::Error;

/// Errors from the renderer adapter.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The external renderer is unreachable. Fatal: aborts the build with a
    /// remediation hint, not retried.
    #[error("Missing dependency: {name}\n{hint}")]
    MissingDependency { name: String, hint: String },

    /// The renderer invocation failed (non-zero exit or missing output).
    /// Fatal for that page's conversion, not retried.
    #[error("Renderer failed: {0}")]
    Render(String),
}

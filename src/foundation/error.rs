/// Convenience result type used across promocard.
pub type PromoResult<T> = Result<T, PromoError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PromoError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or executing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// An image id could not be fetched or decoded.
    #[error("asset unavailable '{id}': {reason}")]
    AssetUnavailable {
        /// Asset identifier as produced by the image resolver.
        id: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The environment cannot produce the requested export container.
    #[error("export unsupported: {0}")]
    ExportUnsupported(String),

    /// A user-initiated cancellation stopped the export.
    #[error("Export cancelled")]
    Cancelled,

    /// External background generation failed or timed out.
    #[error("generation error: {0}")]
    Generation(String),

    /// The drawing surface could not be acquired.
    #[error("surface unavailable: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromoError {
    /// Build a [`PromoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PromoError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`PromoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PromoError::AssetUnavailable`] value.
    pub fn asset_unavailable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssetUnavailable {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PromoError::ExportUnsupported`] value.
    pub fn export_unsupported(msg: impl Into<String>) -> Self {
        Self::ExportUnsupported(msg.into())
    }

    /// Build a [`PromoError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`PromoError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Whether this error is a user cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

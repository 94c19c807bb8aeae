//! Error types for generation and local persistence.

use crate::provider::ProviderKind;

/// Errors that can occur during generation or local persistence.
#[derive(Debug, thiserror::Error)]
pub enum GenStudioError {
    /// Client construction failed (no usable credential, bad output directory).
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested model belongs to a provider with no configured credential.
    #[error("no API key configured for provider: {0}")]
    MissingProvider(ProviderKind),

    /// API key rejected by the provider.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Provider returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code from the provider.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Provider returned no candidates or parts.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Provider response contained no inline image data.
    #[error("provider returned no image data")]
    NoImageData,

    /// Provider response contained no text.
    #[error("provider returned no text")]
    NoText,

    /// Generated text contained no `<svg>` element.
    #[error("generated output contained no <svg> markup")]
    NoSvg,

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode a base64 payload.
    #[error("failed to decode: {0}")]
    Decode(#[from] base64::DecodeError),

    /// I/O error (e.g., writing to the output directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenStudioError>;

/// Collapses whitespace and truncates provider error bodies before they are
/// embedded in error messages.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    const MAX_LEN: usize = 300;

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "(empty response body)".to_string();
    }
    if collapsed.len() > MAX_LEN {
        let mut end = MAX_LEN;
        while !collapsed.is_char_boundary(end) {
            end -= 1;
        }
        return format!("{}...", &collapsed[..end]);
    }
    collapsed
}

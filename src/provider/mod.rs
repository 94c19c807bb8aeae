//! Provider backends and the shared reachability seam.

mod gemini;
mod openai;

pub(crate) use gemini::GeminiClient;
pub(crate) use openai::OpenAiClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The external generative services a client can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini (generativelanguage.googleapis.com).
    Gemini,
    /// OpenAI image API (api.openai.com).
    OpenAi,
}

impl ProviderKind {
    /// Returns the lowercase provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reachability seam shared by all backends.
#[async_trait]
pub(crate) trait Provider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Issues a minimal request to verify the provider is reachable and
    /// the credential is accepted.
    async fn health_check(&self) -> Result<()>;
}

/// An inline media part decoded from a provider response.
#[derive(Debug, Clone)]
pub(crate) struct InlineImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

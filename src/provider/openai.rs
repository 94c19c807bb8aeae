//! OpenAI backend: DALL-E image generation.

use crate::error::{sanitize_error_message, GenStudioError, Result};
use crate::model::ImageModel;
use crate::provider::{InlineImage, Provider, ProviderKind};
use crate::types::{AspectRatio, ImageOptions};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";
const MODELS_URL: &str = "https://api.openai.com/v1/models";

/// Client for the OpenAI images API.
pub(crate) struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Generates images. Returns decoded image bytes in response order.
    pub async fn generate_image(
        &self,
        prompt: &str,
        model: ImageModel,
        options: &ImageOptions,
    ) -> Result<Vec<InlineImage>> {
        let body = ImagesRequest::from_options(prompt, model, options);
        tracing::debug!(model = model.as_str(), "requesting image generation");

        let response = self
            .http
            .post(GENERATIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let payload: ImagesResponse = response.json().await?;
        self.resolve_entries(payload).await
    }

    /// Decodes each response entry, downloading URL-form entries. Entries
    /// carrying neither `b64_json` nor `url` are skipped.
    async fn resolve_entries(&self, response: ImagesResponse) -> Result<Vec<InlineImage>> {
        if response.data.is_empty() {
            return Err(GenStudioError::EmptyResponse);
        }

        let mut images = Vec::new();
        for entry in response.data {
            if let Some(b64) = entry.b64_json {
                let data = base64::engine::general_purpose::STANDARD.decode(&b64)?;
                images.push(InlineImage {
                    data,
                    mime_type: "image/png".to_string(),
                });
            } else if let Some(url) = entry.url {
                images.push(InlineImage {
                    data: self.download(&url).await?,
                    mime_type: "image/png".to_string(),
                });
            }
        }

        if images.is_empty() {
            return Err(GenStudioError::NoImageData);
        }
        Ok(images)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GenStudioError::Api {
                status: response.status().as_u16(),
                message: "failed to download image from URL".to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Provider for OpenAiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .http
            .get(MODELS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(GenStudioError::Auth("invalid API key".to_string())),
            status if !(200..300).contains(&status) => Err(GenStudioError::Api {
                status,
                message: "health check failed".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn parse_error(status: u16, text: &str) -> GenStudioError {
    let message = sanitize_error_message(text);
    match status {
        401 | 403 => GenStudioError::Auth(message),
        _ => GenStudioError::Api { status, message },
    }
}

// Request/response wire types.

#[derive(Debug, Serialize)]
struct ImagesRequest {
    model: String,
    prompt: String,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    response_format: &'static str,
}

impl ImagesRequest {
    /// Builds an image request. Fields the model does not accept (per its
    /// capability row) are dropped; the aspect ratio maps to the closest
    /// supported pixel size.
    fn from_options(prompt: &str, model: ImageModel, options: &ImageOptions) -> Self {
        let caps = model.caps();
        Self {
            model: model.as_str().to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: options
                .aspect_ratio
                .filter(|_| caps.aspect_ratio)
                .map(|ratio| resolve_size(ratio).to_string()),
            quality: options
                .quality
                .filter(|_| caps.quality)
                .map(|quality| quality.as_str().to_string()),
            response_format: "b64_json",
        }
    }
}

fn resolve_size(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Square => "1024x1024",
        AspectRatio::Landscape | AspectRatio::Standard => "1792x1024",
        AspectRatio::Portrait | AspectRatio::StandardPortrait => "1024x1792",
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

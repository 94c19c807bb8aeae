//! Gemini (Google) backend: image and text generation over `generateContent`.

use crate::error::{sanitize_error_message, GenStudioError, Result};
use crate::model::{ImageModel, TextModel};
use crate::provider::{InlineImage, Provider, ProviderKind};
use crate::types::ImageOptions;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini generateContent API.
pub(crate) struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Generates images. Returns the response's inline media parts in
    /// order, plus any accompanying text.
    pub async fn generate_image(
        &self,
        prompt: &str,
        model: ImageModel,
        options: &ImageOptions,
    ) -> Result<(Vec<InlineImage>, Option<String>)> {
        let body = GenerateContentRequest::for_image(prompt, model, options);
        tracing::debug!(model = model.as_str(), "requesting image generation");

        let payload = self.generate_content(model.as_str(), &body).await?;
        unwrap_image_parts(payload)
    }

    /// Generates text. Fails when the response carries no text.
    pub async fn generate_text(&self, prompt: &str, model: TextModel) -> Result<String> {
        let body = GenerateContentRequest::for_text(prompt);
        tracing::debug!(model = model.as_str(), "requesting text generation");

        let payload = self.generate_content(model.as_str(), &body).await?;
        unwrap_text(payload)
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{BASE_URL}/{model}:generateContent");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Provider for GeminiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn health_check(&self) -> Result<()> {
        self.generate_text("Reply with OK", TextModel::default())
            .await
            .map(|_| ())
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
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<String>,
}

impl GenerateContentRequest {
    /// Builds an image request. Fields the model does not accept (per its
    /// capability row) are dropped.
    fn for_image(prompt: &str, model: ImageModel, options: &ImageOptions) -> Self {
        let caps = model.caps();
        let aspect_ratio = options
            .aspect_ratio
            .filter(|_| caps.aspect_ratio)
            .map(|ratio| ratio.as_str().to_string());
        let image_size = options
            .size
            .filter(|_| caps.image_size)
            .map(|size| size.as_str().to_string());
        let image_config = (aspect_ratio.is_some() || image_size.is_some()).then(|| ImageConfig {
            aspect_ratio,
            image_size,
        });

        Self {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config,
            }),
        }
    }

    fn for_text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Splits the first candidate into decoded inline images plus any
/// accompanying text. Empty candidates/parts is an empty-response error;
/// parts without inline media is a no-image-data error.
fn unwrap_image_parts(
    response: GenerateContentResponse,
) -> Result<(Vec<InlineImage>, Option<String>)> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenStudioError::EmptyResponse)?;
    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        return Err(GenStudioError::EmptyResponse);
    }

    let mut images = Vec::new();
    let mut text_parts = Vec::new();
    for part in parts {
        if let Some(inline) = part.inline_data {
            let data = base64::engine::general_purpose::STANDARD.decode(&inline.data)?;
            images.push(InlineImage {
                data,
                mime_type: inline.mime_type,
            });
        } else if let Some(text) = part.text {
            text_parts.push(text);
        }
    }

    if images.is_empty() {
        return Err(GenStudioError::NoImageData);
    }

    let text = (!text_parts.is_empty()).then(|| text_parts.join("\n"));
    Ok((images, text))
}

fn unwrap_text(response: GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenStudioError::EmptyResponse)?;
    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() {
        return Err(GenStudioError::NoText);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AspectRatio, ImageSize};

    #[test]
    fn test_image_request_construction_basic() {
        let options = ImageOptions::new();
        let request =
            GenerateContentRequest::for_image("A puppy", ImageModel::GeminiFlashImage, &options);

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts[0].text, "A puppy");
        let config = request.generation_config.unwrap();
        assert_eq!(config.response_modalities, vec!["TEXT", "IMAGE"]);
        assert!(config.image_config.is_none());
    }

    #[test]
    fn test_flash_model_drops_size() {
        let options = ImageOptions::new()
            .with_aspect_ratio(AspectRatio::Landscape)
            .with_size(ImageSize::K2);
        let request =
            GenerateContentRequest::for_image("A puppy", ImageModel::GeminiFlashImage, &options);

        let image_config = request.generation_config.unwrap().image_config.unwrap();
        assert_eq!(image_config.aspect_ratio.as_deref(), Some("16:9"));
        assert!(image_config.image_size.is_none());
    }

    #[test]
    fn test_pro_model_forwards_size() {
        let options = ImageOptions::new().with_size(ImageSize::K4);
        let request =
            GenerateContentRequest::for_image("A puppy", ImageModel::GeminiProImage, &options);

        let image_config = request.generation_config.unwrap().image_config.unwrap();
        assert_eq!(image_config.image_size.as_deref(), Some("4K"));
        assert!(image_config.aspect_ratio.is_none());
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let request = GenerateContentRequest::for_text("Hello");
        assert!(request.generation_config.is_none());
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let options = ImageOptions::new().with_aspect_ratio(AspectRatio::Square);
        let request =
            GenerateContentRequest::for_image("A puppy", ImageModel::GeminiFlashImage, &options);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("generationConfig").is_some());
        assert!(json["generationConfig"].get("imageConfig").is_some());
        assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "1:1");
    }

    #[test]
    fn test_unwrap_zero_candidates_is_empty_response() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            unwrap_image_parts(response),
            Err(GenStudioError::EmptyResponse)
        ));
    }

    #[test]
    fn test_unwrap_text_only_part_is_no_image_data() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "I cannot draw that."}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            unwrap_image_parts(response),
            Err(GenStudioError::NoImageData)
        ));
    }

    #[test]
    fn test_unwrap_inline_part_preserves_mime_type() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "image/webp",
                            "data": "AQID"
                        }
                    }]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let (images, text) = unwrap_image_parts(response).unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/webp");
        assert_eq!(images[0].data, vec![1, 2, 3]);
        assert!(text.is_none());
    }

    #[test]
    fn test_unwrap_interleaved_parts_keeps_order_and_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image:"},
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}},
                        {"inlineData": {"mimeType": "image/jpeg", "data": "BAUG"}}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let (images, text) = unwrap_image_parts(response).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!(images[1].mime_type, "image/jpeg");
        assert_eq!(text.as_deref(), Some("Here is your image:"));
    }

    #[test]
    fn test_unwrap_invalid_base64_is_decode_error() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "!!!"}}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            unwrap_image_parts(response),
            Err(GenStudioError::Decode(_))
        ));
    }

    #[test]
    fn test_unwrap_text_joins_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello "}, {"text": "world"}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(unwrap_text(response).unwrap(), "Hello world");
    }

    #[test]
    fn test_unwrap_blank_text_is_no_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "  \n"}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(unwrap_text(response), Err(GenStudioError::NoText)));
    }

    #[test]
    fn test_parse_error_maps_auth_statuses() {
        assert!(matches!(
            parse_error(401, "key expired"),
            GenStudioError::Auth(_)
        ));
        assert!(matches!(
            parse_error(500, "boom"),
            GenStudioError::Api { status: 500, .. }
        ));
    }
}

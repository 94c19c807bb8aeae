//! The public client facade.

use crate::config::ClientConfig;
use crate::error::{GenStudioError, Result};
use crate::provider::{GeminiClient, OpenAiClient, Provider, ProviderKind};
use crate::storage::{self, Workspace};
use crate::types::{
    extension_for_mime, GeneratedImage, GeneratedSvg, HealthReport, ImageOptions, SvgOptions,
    TextOptions,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static SVG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<svg\b[^>]*>.*?</svg>").expect("valid pattern"));

/// Client for generating images, text, and SVG markup, with optional
/// persistence to a local output directory.
///
/// Holds immutable configuration and per-provider HTTP handles; individual
/// calls share no mutable state, so concurrent use is safe.
pub struct GenerationClient {
    gemini: Option<GeminiClient>,
    openai: Option<OpenAiClient>,
    workspace: Workspace,
}

impl GenerationClient {
    /// Builds a client from resolved configuration, creating the output
    /// directory if missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let workspace = Workspace::create(&config.output_dir)?;
        Ok(Self {
            gemini: config.google_api_key.map(GeminiClient::new),
            openai: config.openai_api_key.map(OpenAiClient::new),
            workspace,
        })
    }

    /// Builds a client from environment (and dotenv file) configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The absolute path of the output directory.
    pub fn output_dir(&self) -> &Path {
        self.workspace.root()
    }

    fn gemini(&self) -> Result<&GeminiClient> {
        self.gemini
            .as_ref()
            .ok_or(GenStudioError::MissingProvider(ProviderKind::Gemini))
    }

    fn openai(&self) -> Result<&OpenAiClient> {
        self.openai
            .as_ref()
            .ok_or(GenStudioError::MissingProvider(ProviderKind::OpenAi))
    }

    /// Generates one or more images from a prompt.
    ///
    /// The model in `options` selects the provider; a missing credential
    /// for that provider fails before any network call. Results are
    /// returned in provider response order, written to the output
    /// directory when `options.save` is set.
    pub async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<Vec<GeneratedImage>> {
        let caps = options.model.caps();
        let (parts, text) = match caps.provider {
            ProviderKind::Gemini => {
                self.gemini()?
                    .generate_image(prompt, options.model, options)
                    .await?
            }
            ProviderKind::OpenAi => {
                let parts = self
                    .openai()?
                    .generate_image(prompt, options.model, options)
                    .await?;
                (parts, None)
            }
        };

        let mut images = Vec::with_capacity(parts.len());
        for (index, part) in parts.into_iter().enumerate() {
            let file_path = if options.save {
                let name = storage::image_filename(
                    options.filename.as_deref(),
                    index,
                    extension_for_mime(&part.mime_type),
                );
                Some(self.workspace.save_bytes(&name, &part.data)?)
            } else {
                None
            };
            images.push(GeneratedImage {
                data: part.data,
                mime_type: part.mime_type,
                file_path,
                text: text.clone(),
            });
        }
        Ok(images)
    }

    /// Generates text from a prompt.
    pub async fn generate_text(&self, prompt: &str, options: &TextOptions) -> Result<String> {
        self.gemini()?.generate_text(prompt, options.model).await
    }

    /// Generates SVG markup from a prompt.
    ///
    /// The prompt is wrapped with an instruction to emit raw markup; the
    /// first `<svg>...</svg>` fragment of the response is extracted, and
    /// written to the output directory when `options.save` is set.
    pub async fn generate_svg(&self, prompt: &str, options: &SvgOptions) -> Result<GeneratedSvg> {
        let text = self
            .gemini()?
            .generate_text(&svg_prompt(prompt), options.model)
            .await?;
        let markup = extract_svg(&text)
            .ok_or(GenStudioError::NoSvg)?
            .to_string();

        let file_path = if options.save {
            let name = storage::svg_filename(options.filename.as_deref());
            Some(self.workspace.save_bytes(&name, markup.as_bytes())?)
        } else {
            None
        };
        Ok(GeneratedSvg { markup, file_path })
    }

    /// Decodes base64 data and writes it under the output directory;
    /// returns the absolute path. Creates no directories.
    pub fn save_image(&self, base64_data: &str, filename: &str) -> Result<PathBuf> {
        self.workspace.save_base64(filename, base64_data)
    }

    /// Full paths of saved files with a recognized image extension.
    pub fn list_saved_images(&self) -> Result<Vec<PathBuf>> {
        self.workspace.list_images()
    }

    /// Deletes every saved image; returns how many were removed.
    pub fn clear_saved_images(&self) -> Result<usize> {
        self.workspace.clear_images()
    }

    /// Probes each configured provider with a minimal request.
    ///
    /// Provider failures fold into `false`; this never returns an error.
    pub async fn health_check(&self) -> HealthReport {
        let gemini = probe(self.gemini.as_ref().map(|p| p as &dyn Provider)).await;
        let openai = probe(self.openai.as_ref().map(|p| p as &dyn Provider)).await;
        HealthReport::new(gemini, openai)
    }
}

async fn probe(provider: Option<&dyn Provider>) -> Option<bool> {
    match provider {
        Some(provider) => match provider.health_check().await {
            Ok(()) => Some(true),
            Err(error) => {
                tracing::warn!(provider = %provider.kind(), %error, "health check failed");
                Some(false)
            }
        },
        None => None,
    }
}

fn svg_prompt(prompt: &str) -> String {
    format!(
        "Generate an SVG image of the following. Respond with raw SVG markup \
         only, no code fences or commentary.\n\n{prompt}"
    )
}

/// Returns the first `<svg>...</svg>` fragment in the text, if any.
fn extract_svg(text: &str) -> Option<&str> {
    SVG_PATTERN.find(text).map(|found| found.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageModel;
    use tempfile::tempdir;

    fn google_only_client(output_dir: &Path) -> GenerationClient {
        let config = ClientConfig::builder()
            .google_api_key("test-key")
            .output_dir(output_dir)
            .skip_env_file()
            .build()
            .unwrap();
        GenerationClient::new(config).unwrap()
    }

    #[test]
    fn test_construction_creates_output_dir() {
        let dir = tempdir().unwrap();
        let client = google_only_client(&dir.path().join("nested/out"));
        assert!(client.output_dir().is_dir());
        assert!(client.output_dir().is_absolute());
    }

    #[test]
    fn test_save_list_clear_round_trip() {
        let dir = tempdir().unwrap();
        let client = google_only_client(dir.path());

        let path = client.save_image("AQID", "pixel.png").unwrap();
        assert!(path.exists());
        assert_eq!(client.list_saved_images().unwrap(), vec![path]);
        assert_eq!(client.clear_saved_images().unwrap(), 1);
        assert!(client.list_saved_images().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_provider_fails_before_network() {
        let dir = tempdir().unwrap();
        let client = google_only_client(dir.path());

        let options = ImageOptions::new().with_model(ImageModel::DallE3);
        let result = client.generate_image("A sunset", &options).await;
        assert!(matches!(
            result,
            Err(GenStudioError::MissingProvider(ProviderKind::OpenAi))
        ));
    }

    #[tokio::test]
    async fn test_health_check_reports_unconfigured_providers_as_none() {
        let dir = tempdir().unwrap();
        let config = ClientConfig {
            google_api_key: None,
            openai_api_key: None,
            output_dir: dir.path().to_path_buf(),
        };
        let client = GenerationClient::new(config).unwrap();

        let report = client.health_check().await;
        assert!(report.gemini.is_none());
        assert!(report.openai.is_none());
        assert!(!report.ok);
    }

    #[test]
    fn test_extract_svg_plain() {
        let text = "<svg><rect/></svg>";
        assert_eq!(extract_svg(text), Some("<svg><rect/></svg>"));
    }

    #[test]
    fn test_extract_svg_with_attributes_and_prose() {
        let text = "Sure, here you go:\n```xml\n<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 10 10\">\n<circle cx=\"5\" cy=\"5\" r=\"4\"/>\n</svg>\n```\nEnjoy!";
        let markup = extract_svg(text).unwrap();
        assert!(markup.starts_with("<svg xmlns"));
        assert!(markup.ends_with("</svg>"));
        assert!(!markup.contains("```"));
    }

    #[test]
    fn test_extract_svg_picks_first_fragment() {
        let text = "<svg id=\"a\"></svg><svg id=\"b\"></svg>";
        assert_eq!(extract_svg(text), Some("<svg id=\"a\"></svg>"));
    }

    #[test]
    fn test_extract_svg_none_without_closing_tag() {
        assert!(extract_svg("here is <svg but nothing else").is_none());
        assert!(extract_svg("no markup at all").is_none());
    }

    #[test]
    fn test_svg_prompt_carries_user_prompt() {
        let wrapped = svg_prompt("a smiley face");
        assert!(wrapped.contains("a smiley face"));
        assert!(wrapped.contains("raw SVG markup"));
    }
}

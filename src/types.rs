//! Core types for generation requests and results.

use crate::model::{ImageModel, TextModel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Common aspect ratios for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square aspect ratio.
    #[serde(rename = "1:1")]
    Square,
    /// 16:9 landscape (widescreen) aspect ratio.
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait (tall) aspect ratio.
    #[serde(rename = "9:16")]
    Portrait,
    /// 4:3 standard landscape aspect ratio.
    #[serde(rename = "4:3")]
    Standard,
    /// 3:4 standard portrait aspect ratio.
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output size tiers accepted by the high-tier Gemini image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// 1024px on the long edge.
    #[serde(rename = "1K")]
    K1,
    /// 2048px on the long edge.
    #[serde(rename = "2K")]
    K2,
    /// 4096px on the long edge.
    #[serde(rename = "4K")]
    K4,
}

impl ImageSize {
    /// Returns the API size tier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::K1 => "1K",
            Self::K2 => "2K",
            Self::K4 => "4K",
        }
    }
}

/// Quality settings accepted by DALL-E models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Standard quality.
    Standard,
    /// High definition.
    Hd,
}

impl ImageQuality {
    /// Returns the API quality string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hd => "hd",
        }
    }
}

/// Options for an image generation call.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Model to generate with. Determines the provider.
    pub model: ImageModel,
    /// Desired aspect ratio, if the model accepts one.
    pub aspect_ratio: Option<AspectRatio>,
    /// Desired output size tier, if the model accepts one.
    pub size: Option<ImageSize>,
    /// Desired quality, if the model accepts one.
    pub quality: Option<ImageQuality>,
    /// Whether to write results to the output directory.
    pub save: bool,
    /// Filename stem for saved results. Defaults to a timestamped name.
    pub filename: Option<String>,
}

impl ImageOptions {
    /// Creates options with default settings (default model, no persistence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model.
    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Sets the output size tier.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the quality.
    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Requests that results be written to the output directory.
    pub fn persist(mut self) -> Self {
        self.save = true;
        self
    }

    /// Sets the filename stem for saved results.
    pub fn with_filename(mut self, stem: impl Into<String>) -> Self {
        self.filename = Some(stem.into());
        self
    }
}

/// Options for a text generation call.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// Model to generate with.
    pub model: TextModel,
}

impl TextOptions {
    /// Creates options with the default text model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model.
    pub fn with_model(mut self, model: TextModel) -> Self {
        self.model = model;
        self
    }
}

/// Options for an SVG generation call.
#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    /// Text model used to emit the markup.
    pub model: TextModel,
    /// Whether to write the markup to the output directory.
    pub save: bool,
    /// Filename stem for the saved markup. Defaults to a timestamped name.
    pub filename: Option<String>,
}

impl SvgOptions {
    /// Creates options with default settings (default model, no persistence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model.
    pub fn with_model(mut self, model: TextModel) -> Self {
        self.model = model;
        self
    }

    /// Requests that the markup be written to the output directory.
    pub fn persist(mut self) -> Self {
        self.save = true;
        self
    }

    /// Sets the filename stem for the saved markup.
    pub fn with_filename(mut self, stem: impl Into<String>) -> Self {
        self.filename = Some(stem.into());
        self
    }
}

/// A generated image with its data and optional file location.
///
/// Immutable once returned; the file path is set only when persistence was
/// requested.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw decoded image bytes.
    pub data: Vec<u8>,
    /// MIME type declared by the provider.
    pub mime_type: String,
    /// Where the image was written, when persistence was requested.
    pub file_path: Option<PathBuf>,
    /// Accompanying text description, when the provider returned one.
    pub text: Option<String>,
}

impl GeneratedImage {
    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the file extension matching the declared MIME type.
    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.mime_type)
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Generated SVG markup with its optional file location.
#[derive(Debug, Clone)]
#[must_use = "generated markup should be saved or processed"]
pub struct GeneratedSvg {
    /// The extracted `<svg>...</svg>` markup.
    pub markup: String,
    /// Where the markup was written, when persistence was requested.
    pub file_path: Option<PathBuf>,
}

/// Per-provider reachability, as reported by a health check.
///
/// A provider is `None` when no credential was configured for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// True if any configured provider responded.
    pub ok: bool,
    /// Gemini reachability, if configured.
    pub gemini: Option<bool>,
    /// OpenAI reachability, if configured.
    pub openai: Option<bool>,
}

impl HealthReport {
    /// Builds a report from per-provider probe results.
    pub fn new(gemini: Option<bool>, openai: Option<bool>) -> Self {
        Self {
            ok: gemini == Some(true) || openai == Some(true),
            gemini,
            openai,
        }
    }
}

/// Returns the file extension for a declared MIME type.
///
/// Unknown types fall back to `png`, matching what the providers emit when
/// they omit or mangle the type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "png",
    }
}

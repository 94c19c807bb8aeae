//! Model identifiers and the capability table that drives request shaping.

use crate::provider::ProviderKind;

/// Image generation model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageModel {
    /// Gemini 2.5 Flash Image (fast, economical).
    #[default]
    GeminiFlashImage,
    /// Gemini 3 Pro Image (highest quality, accepts an output size tier).
    GeminiProImage,
    /// DALL-E 3.
    DallE3,
}

/// What a model accepts on the wire.
///
/// Unsupported fields are silently dropped from the request, so adding a
/// model is a new row in [`ImageModel::caps`], not a conditional at the
/// call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCaps {
    /// Provider that serves this model.
    pub provider: ProviderKind,
    /// Whether the model accepts an aspect ratio.
    pub aspect_ratio: bool,
    /// Whether the model accepts an output size tier.
    pub image_size: bool,
    /// Whether the model accepts a quality setting.
    pub quality: bool,
}

impl ImageModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiFlashImage => "gemini-2.5-flash-image",
            Self::GeminiProImage => "gemini-3-pro-image-preview",
            Self::DallE3 => "dall-e-3",
        }
    }

    /// Returns the capability row for this model.
    pub fn caps(&self) -> ModelCaps {
        match self {
            Self::GeminiFlashImage => ModelCaps {
                provider: ProviderKind::Gemini,
                aspect_ratio: true,
                image_size: false,
                quality: false,
            },
            Self::GeminiProImage => ModelCaps {
                provider: ProviderKind::Gemini,
                aspect_ratio: true,
                image_size: true,
                quality: false,
            },
            Self::DallE3 => ModelCaps {
                provider: ProviderKind::OpenAi,
                aspect_ratio: true,
                image_size: false,
                quality: true,
            },
        }
    }
}

/// Text generation model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextModel {
    /// Gemini 2.5 Flash (fast, economical).
    #[default]
    GeminiFlash,
    /// Gemini 2.5 Pro (strongest reasoning).
    GeminiPro,
}

impl TextModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "gemini-2.5-flash",
            Self::GeminiPro => "gemini-2.5-pro",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_model_as_str() {
        assert_eq!(ImageModel::GeminiFlashImage.as_str(), "gemini-2.5-flash-image");
        assert_eq!(ImageModel::GeminiProImage.as_str(), "gemini-3-pro-image-preview");
        assert_eq!(ImageModel::DallE3.as_str(), "dall-e-3");
    }

    #[test]
    fn test_image_model_default() {
        assert_eq!(ImageModel::default(), ImageModel::GeminiFlashImage);
    }

    #[test]
    fn test_size_only_accepted_by_pro_model() {
        assert!(!ImageModel::GeminiFlashImage.caps().image_size);
        assert!(ImageModel::GeminiProImage.caps().image_size);
        assert!(!ImageModel::DallE3.caps().image_size);
    }

    #[test]
    fn test_quality_only_accepted_by_dalle() {
        assert!(!ImageModel::GeminiFlashImage.caps().quality);
        assert!(!ImageModel::GeminiProImage.caps().quality);
        assert!(ImageModel::DallE3.caps().quality);
    }

    #[test]
    fn test_model_provider_routing() {
        assert_eq!(ImageModel::GeminiFlashImage.caps().provider, ProviderKind::Gemini);
        assert_eq!(ImageModel::DallE3.caps().provider, ProviderKind::OpenAi);
    }

    #[test]
    fn test_text_model_as_str() {
        assert_eq!(TextModel::GeminiFlash.as_str(), "gemini-2.5-flash");
        assert_eq!(TextModel::GeminiPro.as_str(), "gemini-2.5-pro");
    }
}

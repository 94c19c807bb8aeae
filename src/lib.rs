#![warn(missing_docs)]
//! GenStudio - thin client for AI image, text, and SVG generation.
//!
//! This crate wraps the Google Gemini and OpenAI image APIs behind a single
//! client that can generate media, persist results to a local output
//! directory, and report provider health.
//!
//! # Quick Start
//!
//! ```no_run
//! use genstudio::{GenerationClient, ImageOptions};
//!
//! #[tokio::main]
//! async fn main() -> genstudio::Result<()> {
//!     let client = GenerationClient::from_env()?;
//!     let images = client
//!         .generate_image("A lighthouse at dusk", &ImageOptions::new().persist())
//!         .await?;
//!     println!("saved: {:?}", images[0].file_path);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Credentials resolve with the precedence: explicit builder argument,
//! process environment (`GOOGLE_API_KEY`, `OPENAI_API_KEY`), dotenv file
//! (`.env` in the working directory, then `~/.genstudio.env`). At least one
//! provider credential is required; generated artifacts land in a `temp`
//! directory next to the process unless configured otherwise.
//!
//! ```no_run
//! use genstudio::{ClientConfig, GenerationClient};
//!
//! # fn run() -> genstudio::Result<()> {
//! let config = ClientConfig::builder()
//!     .google_api_key("...")
//!     .output_dir("artifacts")
//!     .build()?;
//! let client = GenerationClient::new(config)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod model;
mod provider;
mod storage;
mod types;

pub use client::GenerationClient;
pub use config::{ClientConfig, ClientConfigBuilder, GOOGLE_API_KEY_VAR, OPENAI_API_KEY_VAR};
pub use error::{GenStudioError, Result};
pub use model::{ImageModel, ModelCaps, TextModel};
pub use provider::ProviderKind;
pub use types::{
    extension_for_mime, AspectRatio, GeneratedImage, GeneratedSvg, HealthReport, ImageOptions,
    ImageQuality, ImageSize, SvgOptions, TextOptions,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::GenerationClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{GenStudioError, Result};
    pub use crate::model::{ImageModel, TextModel};
    pub use crate::types::{AspectRatio, ImageOptions, SvgOptions, TextOptions};
}

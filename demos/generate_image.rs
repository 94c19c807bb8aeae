//! Basic image generation example.
//!
//! Run with: `cargo run --example generate_image`
//!
//! Requires `GOOGLE_API_KEY` (or a `.env` file providing it).

use genstudio::{GenerationClient, ImageOptions};

#[tokio::main]
async fn main() -> genstudio::Result<()> {
    let client = GenerationClient::from_env()?;

    let options = ImageOptions::new().persist().with_filename("puppy");
    let images = client
        .generate_image("A golden retriever puppy playing in snow", &options)
        .await?;

    for image in &images {
        println!(
            "Generated image: {} bytes, type: {}, saved to {:?}",
            image.size(),
            image.mime_type,
            image.file_path
        );
    }

    Ok(())
}

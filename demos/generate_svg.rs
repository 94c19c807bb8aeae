//! SVG generation example.
//!
//! Run with: `cargo run --example generate_svg`
//!
//! Requires `GOOGLE_API_KEY` (or a `.env` file providing it).

use genstudio::{GenerationClient, SvgOptions};

#[tokio::main]
async fn main() -> genstudio::Result<()> {
    let client = GenerationClient::from_env()?;

    let svg = client
        .generate_svg(
            "A yellow smiley face on a transparent background",
            &SvgOptions::new().persist().with_filename("smiley"),
        )
        .await?;

    match &svg.file_path {
        Some(path) => println!("Saved SVG to {}", path.display()),
        None => println!("{}", svg.markup),
    }

    Ok(())
}

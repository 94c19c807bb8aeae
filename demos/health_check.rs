//! Provider health check example.
//!
//! Run with: `cargo run --example health_check`
//!
//! Requires at least one of `GOOGLE_API_KEY` or `OPENAI_API_KEY`.

use genstudio::GenerationClient;

#[tokio::main]
async fn main() -> genstudio::Result<()> {
    let client = GenerationClient::from_env()?;

    let report = client.health_check().await;
    println!("ok: {}", report.ok);
    if let Some(gemini) = report.gemini {
        println!("gemini: {gemini}");
    }
    if let Some(openai) = report.openai {
        println!("openai: {openai}");
    }

    Ok(())
}

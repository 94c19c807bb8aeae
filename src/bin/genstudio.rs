//! CLI for GenStudio - AI image, text, and SVG generation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use genstudio::{
    AspectRatio, GenerationClient, ImageModel, ImageOptions, ImageQuality, ImageSize, SvgOptions,
    TextModel, TextOptions,
};

#[derive(Parser)]
#[command(name = "genstudio")]
#[command(about = "Generate images, text, and SVG markup via AI APIs (Gemini, DALL-E)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image from a text prompt
    Image(ImageArgs),

    /// Generate text from a prompt
    Text(TextArgs),

    /// Generate an SVG drawing from a prompt
    Svg(SvgArgs),

    /// Probe configured providers
    Health,

    /// List saved images in the output directory
    List,

    /// Delete saved images from the output directory
    Clear,
}

#[derive(Args)]
struct ImageArgs {
    /// The text prompt describing the image
    prompt: String,

    /// Model to generate with
    #[arg(short, long, value_enum, default_value = "gemini-flash")]
    model: ImageModelArg,

    /// Aspect ratio
    #[arg(long, value_enum)]
    aspect_ratio: Option<AspectRatioArg>,

    /// Output size tier (Gemini pro model only)
    #[arg(long, value_enum)]
    size: Option<ImageSizeArg>,

    /// Quality (DALL-E only)
    #[arg(long, value_enum)]
    quality: Option<ImageQualityArg>,

    /// Filename stem for the saved image
    #[arg(short, long)]
    output: Option<String>,

    /// Skip writing to the output directory
    #[arg(long)]
    no_save: bool,
}

#[derive(Args)]
struct TextArgs {
    /// The prompt to send
    prompt: String,

    /// Use the pro text model
    #[arg(long)]
    pro: bool,
}

#[derive(Args)]
struct SvgArgs {
    /// Description of the drawing
    prompt: String,

    /// Filename stem for the saved markup
    #[arg(short, long)]
    output: Option<String>,

    /// Skip writing to the output directory
    #[arg(long)]
    no_save: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageModelArg {
    GeminiFlash,
    GeminiPro,
    DallE3,
}

impl From<ImageModelArg> for ImageModel {
    fn from(arg: ImageModelArg) -> Self {
        match arg {
            ImageModelArg::GeminiFlash => Self::GeminiFlashImage,
            ImageModelArg::GeminiPro => Self::GeminiProImage,
            ImageModelArg::DallE3 => Self::DallE3,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AspectRatioArg {
    #[value(name = "1:1")]
    Square,
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "9:16")]
    Portrait,
    #[value(name = "4:3")]
    Standard,
    #[value(name = "3:4")]
    StandardPortrait,
}

impl From<AspectRatioArg> for AspectRatio {
    fn from(arg: AspectRatioArg) -> Self {
        match arg {
            AspectRatioArg::Square => Self::Square,
            AspectRatioArg::Landscape => Self::Landscape,
            AspectRatioArg::Portrait => Self::Portrait,
            AspectRatioArg::Standard => Self::Standard,
            AspectRatioArg::StandardPortrait => Self::StandardPortrait,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageSizeArg {
    #[value(name = "1k")]
    K1,
    #[value(name = "2k")]
    K2,
    #[value(name = "4k")]
    K4,
}

impl From<ImageSizeArg> for ImageSize {
    fn from(arg: ImageSizeArg) -> Self {
        match arg {
            ImageSizeArg::K1 => Self::K1,
            ImageSizeArg::K2 => Self::K2,
            ImageSizeArg::K4 => Self::K4,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageQualityArg {
    Standard,
    Hd,
}

impl From<ImageQualityArg> for ImageQuality {
    fn from(arg: ImageQualityArg) -> Self {
        match arg {
            ImageQualityArg::Standard => Self::Standard,
            ImageQualityArg::Hd => Self::Hd,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> genstudio::Result<()> {
    let client = GenerationClient::from_env()?;

    match cli.command {
        Commands::Image(args) => {
            let mut options = ImageOptions::new().with_model(args.model.into());
            if let Some(ratio) = args.aspect_ratio {
                options = options.with_aspect_ratio(ratio.into());
            }
            if let Some(size) = args.size {
                options = options.with_size(size.into());
            }
            if let Some(quality) = args.quality {
                options = options.with_quality(quality.into());
            }
            if !args.no_save {
                options = options.persist();
            }
            if let Some(stem) = args.output {
                options = options.with_filename(stem);
            }

            let images = client.generate_image(&args.prompt, &options).await?;
            if cli.json {
                let entries: Vec<_> = images
                    .iter()
                    .map(|image| {
                        serde_json::json!({
                            "mime_type": &image.mime_type,
                            "bytes": image.size(),
                            "path": &image.file_path,
                            "text": &image.text,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for image in &images {
                    match &image.file_path {
                        Some(path) => {
                            println!("{} ({} bytes)", path.display(), image.size());
                        }
                        None => println!("{} bytes ({})", image.size(), image.mime_type),
                    }
                }
            }
        }
        Commands::Text(args) => {
            let model = if args.pro {
                TextModel::GeminiPro
            } else {
                TextModel::GeminiFlash
            };
            let text = client
                .generate_text(&args.prompt, &TextOptions::new().with_model(model))
                .await?;
            if cli.json {
                println!("{}", serde_json::json!({ "text": text }));
            } else {
                println!("{text}");
            }
        }
        Commands::Svg(args) => {
            let mut options = SvgOptions::new();
            if !args.no_save {
                options = options.persist();
            }
            if let Some(stem) = args.output {
                options = options.with_filename(stem);
            }

            let svg = client.generate_svg(&args.prompt, &options).await?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "markup": svg.markup, "path": svg.file_path })
                );
            } else if let Some(path) = &svg.file_path {
                println!("{}", path.display());
            } else {
                println!("{}", svg.markup);
            }
        }
        Commands::Health => {
            let report = client.health_check().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("ok: {}", report.ok);
                if let Some(gemini) = report.gemini {
                    println!("gemini: {gemini}");
                }
                if let Some(openai) = report.openai {
                    println!("openai: {openai}");
                }
            }
            if !report.ok {
                std::process::exit(1);
            }
        }
        Commands::List => {
            let paths = client.list_saved_images()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                for path in &paths {
                    println!("{}", path.display());
                }
            }
        }
        Commands::Clear => {
            let deleted = client.clear_saved_images()?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                println!("deleted {deleted} image(s)");
            }
        }
    }

    Ok(())
}

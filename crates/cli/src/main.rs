use headshot_core::{
    Adjustment, AppError, Config, ImageProcessor, PromptMode, Studio, init,
    adjustments::Axis,
    image_processing::ImageFormat,
    styles,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a casual photo into a styled headshot", long_about = None)]
struct Args {
    /// Photo to transform
    #[arg(required_unless_present = "list_styles")]
    input: Option<PathBuf>,

    /// Style preset id (see --list-styles)
    #[arg(short, long, default_value = "corporate")]
    style: String,

    /// Free-text instruction; switches to custom mode and ignores adjustments
    #[arg(short, long)]
    prompt: Option<String>,

    /// Lighting: default, soft, dramatic, natural
    #[arg(long)]
    lighting: Option<String>,

    /// Background blur: default, subtle, strong
    #[arg(long)]
    blur: Option<String>,

    /// Color temperature: default, warm, cool
    #[arg(long)]
    temperature: Option<String>,

    /// Tint: none, blue, gold, sepia, bw
    #[arg(long)]
    tint: Option<String>,

    /// Where to write the result (defaults to <input>-<style>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the model defined in .env
    #[arg(short, long)]
    model: Option<String>,

    /// Print the instruction text and exit without calling the API
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,

    /// List available style presets and exit
    #[arg(long)]
    list_styles: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    style_id: &'a str,
    instruction: &'a str,
    output: Option<&'a Path>,
    detected_format: Option<String>,
    history_id: Option<&'a str>,
    created_at: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Handle --list-styles
    if args.list_styles {
        println!("Available styles:");
        for style in styles::list_styles() {
            println!("  {:<10} {} - {}", style.id, style.display_name, style.description);
        }
        return Ok(());
    }

    let Some(input) = args.input.clone() else {
        bail!("an input image is required");
    };

    // Load config and override model if specified via CLI
    let config = load_config(args.model.as_deref(), args.dry_run)?;
    let mut studio = Studio::with_config(config).context("Failed to initialize Gemini client")?;

    studio
        .upload_file(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    configure(&mut studio, &args)?;

    let instruction = studio
        .session()
        .current_prompt()
        .context("Nothing to generate")?;
    let style_id = studio.session().current_style_id()?;

    if args.dry_run {
        if args.json {
            let report = Report {
                style_id,
                instruction: &instruction,
                output: None,
                detected_format: None,
                history_id: None,
                created_at: None,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", instruction);
        }
        return Ok(());
    }

    if !args.json {
        eprintln!("Generating with {}...", studio.config().model_name);
    }

    let image = match studio.generate().await {
        Ok(image) => image,
        Err(AppError::GenerationFailed(message)) => bail!("Generation failed: {}", message),
        Err(e) => return Err(e).context("Generation failed"),
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input, style_id, image.detected_format));

    let wants_png = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    let bytes = if wants_png { image.to_png_bytes()? } else { image.to_bytes()? };
    fs::write(&output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;

    let latest = studio.session().history().latest();
    if args.json {
        let report = Report {
            style_id,
            instruction: &instruction,
            output: Some(&output),
            detected_format: image.detected_format.map(|f| f.to_mime_type().to_string()),
            history_id: latest.map(|item| item.id.as_str()),
            created_at: latest.map(|item| item.created_at.to_rfc3339()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Saved {} ({})", output.display(), style_id);
    }

    Ok(())
}

fn load_config(model: Option<&str>, dry_run: bool) -> Result<Config> {
    let loaded = Config::load();
    let config = match (loaded, dry_run) {
        (Ok(config), _) => config,
        // A dry run never calls the API, so a placeholder key is enough
        (Err(_), true) => Config::builder().with_api_key("dry-run").build()?,
        (Err(e), false) => return Err(e).context("Failed to load configuration"),
    };

    match model {
        Some(m) => Ok(Config::builder()
            .with_api_key(config.gemini_api_key)
            .with_model(m)
            .with_base_url(config.base_url.to_string())
            .build()?),
        None => Ok(config),
    }
}

/// Applies mode, style and adjustment flags to the session.
fn configure(studio: &mut Studio, args: &Args) -> Result<()> {
    let session = studio.session_mut();

    if let Some(prompt) = &args.prompt {
        session.select_mode(PromptMode::Custom);
        session.set_custom_text(prompt.clone());
    } else {
        session.select_mode(PromptMode::Preset);
        session
            .select_style(&args.style)
            .context("Try --list-styles to see available presets")?;
    }

    let flags = [
        (Axis::Lighting, &args.lighting),
        (Axis::Blur, &args.blur),
        (Axis::Temperature, &args.temperature),
        (Axis::Tint, &args.tint),
    ];
    for (axis, value) in flags {
        if let Some(value) = value {
            let adjustment = Adjustment::parse(axis.as_str(), value)
                .with_context(|| format!("Valid {} values: {}", axis, axis.options().join(", ")))?;
            session.set_adjustment(adjustment);
        }
    }

    if args.prompt.is_some() && !session.adjustments().is_neutral() {
        tracing::warn!("adjustments only apply to presets and are ignored with --prompt");
    }

    Ok(())
}

fn default_output_path(input: &Path, style_id: &str, format: Option<ImageFormat>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "headshot".to_string());
    let ext = format.map_or("png", ImageProcessor::extension_for);
    input.with_file_name(format!("{}-{}.{}", stem, style_id, ext))
}

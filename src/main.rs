use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use uimock::input::InputSource;
use uimock::pipeline::{generate, GenerateRequest};
use uimock::{new_generator, GeneratorConfig, GeneratorKind, ImageFormat, RenderOptions};

/// Generate UI mockup images from declarative component JSON.
#[derive(Parser, Debug)]
#[command(name = "uimock", version, about)]
struct Cli {
    /// Path to the UI JSON (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output image path (defaults to mock.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output image format
    #[arg(short, long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Render backend
    #[arg(short, long, value_enum, default_value_t = GeneratorChoice::Gemini)]
    generator: GeneratorChoice,

    /// Image size hint, e.g. 1024x768
    #[arg(long)]
    size: Option<String>,

    /// Theme name forwarded to the backend
    #[arg(long)]
    theme: Option<String>,

    /// Emit the full report as one JSON line on stdout
    #[arg(long)]
    json: bool,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    force: bool,

    /// Deadline for the remote render call in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Emit debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratorChoice {
    Gemini,
    Mock,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "uimock=debug" } else { "uimock=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        api_key: std::env::var("GEMINI_API_KEY").ok(),
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    };

    let kind = match cli.generator {
        GeneratorChoice::Gemini => GeneratorKind::Gemini,
        GeneratorChoice::Mock => GeneratorKind::Mock,
    };
    let generator = new_generator(kind, &config)?;

    let input = match cli.input {
        Some(path) => InputSource::Path(path),
        None => InputSource::stdin(),
    };

    let report = generate(
        &generator,
        GenerateRequest {
            input,
            output: cli.output,
            options: RenderOptions {
                size: cli.size,
                theme: cli.theme,
                format: match cli.format {
                    FormatChoice::Png => ImageFormat::Png,
                    FormatChoice::Jpeg => ImageFormat::Jpeg,
                },
            },
            force: cli.force,
        },
    )
    .await?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.output_path.display());
    }
    Ok(())
}

//! UI Mockup Generator
//!
//! Turns a declarative UI description (a JSON tree of typed components) into
//! a rendered mockup image by delegating to an image-generation backend, then
//! persists the result to disk.
//!
//! # Backends
//!
//! - **Gemini** (default): submits the UI description to Google's multimodal
//!   generation endpoint and extracts the returned image bytes
//! - **Mock**: returns a fixed 1x1 image, for deterministic tests and offline
//!   operation
//!
//! # Example
//!
//! ```no_run
//! use uimock::input::InputSource;
//! use uimock::pipeline::{generate, GenerateRequest};
//! use uimock::{new_generator, GeneratorConfig, GeneratorKind, ImageFormat, RenderOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = new_generator(GeneratorKind::Mock, &GeneratorConfig::default())?;
//! let report = generate(
//!     &generator,
//!     GenerateRequest {
//!         input: InputSource::Path("ui.json".into()),
//!         output: None,
//!         options: RenderOptions {
//!             format: ImageFormat::Png,
//!             ..Default::default()
//!         },
//!         force: false,
//!     },
//! )
//! .await?;
//! println!("{}", report.output_path.display());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde_json::Value;

pub mod error;
pub use error::{Error, Result};

pub mod gemini;
pub mod input;
pub mod mock;
pub mod output;
pub mod pipeline;
pub mod validate;

/// Configuration consumed by render generators
///
/// The CLI shell populates this from the process environment (`GEMINI_API_KEY`)
/// and its flags; generators never read the environment themselves, which
/// keeps render calls testable without process-level mutation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Credential for the remote backend
    pub api_key: Option<String>,
    /// Model identifier submitted to the remote endpoint
    pub model: String,
    /// Base URL of the generation endpoint (overridable for tests)
    pub base_url: String,
    /// Deadline for a single remote render call in milliseconds
    pub timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-pro-image-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Output image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// File extension, also used as the format name sent to the backend
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options forwarded to a render call
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Free-form dimension hint such as `1080x1920`
    pub size: Option<String>,
    /// Theme name forwarded verbatim to the backend
    pub theme: Option<String>,
    /// Requested image encoding
    pub format: ImageFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: None,
            theme: None,
            format: ImageFormat::Png,
        }
    }
}

/// Image bytes produced by a render call, plus any non-fatal warnings
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Encoded image, or a degraded raw-text payload flagged in `warnings`
    pub bytes: Vec<u8>,
    /// Non-fatal degradations observed while extracting the payload
    pub warnings: Vec<String>,
}

/// Which backend to render with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Gemini,
    Mock,
}

/// A render backend selected at runtime
///
/// Modeled as a tagged variant so the pipeline stays agnostic to backend
/// identity: it only ever sees [`Generator::render`] and [`Generator::name`].
#[derive(Debug)]
pub enum Generator {
    /// Remote Gemini backend
    Gemini(gemini::GeminiGenerator),
    /// Deterministic offline stub
    Mock(mock::MockGenerator),
}

impl Generator {
    /// Identifier reported in the generation summary
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Gemini(_) => "gemini",
            Generator::Mock(_) => "mock",
        }
    }

    /// Render the UI description to image bytes. Single attempt, no retry.
    pub async fn render(&self, ui: &Value, options: &RenderOptions) -> Result<Rendered> {
        match self {
            Generator::Gemini(generator) => generator.render(ui, options).await,
            Generator::Mock(generator) => generator.render(ui, options).await,
        }
    }
}

/// Create a generator for the requested backend.
///
/// Fails with a configuration error when the remote backend is selected and
/// no credential is present in `config`.
pub fn new_generator(kind: GeneratorKind, config: &GeneratorConfig) -> Result<Generator> {
    match kind {
        GeneratorKind::Gemini => Ok(Generator::Gemini(gemini::GeminiGenerator::new(config)?)),
        GeneratorKind::Mock => Ok(Generator::Mock(mock::MockGenerator::new())),
    }
}

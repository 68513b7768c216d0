//! The generation pipeline: read, validate, render, write.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::input::{self, InputSource};
use crate::{output, validate};
use crate::{Error, Generator, RenderOptions, Result};

/// One end-to-end generation request
#[derive(Debug)]
pub struct GenerateRequest {
    /// Where to read the UI description from
    pub input: InputSource,
    /// Explicit output path; `mock.<format>` when absent
    pub output: Option<PathBuf>,
    /// Options forwarded to the render call
    pub options: RenderOptions,
    /// Overwrite an existing output file
    pub force: bool,
}

/// Summary of a completed invocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    /// Literal success marker
    pub status: &'static str,
    /// Resolved path the image was written to
    pub output_path: PathBuf,
    /// Which backend produced the image
    pub generator: &'static str,
    /// Wall-clock time of the render and write steps, in milliseconds
    pub duration_ms: u64,
    /// Non-fatal degradations observed along the way
    pub warnings: Vec<String>,
}

/// Run the full pipeline against the given generator.
///
/// Strictly linear: each step either advances to the next or terminates the
/// invocation with that step's characteristic error. Nothing is retried.
/// The reported duration starts just before the render call, the dominant
/// cost of an invocation.
pub async fn generate(generator: &Generator, request: GenerateRequest) -> Result<GenerateReport> {
    let text = input::read_input(request.input).await?;
    let ui = input::parse_ui(&text)?;

    let validation = validate::validate_ui(&ui);
    if !validation.valid {
        return Err(Error::Validation(validation.errors.join(", ")));
    }

    debug!(generator = generator.name(), "rendering UI description");
    let started = Instant::now();
    let rendered = generator.render(&ui, &request.options).await?;
    let output_path = output::write_output(
        &rendered.bytes,
        request.output.as_deref(),
        request.options.format,
        request.force,
    )?;
    let duration_ms = started.elapsed().as_millis() as u64;

    Ok(GenerateReport {
        status: "success",
        output_path,
        generator: generator.name(),
        duration_ms,
        warnings: rendered.warnings,
    })
}

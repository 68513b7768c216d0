//! Remote generator backed by Google's Gemini image generation endpoint.
//!
//! The response envelope is heterogeneous across model versions: image bytes
//! may arrive as an inline-data part, as an image-tagged file reference, or
//! embedded in a text part as a `base64:<data>` marker. Extraction tries each
//! shape in a fixed priority order (see [`extract_image`]); only when every
//! structured shape is exhausted does it fall back to the aggregate text,
//! which is surfaced with a warning rather than silently passed off as an
//! image.

use std::sync::OnceLock;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Error, GeneratorConfig, RenderOptions, Rendered, Result};

const DEFAULT_SIZE: &str = "1080x1920";
const DEFAULT_THEME: &str = "default";

fn base64_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"base64:([A-Za-z0-9+/=]+)").unwrap())
}

fn auth_tokens() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)unauthorized|permission|auth|401|api.?key").unwrap())
}

/// Generator that submits the UI description to the Gemini `generateContent`
/// endpoint and extracts image bytes from the reply.
#[derive(Debug)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_ms: u64,
}

impl GeminiGenerator {
    /// Create a generator from explicit configuration.
    ///
    /// Fails when no API credential is configured. Nothing else is checked
    /// until the first render call.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Render the UI description remotely.
    ///
    /// Single attempt, raced against the configured deadline; losing the race
    /// drops the in-flight request and reports a timeout.
    pub async fn render(&self, ui: &Value, options: &RenderOptions) -> Result<Rendered> {
        let request = GenerateContentRequest::from_ui(ui, options);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = %self.model, "submitting render request");

        let deadline = Duration::from_millis(self.timeout_ms);
        let response = tokio::time::timeout(deadline, self.submit(&url, &request))
            .await
            .map_err(|_| Error::Timeout(self.timeout_ms))??;

        extract_image(&response)
    }

    async fn submit(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_failure(&e.to_string(), None))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(&body, Some(status)));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::Provider(format!("malformed response: {e}")))
    }
}

/// Map a failed transport call or error body onto the error taxonomy.
///
/// The status code is authoritative when one is available; otherwise the
/// message is sniffed for auth-indicative tokens. Upstream wording is not a
/// stable contract, so anything that stays unclassified is logged before
/// being surfaced as a generic failure.
fn classify_failure(message: &str, status: Option<reqwest::StatusCode>) -> Error {
    use reqwest::StatusCode;

    if matches!(status, Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN))
        || auth_tokens().is_match(message)
    {
        return Error::Auth("invalid or rejected GEMINI_API_KEY".to_string());
    }

    warn!("unclassified generator failure: {message}");
    match status {
        Some(status) => Error::Provider(format!("{status}: {message}")),
        None => Error::Provider(message.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl GenerateContentRequest {
    fn from_ui(ui: &Value, options: &RenderOptions) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(ui, options),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            },
        }
    }
}

/// Build the natural-language instruction, embedding the full UI description
/// verbatim rather than a summary of it.
fn build_prompt(ui: &Value, options: &RenderOptions) -> String {
    let size = options.size.as_deref().unwrap_or(DEFAULT_SIZE);
    let theme = options.theme.as_deref().unwrap_or(DEFAULT_THEME);
    let ui_json = serde_json::to_string_pretty(ui).unwrap_or_else(|_| ui.to_string());

    format!(
        "Generate a UI mockup image. Follow these rules EXACTLY:\n\
         \n\
         RENDERING RULES:\n\
         - Render as a flat 2D screen capture, NO device frame or bezels\n\
         - Use exact dimensions: {size} pixels\n\
         - Encode the image as {format}\n\
         - Use EXACTLY the colors specified in the JSON (backgroundColor, etc.)\n\
         - Render components in EXACT order listed, top to bottom\n\
         - Use system default sans-serif font (SF Pro, Roboto, or similar)\n\
         - Match spacing/padding values from JSON precisely in pixels\n\
         - Style: clean, minimal, production-ready UI screenshot\n\
         \n\
         COMPONENT RENDERING:\n\
         - textInput: rounded rectangle with label above, placeholder text inside\n\
         - button[style=primary]: solid filled rounded rectangle\n\
         - button[style=outline]: transparent with border\n\
         - checkbox: small square with checkmark when checked\n\
         - link: underlined text\n\
         - divider: thin horizontal line with centered label\n\
         - row/column: flex container with specified spacing\n\
         \n\
         Theme: {theme}\n\
         \n\
         UI JSON:\n\
         {ui_json}",
        format = options.format,
    )
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<BlobPart>,
    file_data: Option<FilePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobPart {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilePart {
    mime_type: Option<String>,
    /// Some deployments inline the referenced bytes here instead of a URI
    data: Option<String>,
    #[allow(dead_code)]
    file_uri: Option<String>,
}

/// Normalize the response envelope into image bytes.
///
/// Attempts, in priority order: inline image data, an image-tagged file
/// reference, a `base64:` marker inside a text part, and finally the
/// aggregate text itself (decoded when marked, raw bytes otherwise). The raw
/// text path is a deliberate degraded outcome and is reported through
/// [`Rendered::warnings`].
fn extract_image(response: &GenerateContentResponse) -> Result<Rendered> {
    let parts: &[ResponsePart] = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or(&[]);

    if parts.is_empty() {
        return Err(Error::Provider("no image in response".to_string()));
    }

    let attempts: [fn(&[ResponsePart]) -> Result<Option<Vec<u8>>>; 3] =
        [from_inline_data, from_file_data, from_text_marker];
    for attempt in attempts {
        if let Some(bytes) = attempt(parts)? {
            return Ok(Rendered {
                bytes,
                warnings: Vec::new(),
            });
        }
    }

    from_aggregate_text(parts)
}

fn is_image_mime(mime: Option<&str>) -> bool {
    mime.is_some_and(|m| m.starts_with("image/"))
}

fn decode_payload(data: &str, origin: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| Error::Provider(format!("invalid base64 in {origin}: {e}")))
}

fn from_inline_data(parts: &[ResponsePart]) -> Result<Option<Vec<u8>>> {
    for part in parts {
        if let Some(blob) = &part.inline_data {
            if is_image_mime(blob.mime_type.as_deref()) {
                if let Some(data) = &blob.data {
                    return decode_payload(data, "inline image data").map(Some);
                }
            }
        }
    }
    Ok(None)
}

fn from_file_data(parts: &[ResponsePart]) -> Result<Option<Vec<u8>>> {
    for part in parts {
        if let Some(file) = &part.file_data {
            if is_image_mime(file.mime_type.as_deref()) {
                if let Some(data) = &file.data {
                    return decode_payload(data, "file reference data").map(Some);
                }
            }
        }
    }
    Ok(None)
}

fn from_text_marker(parts: &[ResponsePart]) -> Result<Option<Vec<u8>>> {
    for part in parts {
        if let Some(text) = &part.text {
            if let Some(captures) = base64_marker().captures(text) {
                return decode_payload(&captures[1], "text marker").map(Some);
            }
        }
    }
    Ok(None)
}

fn from_aggregate_text(parts: &[ResponsePart]) -> Result<Rendered> {
    let text = parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");

    // A marker can straddle part boundaries; the per-part scan above
    // cannot see it.
    if let Some(captures) = base64_marker().captures(&text) {
        if let Ok(bytes) = STANDARD.decode(&captures[1]) {
            return Ok(Rendered {
                bytes,
                warnings: Vec::new(),
            });
        }
    }

    if text.is_empty() {
        return Err(Error::Provider("no image in response".to_string()));
    }

    warn!("no image in response; writing raw text payload");
    Ok(Rendered {
        bytes: text.into_bytes(),
        warnings: vec!["no image in response; wrote raw text payload".to_string()],
    })
}

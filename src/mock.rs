//! A deterministic, offline generator that returns fixed 1x1 images.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use crate::{ImageFormat, RenderOptions, Rendered, Result};

/// 1x1 black PNG
const PNG_1X1: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR4nGNgYAAAAAMAASsJTYQAAAAASUVORK5CYII=";

/// 1x1 black baseline JPEG
const JPEG_1X1: &str =
    "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDABALDA4MChAODQ4SERATGCgaGBYWGDEjJR0oOjM9PDkzODdASFxOQERXRTc4UG1RV19iZ2hnPk1xeXBkeFxlZ2P/wAALCAABAAEBAREA/8QAHwAAAQUBAQEBAQEAAAAAAAAAAAECAwQFBgcICQoL/8QAtRAAAgEDAwIEAwUFBAQAAAF9AQIDAAQRBRIhMUEGE1FhByJxFDKBkaEII0KxwRVS0fAkM2JyggkKFhcYGRolJicoKSo0NTY3ODk6Q0RFRkdISUpTVFVWV1hZWmNkZWZnaGlqc3R1dnd4eXqDhIWGh4iJipKTlJWWl5iZmqKjpKWmp6ipqrKztLW2t7i5usLDxMXGx8jJytLT1NXW19jZ2uHi4+Tl5ufo6erx8vP09fb3+Pn6/9oACAEBAAA/ACv/2Q==";

/// Generator that ignores the UI description entirely and returns a fixed
/// minimal image in the requested format.
///
/// The payload is stable across calls, which makes it suitable for golden
/// tests and offline runs. It never fails.
#[derive(Debug, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        MockGenerator
    }

    pub async fn render(&self, _ui: &Value, options: &RenderOptions) -> Result<Rendered> {
        let encoded = match options.format {
            ImageFormat::Png => PNG_1X1,
            ImageFormat::Jpeg => JPEG_1X1,
        };
        let bytes = STANDARD.decode(encoded).expect("embedded image constant");
        Ok(Rendered {
            bytes,
            warnings: Vec::new(),
        })
    }
}

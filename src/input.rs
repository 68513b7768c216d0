//! Input acquisition: a file path or a buffered stream, parsed into a UI
//! description.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{Error, Result};

/// Where the UI description text comes from
pub enum InputSource {
    /// Read the whole file at this path
    Path(PathBuf),
    /// Drain this stream to completion (stdin in the CLI, byte slices in tests)
    Reader(Box<dyn AsyncRead + Unpin + Send>),
}

impl InputSource {
    /// Stdin as an input source
    pub fn stdin() -> Self {
        InputSource::Reader(Box::new(tokio::io::stdin()))
    }
}

impl From<PathBuf> for InputSource {
    fn from(path: PathBuf) -> Self {
        InputSource::Path(path)
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            InputSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// Read the full input text.
///
/// No deadline is applied: the source is assumed to be finite and locally
/// available (a file or redirected stdin), never a long-lived network stream.
pub async fn read_input(source: InputSource) -> Result<String> {
    match source {
        InputSource::Path(path) => Ok(tokio::fs::read_to_string(&path).await?),
        InputSource::Reader(mut reader) => {
            let mut text = String::new();
            reader.read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Parse input text as a single JSON document.
pub fn parse_ui(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_stream_to_completion() {
        let source = InputSource::Reader(Box::new(std::io::Cursor::new(
            br#"{"components": []}"#.to_vec(),
        )));
        let text = read_input(source).await.unwrap();
        assert_eq!(text, r#"{"components": []}"#);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = InputSource::Path(PathBuf::from("definitely/not/here.json"));
        let err = read_input(source).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn parse_error_reads_as_invalid_json() {
        let err = parse_ui("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn parses_a_component_tree() {
        let ui = parse_ui(r#"{"components": [{"type": "button", "props": {"label": "Go"}}]}"#)
            .unwrap();
        assert!(ui["components"].is_array());
    }
}

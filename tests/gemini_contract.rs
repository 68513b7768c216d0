//! Contract tests for the Gemini backend against a local fake endpoint.
//!
//! A tiny_http server stands in for the remote API so the full
//! request/response cycle runs, including status-code classification and the
//! response-extraction fallback chain.

use std::fs;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use tiny_http::{Header, Response, Server};

use uimock::input::InputSource;
use uimock::pipeline::{generate, GenerateRequest};
use uimock::{new_generator, Error, GeneratorConfig, GeneratorKind, ImageFormat, RenderOptions};

/// Serve a single canned response, then let the server thread wind down.
fn serve_once(body: String, status: u16) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = Response::from_string(body).with_status_code(status).with_header(
                "Content-Type: application/json"
                    .parse::<Header>()
                    .unwrap(),
            );
            let _ = request.respond(response);
        }
    });
    format!("http://{}", addr)
}

fn config(base_url: String) -> GeneratorConfig {
    GeneratorConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        ..Default::default()
    }
}

fn ui() -> serde_json::Value {
    json!({"components": [{"type": "div", "props": {}}]})
}

fn options() -> RenderOptions {
    RenderOptions {
        format: ImageFormat::Png,
        ..Default::default()
    }
}

fn inline_image_response(bytes: &[u8]) -> String {
    json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"text": "Here is your mockup."},
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(bytes)}}
                ]
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn inline_image_data_round_trips() {
    let base_url = serve_once(inline_image_response(b"fake-png-bytes"), 200);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let rendered = generator.render(&ui(), &options()).await.unwrap();
    assert_eq!(rendered.bytes, b"fake-png-bytes");
    assert!(rendered.warnings.is_empty());
}

#[tokio::test]
async fn text_marker_fallback_round_trips() {
    let payload = STANDARD.encode(b"marker-image");
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": format!("no inline part, but base64:{payload}")}]}
        }]
    })
    .to_string();
    let base_url = serve_once(body, 200);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let rendered = generator.render(&ui(), &options()).await.unwrap();
    assert_eq!(rendered.bytes, b"marker-image");
}

#[tokio::test]
async fn raw_text_reply_degrades_with_warning() {
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "I am unable to generate images right now."}]}
        }]
    })
    .to_string();
    let base_url = serve_once(body, 200);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let rendered = generator.render(&ui(), &options()).await.unwrap();
    assert_eq!(
        rendered.bytes,
        b"I am unable to generate images right now."
    );
    assert_eq!(rendered.warnings.len(), 1);
}

#[tokio::test]
async fn empty_response_reports_no_image() {
    let base_url = serve_once(json!({"candidates": []}).to_string(), 200);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let err = generator.render(&ui(), &options()).await.unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
    assert!(err.to_string().contains("no image in response"));
}

#[tokio::test]
async fn unauthorized_status_maps_to_auth_error() {
    let body = json!({"error": {"code": 401, "message": "API key not valid", "status": "UNAUTHENTICATED"}})
        .to_string();
    let base_url = serve_once(body, 401);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let err = generator.render(&ui(), &options()).await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn server_error_maps_to_provider_error() {
    let body = json!({"error": {"code": 500, "message": "internal failure"}}).to_string();
    let base_url = serve_once(body, 500);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let err = generator.render(&ui(), &options()).await.unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
    assert!(err.to_string().contains("internal failure"));
}

#[tokio::test]
async fn stalled_server_times_out_within_bound() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        // Accept the request, then hold the connection open well past the
        // render deadline.
        if let Ok(request) = server.recv() {
            std::thread::sleep(Duration::from_secs(2));
            let _ = request.respond(Response::from_string("too late"));
        }
    });

    let mut cfg = config(format!("http://{}", addr));
    cfg.timeout_ms = 5;
    let generator = new_generator(GeneratorKind::Gemini, &cfg).unwrap();

    let started = Instant::now();
    let err = generator.render(&ui(), &options()).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, Error::Timeout(5)));
    assert!(
        elapsed < Duration::from_millis(50),
        "timeout took too long: {elapsed:?}"
    );
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let err = new_generator(
        GeneratorKind::Gemini,
        &GeneratorConfig {
            api_key: None,
            ..Default::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("GEMINI_API_KEY not set"));
}

#[tokio::test]
async fn full_pipeline_writes_remote_image_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("remote.png");

    let base_url = serve_once(inline_image_response(b"pipeline-image"), 200);
    let generator = new_generator(GeneratorKind::Gemini, &config(base_url)).unwrap();

    let report = generate(
        &generator,
        GenerateRequest {
            input: InputSource::Reader(Box::new(std::io::Cursor::new(
                br#"{"components":[{"type":"div","props":{}}]}"#.to_vec(),
            ))),
            output: Some(target.clone()),
            options: options(),
            force: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(report.status, "success");
    assert_eq!(report.generator, "gemini");
    assert_eq!(fs::read(&target).unwrap(), b"pipeline-image");
}

//! Tests for the Gemini REST client against a local HTTP server.

use base64::Engine;
use futures_util::StreamExt;
use serde_json::Value;
use storybook_core::{ArtStyle, GenerateRequest, GenerationSettings, Modality, StorybookSettings};
use storybook_error::{GeminiErrorKind, StorybookErrorKind};
use storybook_models::{GeminiClient, StoryGenerator, StorybookDriver};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// What the server saw of the single request it accepted.
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Accept one connection, record the request, answer with `status` and `body`.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: String,
) -> anyhow::Result<(String, JoinHandle<anyhow::Result<Received>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}/v1beta", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await?;
            anyhow::ensure!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        let length = headers
            .iter()
            .find(|(key, _)| key == "content-length")
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + length {
            let n = socket.read(&mut chunk).await?;
            anyhow::ensure!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[header_end..header_end + length]).into_owned();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        Ok::<_, anyhow::Error>(Received {
            request_line,
            headers,
            body: request_body,
        })
    });

    Ok((base_url, handle))
}

fn request(model: &str) -> GenerateRequest {
    GenerateRequest::new(
        model,
        "Tell me about a dragon",
        GenerationSettings::builder()
            .temperature(0.5_f32)
            .response_modalities(vec![Modality::Text, Modality::Image])
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn posts_to_stream_endpoint_with_key_header() -> anyhow::Result<()> {
    let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Once upon\"}]}}]}\n\n\
                data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\" a time\"}]},\"finishReason\":\"STOP\"}]}\n\n";
    let (base_url, server) = serve_once("200 OK", "text/event-stream", body.to_string()).await?;

    let client = GeminiClient::new("test-key", format!("{}/", base_url))?;
    let stream = client.stream_content(&request("gemini-test")).await?;
    let chunks: Vec<_> = stream.collect().await;

    let mut text = String::new();
    for chunk in chunks {
        text.push_str(&chunk?.text());
    }
    assert_eq!(text, "Once upon a time");

    let received = server.await??;
    assert_eq!(
        received.request_line,
        "POST /v1beta/models/gemini-test:streamGenerateContent?alt=sse HTTP/1.1"
    );
    assert_eq!(received.header("x-goog-api-key"), Some("test-key"));

    let sent: Value = serde_json::from_str(&received.body)?;
    assert_eq!(sent["contents"][0]["parts"][0]["text"], "Tell me about a dragon");
    assert_eq!(sent["generationConfig"]["temperature"], 0.5);
    assert_eq!(
        sent["generationConfig"]["responseModalities"],
        serde_json::json!(["TEXT", "IMAGE"])
    );
    Ok(())
}

#[tokio::test]
async fn error_status_maps_to_http_error() -> anyhow::Result<()> {
    let (base_url, server) =
        serve_once("503 Service Unavailable", "text/plain", "overloaded".to_string()).await?;

    let client = GeminiClient::new("test-key", base_url)?;
    let err = match client.stream_content(&request("m")).await {
        Ok(_) => anyhow::bail!("expected an HTTP error"),
        Err(e) => e,
    };

    match err.kind() {
        StorybookErrorKind::Gemini(e) => assert_eq!(
            e.kind,
            GeminiErrorKind::HttpError {
                status_code: 503,
                message: "overloaded".to_string(),
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
    server.await??;
    Ok(())
}

#[tokio::test]
async fn sse_inline_data_becomes_image() -> anyhow::Result<()> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(PNG_BYTES);
    let body = format!(
        "data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"text\":\"Here it is.\"}}]}}}}]}}\n\n\
         data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"inlineData\":{{\"mimeType\":\"image/png\",\"data\":\"{}\"}}}}]}}}}]}}\n\n",
        encoded
    );
    let (base_url, server) = serve_once("200 OK", "text/event-stream", body).await?;

    let settings = StorybookSettings::default();
    let image_model = settings.gemini().image_model().clone();
    let generator = StoryGenerator::new(GeminiClient::new("test-key", base_url)?, settings);

    let image = generator.generate_image("a dragon", ArtStyle::Watercolor).await?;
    assert_eq!(image.mime_type(), "image/png");
    assert_eq!(image.data(), PNG_BYTES);

    let received = server.await??;
    assert!(
        received
            .request_line
            .contains(&format!("/models/{}:streamGenerateContent", image_model)),
        "{}",
        received.request_line
    );
    Ok(())
}

#[test]
fn client_reports_gemini_provider() -> anyhow::Result<()> {
    let client = GeminiClient::new("test-key", "http://localhost/v1beta")?;
    assert_eq!(client.provider_name(), "gemini");
    assert!(client.endpoint("m").ends_with("/v1beta/models/m:streamGenerateContent?alt=sse"));
    Ok(())
}

#[test]
fn blank_key_is_rejected() {
    let err = GeminiClient::new("  ", "http://localhost/v1beta").unwrap_err();
    assert!(matches!(
        err.kind(),
        StorybookErrorKind::Gemini(e) if e.kind == GeminiErrorKind::MissingApiKey
    ));
}

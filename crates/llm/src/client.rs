use async_trait::async_trait;
use reqwest::Client;
use studygen_common::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use studygen_common::{AppConfig, Result, StudyGenError};
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini `generateContent` API client
#[derive(Clone)]
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    /// Create client for the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(
            format!("{}/{}:generateContent", DEFAULT_BASE_URL, DEFAULT_MODEL),
            api_key,
        )
    }

    /// Create client from application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_endpoint(config.endpoint_url(), config.api_key.clone())
    }

    /// Create client for an explicit `generateContent` URL
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        // No explicit timeout: a call runs until the transport gives up
        let client = Client::builder()
            .build()
            .map_err(|e| StudyGenError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Gemini client initialized: {}", endpoint);
        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Single attempt to generate text
    async fn try_generate(&self, request: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| StudyGenError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StudyGenError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(StudyGenError::http_status(status.as_u16(), body));
        }

        extract_text(&body)
    }
}

/// Pull the first generated text part out of a success body
pub fn extract_text(body: &str) -> Result<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| StudyGenError::malformed(format!("Response is not valid JSON: {}", e)))?;

    parsed
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| StudyGenError::malformed("Invalid response from Gemini API"))
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending generateContent request - Endpoint: {}, Prompt length: {}",
            self.endpoint,
            prompt.chars().count()
        );

        let request = GenerateContentRequest::from_prompt(prompt);
        let text = self.try_generate(&request).await?;

        debug!("Received response from Gemini - Length: {}", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("secret").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_client_from_config() {
        let config = AppConfig {
            api_key: "k".into(),
            base_url: "http://localhost:9000/models".into(),
            model: "test-model".into(),
            ..AppConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/models/test-model:generateContent");
    }

    #[test]
    fn test_extract_text() {
        let body =
            r##"{"candidates":[{"content":{"parts":[{"text":"# Topic"},{"text":"ignored"}]}}]}"##;
        assert_eq!(extract_text(body).unwrap(), "# Topic");
    }

    #[test]
    fn test_extract_text_malformed() {
        let err = extract_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap_err();
        assert!(matches!(err, StudyGenError::MalformedResponse(_)));

        let err = extract_text("<html>not json</html>").unwrap_err();
        assert!(matches!(err, StudyGenError::MalformedResponse(_)));

        // Wrong type at a level of the path
        let err = extract_text(r#"{"candidates":"nope"}"#).unwrap_err();
        assert!(matches!(err, StudyGenError::MalformedResponse(_)));
    }

    /// Serve one canned HTTP response on localhost; yields the raw request
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{}/models/m:generateContent", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_http_error_status_maps_to_transport() {
        let (endpoint, server) = serve_once("429 Too Many Requests", "quota").await;
        let client = GeminiClient::with_endpoint(endpoint, "SECRET").unwrap();

        let err = client.generate("hi").await.unwrap_err();
        match err {
            StudyGenError::Transport { status, body } => {
                assert_eq!(status, Some(429));
                assert_eq!(body, "quota");
            }
            other => panic!("expected transport error, got {:?}", other),
        }

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /models/m:generateContent?key=SECRET HTTP/1.1\r\n"));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({
                "contents": [{"parts": [{"text": "hi"}]}],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 2048
                }
            })
        );
    }

    #[tokio::test]
    async fn test_success_body_returns_first_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"generated"}]}}]}"#;
        let (endpoint, server) = serve_once("200 OK", body).await;
        let client = GeminiClient::with_endpoint(endpoint, "k").unwrap();

        assert_eq!(client.generate("prompt").await.unwrap(), "generated");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_success_without_text_path_is_malformed() {
        let (endpoint, server) = serve_once("200 OK", r#"{"candidates":[{}]}"#).await;
        let client = GeminiClient::with_endpoint(endpoint, "k").unwrap();

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, StudyGenError::MalformedResponse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_malformed() {
        let (endpoint, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = GeminiClient::with_endpoint(endpoint, "k").unwrap();

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, StudyGenError::MalformedResponse(_)));
        server.await.unwrap();
    }
}

//! Deterministic in-process backend for tests and offline runs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use studygen_common::{Result, StudyGenError};

use crate::client::extract_text;
use crate::llm_trait::LlmClient;

/// What the mock answers to every prompt
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Generated text, as if extracted from a success payload
    Text(String),
    /// Raw success body, run through the same extraction as the real client
    Body(String),
    /// Non-success HTTP status with a body
    Status(u16, String),
    /// Request never got a response
    NetworkFailure(String),
}

/// Scripted [`LlmClient`] that records the prompts it receives
#[derive(Debug)]
pub struct MockLlmClient {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self::new(MockReply::Body(body.into()))
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockReply::Status(status, body.into()))
    }

    /// Number of prompts received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Body(body) => extract_text(body),
            MockReply::Status(status, body) => {
                Err(StudyGenError::http_status(*status, body.clone()))
            }
            MockReply::NetworkFailure(msg) => Err(StudyGenError::network(msg.clone())),
        }
    }
}

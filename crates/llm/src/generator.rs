use studygen_common::{AppConfig, Result};
use tracing::{debug, info, warn};

use crate::client::GeminiClient;
use crate::llm_trait::LlmClient;
use crate::prompts::{build_notes_prompt, build_quiz_prompt};
use crate::quiz::{decode_quiz, fallback_quiz};
use crate::types::{GenerationOutput, GenerationRequest, QuizQuestion, RequestKind};

/// Notes and quiz generation over a generative-text backend
#[derive(Debug)]
pub struct GenerationClient<C = GeminiClient> {
    client: C,
    question_count: u32,
}

impl GenerationClient<GeminiClient> {
    /// Create generator against the default Gemini model
    pub fn new(api_key: impl Into<String>, question_count: u32) -> Result<Self> {
        Ok(Self::with_client(GeminiClient::new(api_key)?, question_count))
    }

    /// Create generator from application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_client(
            GeminiClient::from_config(config)?,
            config.question_count,
        ))
    }
}

impl<C: LlmClient> GenerationClient<C> {
    /// Create generator over any backend
    pub fn with_client(client: C, question_count: u32) -> Self {
        Self {
            client,
            question_count,
        }
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate structured notes; the model output is returned verbatim
    pub async fn generate_notes(&self, source_text: &str) -> Result<String> {
        info!("Generating notes - Source length: {} chars", source_text.chars().count());

        let prompt = build_notes_prompt(source_text);
        self.client.generate(&prompt).await
    }

    /// Generate a quiz with the configured question count
    ///
    /// Undecodable output yields the single fallback question instead of an
    /// error. Transport errors are still returned.
    pub async fn generate_quiz(&self, source_text: &str) -> Result<Vec<QuizQuestion>> {
        self.generate_quiz_with_count(source_text, self.question_count).await
    }

    async fn generate_quiz_with_count(
        &self,
        source_text: &str,
        question_count: u32,
    ) -> Result<Vec<QuizQuestion>> {
        info!(
            "Generating quiz - Questions: {}, Source length: {} chars",
            question_count,
            source_text.chars().count()
        );

        let prompt = build_quiz_prompt(source_text, question_count);
        let decoded = self
            .client
            .generate(&prompt)
            .await
            .and_then(|raw| decode_quiz(&raw));

        match decoded {
            Ok(questions) => {
                debug!("Decoded {} quiz questions", questions.len());
                Ok(questions)
            }
            Err(e) if e.is_decode_stage() => {
                warn!("Failed to parse quiz JSON, using fallback question: {}", e);
                Ok(fallback_quiz())
            }
            Err(e) => Err(e),
        }
    }

    /// Run a notes or quiz request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        match request.kind {
            RequestKind::Notes => self
                .generate_notes(&request.source_text)
                .await
                .map(GenerationOutput::Notes),
            RequestKind::Quiz { question_count } => self
                .generate_quiz_with_count(&request.source_text, question_count)
                .await
                .map(GenerationOutput::Quiz),
        }
    }
}

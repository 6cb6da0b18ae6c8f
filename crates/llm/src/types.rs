use serde::{Deserialize, Serialize};

/// Gemini `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents (a single user turn here)
    pub contents: Vec<Content>,

    /// Sampling parameters
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-prompt request with the default sampling parameters
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// One turn of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Generation options
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature
    pub temperature: f32,

    /// Top-k sampling
    pub top_k: u32,

    /// Top-p sampling
    pub top_p: f32,

    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

/// Gemini `generateContent` response body
///
/// Every level is optional so that a partial payload deserializes and the
/// missing path is reported by [`GenerateContentResponse::first_text`].
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// What a generation call should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Structured study notes
    Notes,
    /// Multiple-choice quiz with the given number of questions
    Quiz { question_count: u32 },
}

/// Per-call generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Extracted document text
    pub source_text: String,

    /// Requested output
    pub kind: RequestKind,
}

impl GenerationRequest {
    pub fn notes(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            kind: RequestKind::Notes,
        }
    }

    pub fn quiz(source_text: impl Into<String>, question_count: u32) -> Self {
        Self {
            source_text: source_text.into(),
            kind: RequestKind::Quiz { question_count },
        }
    }
}

/// Result of a [`GenerationRequest`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "lowercase")]
pub enum GenerationOutput {
    Notes(String),
    Quiz(Vec<QuizQuestion>),
}

/// Multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,

    /// Answer options, in display order (usually four)
    pub options: Vec<String>,

    /// Zero-based index of the correct option
    pub correct_answer: usize,

    /// Why the answer is correct (empty when the model gave none)
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Text of the correct option, if the index is in range
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// Result of scoring a set of answers against a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
}

//! StudyGen LLM Integration
//!
//! Gemini API client, prompt templates, and notes/quiz generation

mod client;
mod generator;
mod llm_trait;
pub mod mock;
pub mod notes;
pub mod prompts;
pub mod quiz;
mod types;

pub use client::{extract_text, GeminiClient};
pub use generator::GenerationClient;
pub use llm_trait::LlmClient;
pub use notes::{parse_notes, render_outline, NoteBlock};
pub use prompts::{build_notes_prompt, build_quiz_prompt, truncate_chars};
pub use quiz::{decode_quiz, fallback_quiz, score_answers};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GenerationOutput, GenerationRequest, Part, QuizQuestion, QuizScore, RequestKind,
};

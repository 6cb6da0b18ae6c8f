//! Prompt templates for notes and quiz generation

/// Characters of source text embedded in the notes prompt
pub const NOTES_MAX_CHARS: usize = 10_000;

/// Characters of source text embedded in the quiz prompt
pub const QUIZ_MAX_CHARS: usize = 8_000;

/// Notes instruction; `{content}` is replaced with the source text
pub const NOTES_TEMPLATE: &str = r#"Please analyze the following document content and create structured, concise notes with clear sections and bullet points.

Structure:
# Main Topics
## Subtopics
• Bullet points

Document Content:
{content}

Only return the notes without extra explanation."#;

/// Quiz instruction; `{count}` and `{content}` are substituted
pub const QUIZ_TEMPLATE: &str = r#"Create {count} multiple-choice questions based on this content.

Format:
[
  {
    "question": "Text?",
    "options": ["A", "B", "C", "D"],
    "correctAnswer": 0,
    "explanation": "Why this answer is correct"
  }
]

Use only JSON. No markdown or extra explanation.

Document Content:
{content}"#;

/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Prompt for structured notes
pub fn build_notes_prompt(source_text: &str) -> String {
    NOTES_TEMPLATE.replace("{content}", truncate_chars(source_text, NOTES_MAX_CHARS))
}

/// Prompt for a multiple-choice quiz of `question_count` questions
pub fn build_quiz_prompt(source_text: &str, question_count: u32) -> String {
    // Content goes in last so text containing "{count}" is left alone
    QUIZ_TEMPLATE
        .replace("{count}", &question_count.to_string())
        .replace("{content}", truncate_chars(source_text, QUIZ_MAX_CHARS))
}

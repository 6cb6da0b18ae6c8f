//! Quiz decoding, fallback and scoring

use serde_json::Value;
use studygen_common::{Result, StudyGenError};

use crate::types::{QuizQuestion, QuizScore};

pub const FALLBACK_QUESTION: &str = "What is the main topic discussed?";
pub const FALLBACK_EXPLANATION: &str = "Fallback generated due to parsing error.";

/// Placeholder quiz returned when the model output cannot be decoded
pub fn fallback_quiz() -> Vec<QuizQuestion> {
    vec![QuizQuestion {
        question: FALLBACK_QUESTION.to_string(),
        options: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
        correct_answer: 0,
        explanation: FALLBACK_EXPLANATION.to_string(),
    }]
}

/// Decode raw model output into quiz questions.
///
/// Fails only when no JSON array can be located or parsed. Individual
/// records are normalized, never rejected.
pub fn decode_quiz(raw: &str) -> Result<Vec<QuizQuestion>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let (start, end) = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(StudyGenError::decode("No JSON array found in response")),
    };

    let parsed: Value = serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| StudyGenError::decode(format!("Invalid quiz JSON: {}", e)))?;

    match parsed {
        Value::Array(items) => Ok(items.iter().map(normalize_question).collect()),
        _ => Err(StudyGenError::decode("Response is not a valid JSON array")),
    }
}

/// Coerce one array element into a [`QuizQuestion`], defaulting bad fields
pub fn normalize_question(value: &Value) -> QuizQuestion {
    let question = value
        .get("question")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let options = match value.get("options") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    let explanation = value
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let correct_answer = match value.get("correctAnswer") {
        Some(number @ Value::Number(_)) => answer_index(number).unwrap_or(options.len()),
        _ => 0,
    };

    QuizQuestion {
        question,
        options,
        correct_answer,
        explanation,
    }
}

/// Index named by a JSON number.
///
/// `None` for negative, fractional or oversized numbers. The caller maps
/// those past the last option so that no option counts as correct, while a
/// missing or non-numeric value defaults to the first option.
fn answer_index(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }

    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Some(f as usize)
        }
        _ => None,
    }
}

/// Score selected answers (`None` = unanswered) against a quiz
pub fn score_answers(questions: &[QuizQuestion], answers: &[Option<usize>]) -> QuizScore {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers.iter())
        .filter(|(question, answer)| **answer == Some(question.correct_answer))
        .count();

    let percentage = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    };

    QuizScore {
        correct,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_fenced_response() {
        let raw = "```json\n[{\"question\":\"Q\",\"options\":[\"A\",\"B\"],\"correctAnswer\":1,\"explanation\":\"E\"}]\n```";
        let questions = decode_quiz(raw).unwrap();

        assert_eq!(
            questions,
            vec![QuizQuestion {
                question: "Q".into(),
                options: vec!["A".into(), "B".into()],
                correct_answer: 1,
                explanation: "E".into(),
            }]
        );
    }

    #[test]
    fn test_decode_with_surrounding_prose() {
        let raw = "Sure! Here is your quiz:\n[{\"question\":\"Q1\",\"options\":[],\"correctAnswer\":2}]\nGood luck.";
        let questions = decode_quiz(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[0].correct_answer, 2);
        assert_eq!(questions[0].explanation, "");
    }

    #[test]
    fn test_decode_failures() {
        for raw in [
            "no brackets here at all",
            "] backwards [",
            "[not json}",
            "[{\"question\": \"unterminated\"]",
            "",
        ] {
            let err = decode_quiz(raw).unwrap_err();
            assert!(matches!(err, StudyGenError::Decode(_)), "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_missing_correct_answer() {
        let raw = r#"[{"question":"Q1","options":["A","B","C","D"],"correctAnswer":3},
                      {"question":"Q2","options":["A","B","C","D"]}]"#;
        let questions = decode_quiz(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, 3);
        assert_eq!(questions[1].correct_answer, 0);
        assert_eq!(questions[1].question, "Q2");
    }

    #[test]
    fn test_normalize_malformed_fields() {
        let q = normalize_question(&json!({
            "question": 42,
            "options": "A, B, C",
            "correctAnswer": "1",
            "explanation": null
        }));
        assert_eq!(q, QuizQuestion::default());

        let q = normalize_question(&json!("just a string"));
        assert_eq!(q, QuizQuestion::default());
    }

    #[test]
    fn test_normalize_answer_numbers() {
        assert_eq!(answer_index(&json!(2)), Some(2));
        assert_eq!(answer_index(&json!(1.0)), Some(1));
        assert_eq!(answer_index(&json!(1.5)), None);
        assert_eq!(answer_index(&json!(-1)), None);
    }

    #[test]
    fn test_invalid_numeric_answer_marks_no_option() {
        let options = json!(["A", "B", "C", "D"]);
        for answer in [json!(-1), json!(1.5)] {
            let q = normalize_question(&json!({
                "options": options.clone(),
                "correctAnswer": answer
            }));
            assert_eq!(q.correct_answer, 4);
            assert_eq!(q.correct_option(), None);
        }

        // Non-numeric values still default to the first option
        for answer in [json!("1"), json!(true), json!(null)] {
            let q = normalize_question(&json!({
                "options": options.clone(),
                "correctAnswer": answer
            }));
            assert_eq!(q.correct_answer, 0);
            assert_eq!(q.correct_option(), Some("A"));
        }
    }

    #[test]
    fn test_normalize_non_string_options() {
        let q = normalize_question(&json!({"options": ["A", 2, true, null]}));
        assert_eq!(q.options, vec!["A", "2", "true", "null"]);
    }

    #[test]
    fn test_fallback_quiz() {
        let quiz = fallback_quiz();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].question, FALLBACK_QUESTION);
        assert_eq!(quiz[0].options, vec!["A", "B", "C", "D"]);
        assert_eq!(quiz[0].correct_answer, 0);
        assert_eq!(quiz[0].explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_score_answers() {
        let quiz: Vec<QuizQuestion> = [0, 1, 2]
            .iter()
            .map(|&correct_answer| QuizQuestion {
                correct_answer,
                ..QuizQuestion::default()
            })
            .collect();

        let score = score_answers(&quiz, &[Some(0), Some(3), Some(2)]);
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 3);
        assert_eq!(score.percentage, 67);

        // Unanswered and missing answers count as wrong
        let score = score_answers(&quiz, &[None, Some(1)]);
        assert_eq!(score.correct, 1);
        assert_eq!(score.percentage, 33);

        assert_eq!(score_answers(&[], &[]).percentage, 0);
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use studygen_common::{logger, AppConfig, StudyGenError};
use studygen_llm::{parse_notes, render_outline, score_answers, GenerationClient, QuizQuestion};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "studygen")]
#[command(about = "StudyGen - AI study notes and quizzes from extracted document text", long_about = None)]
struct Cli {
    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate structured study notes
    Notes {
        /// Extracted text file, or "-" for stdin
        input: String,

        /// Print a parsed outline instead of the raw notes
        #[arg(long)]
        outline: bool,
    },

    /// Generate a multiple-choice quiz as JSON, or score answers against it
    Quiz {
        /// Extracted text file, or "-" for stdin
        input: String,

        /// Number of questions (overrides QUESTION_COUNT)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Score these answers instead of printing JSON, e.g. "A,C,,B"
        /// (letters or zero-based indices, empty = unanswered)
        #[arg(long)]
        answers: Option<String>,
    },
}

/// Read extracted document text from a file or stdin
fn read_input(input: &str) -> Result<String, StudyGenError> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|e| {
            StudyGenError::invalid_input(format!("Failed to read {}: {}", input, e))
        })?
    };

    if text.trim().is_empty() {
        return Err(StudyGenError::invalid_input(format!(
            "No text found in {}",
            if input == "-" { "stdin" } else { input }
        )));
    }

    Ok(text)
}

/// Parse comma-separated answers; letters or zero-based indices
fn parse_answers(raw: &str) -> Result<Vec<Option<usize>>, StudyGenError> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() || token == "-" {
                return Ok(None);
            }
            if let Ok(index) = token.parse::<usize>() {
                return Ok(Some(index));
            }
            match token.as_bytes() {
                [letter] if letter.is_ascii_alphabetic() => {
                    Ok(Some((letter.to_ascii_uppercase() - b'A') as usize))
                }
                _ => Err(StudyGenError::invalid_input(format!("Invalid answer '{}'", token))),
            }
        })
        .collect()
}

fn option_label(question: &QuizQuestion, index: usize) -> String {
    match question.options.get(index) {
        Some(text) => format!("{}. {}", option_letter(index), text),
        None => format!("{} (no such option)", option_letter(index)),
    }
}

fn option_letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i).to_string())
        .unwrap_or_else(|| index.to_string())
}

/// Per-question review followed by the overall score
fn render_review(questions: &[QuizQuestion], answers: &[Option<usize>]) -> String {
    let mut out = String::new();

    for (i, question) in questions.iter().enumerate() {
        let answer = answers.get(i).copied().flatten();
        let correct = answer == Some(question.correct_answer);

        out.push_str(&format!(
            "{}. [{}] {}\n",
            i + 1,
            if correct { "correct" } else { "wrong" },
            question.question
        ));
        match answer {
            Some(index) => {
                out.push_str(&format!("   Your answer: {}\n", option_label(question, index)))
            }
            None => out.push_str("   Your answer: (none)\n"),
        }
        if !correct {
            let expected = match question.correct_option() {
                Some(_) => option_label(question, question.correct_answer),
                None => "(not available)".to_string(),
            };
            out.push_str(&format!("   Correct answer: {}\n", expected));
        }
        if !question.explanation.is_empty() {
            out.push_str(&format!("   {}\n", question.explanation));
        }
    }

    let score = score_answers(questions, answers);
    out.push_str(&format!(
        "\nScore: {}/{} ({}%)\n",
        score.correct, score.total, score.percentage
    ));
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(key) = cli.api_key {
        config.api_key = key;
    }
    if let Commands::Quiz { count: Some(count), .. } = &cli.command {
        config.question_count = *count;
    }
    config.validate()?;

    match &config.log_dir {
        Some(dir) => logger::setup_logging(dir, &config.log_level)?,
        None => logger::setup_console_logging(&config.log_level)?,
    }

    let generator = GenerationClient::from_config(&config)?;

    match cli.command {
        Commands::Notes { input, outline } => {
            let text = read_input(&input)?;
            let notes = generator.generate_notes(&text).await?;

            if outline {
                print!("{}", render_outline(&parse_notes(&notes)));
            } else {
                println!("{}", notes);
            }
        }
        Commands::Quiz {
            input,
            pretty,
            answers,
            ..
        } => {
            // Reject bad answers before spending a generation call
            let answers = answers.as_deref().map(parse_answers).transpose()?;
            let text = read_input(&input)?;
            let questions = generator.generate_quiz(&text).await?;
            tracing::info!("Quiz ready: {} questions", questions.len());

            if let Some(answers) = answers {
                print!("{}", render_review(&questions, &answers));
                return Ok(());
            }

            let json = if pretty {
                serde_json::to_string_pretty(&questions)?
            } else {
                serde_json::to_string(&questions)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

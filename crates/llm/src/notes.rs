//! Line-based markup used by generated notes

use serde::Serialize;

/// One displayable line of generated notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum NoteBlock {
    /// `# ...`
    Heading(String),
    /// `## ...`
    Subheading(String),
    /// `• ...` or `- ...`
    Bullet(String),
    /// Anything else
    Paragraph(String),
}

/// Split notes text into blocks, skipping blank lines
pub fn parse_notes(text: &str) -> Vec<NoteBlock> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> NoteBlock {
    if let Some(rest) = line.strip_prefix("##") {
        NoteBlock::Subheading(rest.trim().to_string())
    } else if let Some(rest) = line.strip_prefix('#') {
        NoteBlock::Heading(rest.trim().to_string())
    } else if let Some(rest) = line.strip_prefix('•').or_else(|| line.strip_prefix('-')) {
        NoteBlock::Bullet(rest.trim().to_string())
    } else {
        NoteBlock::Paragraph(line.to_string())
    }
}

/// Plain-text outline for terminal display
pub fn render_outline(blocks: &[NoteBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            NoteBlock::Heading(text) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&text.to_uppercase());
                out.push('\n');
            }
            NoteBlock::Subheading(text) => {
                out.push_str("  ");
                out.push_str(text);
                out.push('\n');
            }
            NoteBlock::Bullet(text) => {
                out.push_str("    * ");
                out.push_str(text);
                out.push('\n');
            }
            NoteBlock::Paragraph(text) => {
                out.push_str("    ");
                out.push_str(text);
                out.push('\n');
            }
        }
    }
    out
}

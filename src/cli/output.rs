//! Plain-text rendering of parsed replies for the terminal

use crate::domain::{ContentBlock, ParsedResponse};

/// Render blocks separated by blank lines, with a trailing newline
pub fn render(parsed: &ParsedResponse) -> String {
    let mut out = String::new();

    for (i, block) in parsed.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_block(block));
        out.push('\n');
    }

    out
}

fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Title { level, text } => match level {
            1 => format!("{}\n{}", text, "=".repeat(text.chars().count())),
            2 => format!("{}\n{}", text, "-".repeat(text.chars().count())),
            _ => format!("{} {}", "#".repeat(usize::from(*level)), text),
        },
        ContentBlock::Paragraph { text } => text.clone(),
        ContentBlock::CodeBlock { language, code } => {
            let header = format!("[{}]", language.as_deref().unwrap_or("code"));
            let body: Vec<String> = code.lines().map(|line| format!("    {}", line)).collect();
            if body.is_empty() {
                header
            } else {
                format!("{}\n{}", header, body.join("\n"))
            }
        }
        ContentBlock::List { ordered, items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if *ordered {
                    format!("  {}. {}", i + 1, item)
                } else {
                    format!("  - {}", item)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ContentBlock::Quote { text } => text
            .lines()
            .map(|line| format!("  | {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

use serde::{Deserialize, Serialize};

/// One typed unit of a parsed reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Title {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Quote {
        text: String,
    },
}

impl ContentBlock {
    pub fn title(level: u8, text: impl Into<String>) -> Self {
        Self::Title {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn code(language: Option<&str>, code: impl Into<String>) -> Self {
        Self::CodeBlock {
            language: language.map(str::to_string),
            code: code.into(),
        }
    }

    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::Quote { text: text.into() }
    }

    /// Render the block back to markdown source
    pub fn to_markdown(&self) -> String {
        self.render(false)
    }

    /// `alternate_marker` renders lists with `*` or `N)` markers
    fn render(&self, alternate_marker: bool) -> String {
        match self {
            ContentBlock::Title { level, text } => {
                format!("{} {}", "#".repeat(usize::from((*level).clamp(1, 6))), text)
            }
            ContentBlock::Paragraph { text } => text.clone(),
            ContentBlock::CodeBlock { language, code } => {
                let fence = fence_for(code);
                let info = language.as_deref().unwrap_or("");
                if code.is_empty() {
                    format!("{fence}{info}\n{fence}")
                } else {
                    format!("{fence}{info}\n{code}\n{fence}")
                }
            }
            ContentBlock::List { ordered, items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| match (*ordered, alternate_marker) {
                    (true, false) => format!("{}. {}", i + 1, item),
                    (true, true) => format!("{}) {}", i + 1, item),
                    (false, false) => format!("- {}", item),
                    (false, true) => format!("* {}", item),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::Quote { text } => text
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {}", line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Backtick fence longer than any backtick run that opens a line of `code`
fn fence_for(code: &str) -> String {
    let longest = code
        .lines()
        .map(|line| line.trim_start().chars().take_while(|c| *c == '`').count())
        .max()
        .unwrap_or(0);

    "`".repeat(longest.max(2) + 1)
}

/// Ordered blocks produced by one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub blocks: Vec<ContentBlock>,
}

impl ParsedResponse {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }

    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.blocks
    }

    /// All titles as `(level, text)`
    pub fn titles(&self) -> Vec<(u8, &str)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Title { level, text } => Some((*level, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// All code blocks as `(language, code)`
    pub fn code_blocks(&self) -> Vec<(Option<&str>, &str)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::CodeBlock { language, code } => {
                    Some((language.as_deref(), code.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All lists as `(ordered, items)`
    pub fn lists(&self) -> Vec<(bool, &[String])> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::List { ordered, items } => Some((*ordered, items.as_slice())),
                _ => None,
            })
            .collect()
    }

    pub fn quotes(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Quote { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render all blocks back to markdown, separated by blank lines
    ///
    /// A list directly after a list of the same kind switches marker so the
    /// two do not merge when read back.
    pub fn to_markdown(&self) -> String {
        let mut rendered = Vec::with_capacity(self.blocks.len());
        let mut previous: Option<&ContentBlock> = None;
        let mut alternate = false;

        for block in &self.blocks {
            alternate = match (previous, block) {
                (
                    Some(ContentBlock::List { ordered: before, .. }),
                    ContentBlock::List { ordered, .. },
                ) if before == ordered => !alternate,
                _ => false,
            };
            rendered.push(block.render(alternate));
            previous = Some(block);
        }

        rendered.join("\n\n")
    }
}

impl IntoIterator for ParsedResponse {
    type Item = ContentBlock;
    type IntoIter = std::vec::IntoIter<ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedResponse {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedResponse {
        ParsedResponse::new(vec![
            ContentBlock::title(1, "Main"),
            ContentBlock::paragraph("Intro"),
            ContentBlock::code(Some("rust"), "fn a() {}"),
            ContentBlock::title(2, "Sub"),
            ContentBlock::list(true, ["one", "two"]),
            ContentBlock::code(None, "plain"),
            ContentBlock::quote("wise words"),
            ContentBlock::paragraph("Outro"),
        ])
    }

    #[test]
    fn test_filters_preserve_order() {
        let parsed = sample();

        assert_eq!(parsed.titles(), vec![(1, "Main"), (2, "Sub")]);
        assert_eq!(
            parsed.code_blocks(),
            vec![(Some("rust"), "fn a() {}"), (None, "plain")]
        );
        assert_eq!(parsed.paragraphs(), vec!["Intro", "Outro"]);
        assert_eq!(parsed.quotes(), vec!["wise words"]);

        let lists = parsed.lists();
        assert_eq!(lists.len(), 1);
        assert!(lists[0].0);
        assert_eq!(lists[0].1, ["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_render_blocks() {
        assert_eq!(ContentBlock::title(3, "Deep").to_markdown(), "### Deep");
        assert_eq!(
            ContentBlock::code(Some("go"), "fmt.Println(1)").to_markdown(),
            "```go\nfmt.Println(1)\n```"
        );
        assert_eq!(
            ContentBlock::list(false, ["a", "b"]).to_markdown(),
            "- a\n- b"
        );
        assert_eq!(
            ContentBlock::list(true, ["c", "d"]).to_markdown(),
            "1. c\n2. d"
        );
        assert_eq!(
            ContentBlock::quote("first\n\nsecond").to_markdown(),
            "> first\n>\n> second"
        );
    }

    #[test]
    fn test_adjacent_lists_switch_markers() {
        let parsed = ParsedResponse::new(vec![
            ContentBlock::list(false, ["a"]),
            ContentBlock::list(false, ["b"]),
            ContentBlock::list(false, ["c"]),
            ContentBlock::list(true, ["x"]),
            ContentBlock::list(true, ["y"]),
            ContentBlock::paragraph("end"),
            ContentBlock::list(true, ["z"]),
        ]);

        assert_eq!(
            parsed.to_markdown(),
            "- a\n\n* b\n\n- c\n\n1. x\n\n1) y\n\nend\n\n1. z"
        );
    }

    #[test]
    fn test_fence_grows_past_inner_backticks() {
        let block = ContentBlock::code(Some("md"), "```rust\nfn a() {}\n```");
        assert_eq!(
            block.to_markdown(),
            "````md\n```rust\nfn a() {}\n```\n````"
        );
    }

    #[test]
    fn test_title_level_is_clamped() {
        assert_eq!(ContentBlock::title(9, "x"), ContentBlock::title(6, "x"));
        assert_eq!(ContentBlock::title(0, "x").to_markdown(), "# x");
    }

    #[test]
    fn test_block_serialization() {
        let json = serde_json::to_value(ContentBlock::code(Some("go"), "x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "code_block", "language": "go", "code": "x"})
        );

        let json = serde_json::to_value(ContentBlock::list(false, ["a"])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "list", "ordered": false, "items": ["a"]})
        );
    }
}

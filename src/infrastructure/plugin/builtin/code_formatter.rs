//! Code Formatter Plugin
//!
//! Post-processor that marks every fenced code block in a reply with a
//! comment line, written in the comment syntax of the block's language.

use crate::domain::plugin::{Plugin, PluginCapability, PluginError, PluginMetadata};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

const CAPABILITIES: &[PluginCapability] =
    &[PluginCapability::PostProcessor, PluginCapability::CodeFormatter];

const MARKER: &str = "Formatted by Code Formatter Plugin";

/// Languages whose line comments start with `#`
const HASH_COMMENT_LANGUAGES: &[&str] = &[
    "bash", "dockerfile", "elixir", "make", "makefile", "perl", "powershell", "ps1", "py",
    "python", "r", "rb", "ruby", "sh", "shell", "toml", "yaml", "yml", "zsh",
];

/// Opening code fence of a line-oriented scan
#[derive(Debug, PartialEq, Eq)]
struct Fence<'a> {
    marker: char,
    len: usize,
    language: Option<&'a str>,
}

impl<'a> Fence<'a> {
    fn opening(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }

        let info = trimmed[len..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }

        Some(Self {
            marker,
            len,
            language: info.split_whitespace().next(),
        })
    }

    /// A closing fence repeats the opening character at least as many times and nothing else
    fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.len && trimmed.chars().all(|c| c == self.marker)
    }
}

#[derive(Debug)]
pub struct CodeFormatterPlugin {
    metadata: PluginMetadata,
    ready: AtomicBool,
}

impl CodeFormatterPlugin {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new("Code Formatter", "0.1.0")
                .with_description("Adds syntax highlighting hints to code blocks")
                .with_author("Vibe Coder Team"),
            ready: AtomicBool::new(false),
        }
    }

    fn comment_for(language: Option<&str>) -> String {
        let hash = language.is_some_and(|lang| {
            HASH_COMMENT_LANGUAGES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(lang))
        });

        if hash {
            format!("# {}", MARKER)
        } else {
            format!("// {}", MARKER)
        }
    }

    fn annotate(text: &str) -> String {
        let mut lines = text.split('\n');
        let mut out: Vec<String> = Vec::new();

        while let Some(line) = lines.next() {
            out.push(line.to_string());

            let Some(fence) = Fence::opening(line) else {
                continue;
            };

            out.push(Self::comment_for(fence.language));

            // Copy the body through the closing fence untouched
            for inner in lines.by_ref() {
                out.push(inner.to_string());
                if fence.is_closed_by(inner) {
                    break;
                }
            }
        }

        out.join("\n")
    }
}

impl Default for CodeFormatterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for CodeFormatterPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> &[PluginCapability] {
        CAPABILITIES
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn post_process(&self, output: &str) -> Result<String, PluginError> {
        if !self.ready.load(Ordering::SeqCst) {
            return Err(PluginError::not_initialized(&self.metadata.name));
        }
        Ok(Self::annotate(output))
    }
}

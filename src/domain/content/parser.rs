//! Markdown reply parser on top of the pulldown-cmark offset event stream
//!
//! Each top-level element becomes one content block read from its source
//! range, so paragraphs, list items and quotes keep their raw text. Parsing
//! is total: rules and HTML blocks are kept as paragraphs.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use super::block::{ContentBlock, ParsedResponse};

/// Parse a reply into ordered content blocks
pub fn parse_response(text: &str) -> ParsedResponse {
    let source = text.replace("\r\n", "\n");

    let blocks = parse_blocks(&source)
        .into_iter()
        .map(|spanned| spanned.block)
        .collect();

    ParsedResponse::new(blocks)
}

/// Block with the trimmed source range it was read from
#[derive(Debug)]
struct Spanned {
    block: ContentBlock,
    span: Range<usize>,
}

fn parse_blocks(source: &str) -> Vec<Spanned> {
    let mut builder = BlockBuilder::new(source);
    let mut open: Option<(Element, Range<usize>)> = None;
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        if open.is_none() {
            match event {
                Event::Start(tag) => {
                    builder.flush_html();
                    open = Some((Element::from_tag(&tag), range));
                    depth = 1;
                }
                Event::Html(_) => builder.html(range),
                Event::Rule => {
                    builder.flush_html();
                    builder.raw(range);
                }
                _ => {}
            }
            continue;
        }

        let mut closed = false;
        if let Some((element, _)) = open.as_mut() {
            match event {
                Event::Start(tag) => {
                    element.start(&tag, range, depth);
                    depth += 1;
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    closed = depth == 0;
                }
                Event::Text(text) => element.text(&text, range),
                _ => element.inline(range),
            }
        }

        if closed {
            if let Some((element, range)) = open.take() {
                builder.close(element, range);
            }
        }
    }

    builder.finish()
}

/// Top-level element whose end event has not been seen yet
#[derive(Debug)]
enum Element {
    Heading {
        level: u8,
        content: Option<Range<usize>>,
    },
    FencedCode {
        language: Option<String>,
        code: String,
    },
    List {
        ordered: bool,
        items: Vec<Range<usize>>,
    },
    Quote,
    /// Paragraphs, indented code and anything else kept as written
    Raw,
}

impl Element {
    fn from_tag(tag: &Tag<'_>) -> Self {
        match tag {
            Tag::Heading(level, ..) => Element::Heading {
                level: *level as u8,
                content: None,
            },
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => Element::FencedCode {
                language: info.split_whitespace().next().map(str::to_string),
                code: String::new(),
            },
            Tag::List(start) => Element::List {
                ordered: start.is_some(),
                items: Vec::new(),
            },
            Tag::BlockQuote => Element::Quote,
            _ => Element::Raw,
        }
    }

    /// Start event nested `depth` levels inside this element
    fn start(&mut self, tag: &Tag<'_>, range: Range<usize>, depth: usize) {
        match self {
            Element::List { items, .. } if depth == 1 && matches!(tag, Tag::Item) => {
                items.push(range)
            }
            _ => self.inline(range),
        }
    }

    fn text(&mut self, text: &str, range: Range<usize>) {
        match self {
            Element::FencedCode { code, .. } => code.push_str(text),
            _ => self.inline(range),
        }
    }

    /// Widen a heading's content span to cover `range`
    fn inline(&mut self, range: Range<usize>) {
        if let Element::Heading { content, .. } = self {
            *content = Some(match content.take() {
                Some(span) => span.start.min(range.start)..span.end.max(range.end),
                None => range,
            });
        }
    }
}

#[derive(Debug)]
struct BlockBuilder<'a> {
    source: &'a str,
    blocks: Vec<Spanned>,
    html: Option<Range<usize>>,
}

impl<'a> BlockBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            blocks: Vec::new(),
            html: None,
        }
    }

    fn close(&mut self, element: Element, range: Range<usize>) {
        let source = self.source;

        match element {
            Element::Heading { level, content } => {
                let text = content.map_or("", |span| source[span].trim());
                self.push(ContentBlock::title(level, text), trimmed(source, range));
            }
            Element::FencedCode { language, code } => {
                let code = code.strip_suffix('\n').unwrap_or(&code);
                self.push(
                    ContentBlock::code(language.as_deref(), code),
                    trimmed(source, range),
                );
            }
            Element::List { ordered, items } => {
                for item in items {
                    self.list_item(ordered, item);
                }
            }
            Element::Quote => self.quote(range),
            Element::Raw => self.raw(range),
        }
    }

    fn list_item(&mut self, ordered: bool, range: Range<usize>) {
        let source = self.source;
        let (owned, lazy) = split_lazy(source, range, |line| {
            line.starts_with(char::is_whitespace)
        });

        let text = item_text(&source[owned.clone()]);
        self.push(ContentBlock::list(ordered, [text]), trimmed(source, owned));

        if let Some(lazy) = lazy {
            self.reparse(lazy);
        }
    }

    fn quote(&mut self, range: Range<usize>) {
        let source = self.source;
        let (owned, lazy) = split_lazy(source, range, |line| {
            line.trim_start().starts_with('>')
        });

        let text = quote_text(&source[owned.clone()]);
        self.push(ContentBlock::quote(text), trimmed(source, owned));

        if let Some(lazy) = lazy {
            self.reparse(lazy);
        }
    }

    /// Parse lines a container only holds as lazy continuations as top-level content
    fn reparse(&mut self, range: Range<usize>) {
        let offset = range.start;
        for Spanned { block, span } in parse_blocks(&self.source[range]) {
            self.push(block, span.start + offset..span.end + offset);
        }
    }

    fn raw(&mut self, range: Range<usize>) {
        let source = self.source;
        let span = trimmed(source, range);
        if span.is_empty() {
            return;
        }

        self.push(ContentBlock::paragraph(&source[span.clone()]), span);
    }

    /// HTML blocks arrive one line per event with no enclosing tag
    fn html(&mut self, range: Range<usize>) {
        self.html = Some(match self.html.take() {
            Some(span) => span.start..range.end,
            None => range,
        });
    }

    fn flush_html(&mut self) {
        if let Some(range) = self.html.take() {
            self.raw(range);
        }
    }

    /// Append a block; a list continues the previous list of the same kind
    /// unless a blank line separates them
    fn push(&mut self, block: ContentBlock, span: Range<usize>) {
        if let Some(last) = self.blocks.last_mut() {
            if let (
                ContentBlock::List {
                    ordered: current,
                    items: existing,
                },
                ContentBlock::List { ordered, items },
            ) = (&mut last.block, &block)
            {
                let separated = blank_line_between(self.source, last.span.end, span.start);
                if *current == *ordered && !separated {
                    existing.extend(items.iter().cloned());
                    last.span.end = span.end;
                    return;
                }
            }
        }

        self.blocks.push(Spanned { block, span });
    }

    fn finish(mut self) -> Vec<Spanned> {
        self.flush_html();
        self.blocks
    }
}

/// Split a container at its first non-blank line that `owns` rejects
///
/// The first line always belongs to the container.
fn split_lazy<F>(
    source: &str,
    range: Range<usize>,
    owns: F,
) -> (Range<usize>, Option<Range<usize>>)
where
    F: Fn(&str) -> bool,
{
    let mut offset = range.start;

    for (i, line) in source[range.clone()].split_inclusive('\n').enumerate() {
        if i > 0 && !line.trim().is_empty() && !owns(line) {
            return (range.start..offset, Some(offset..range.end));
        }
        offset += line.len();
    }

    (range, None)
}

fn item_text(raw: &str) -> String {
    let mut lines = raw.lines();
    let first = lines.next().map(strip_marker).unwrap_or("");

    std::iter::once(first)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Drop a bullet or `N.`/`N)` marker from the first line of an item
fn strip_marker(line: &str) -> &str {
    let line = line.trim_start();

    let rest = match line.strip_prefix(&['-', '*', '+'][..]) {
        Some(rest) => rest,
        None => {
            let number = line.trim_start_matches(|c: char| c.is_ascii_digit());
            number.strip_prefix(&['.', ')'][..]).unwrap_or(number)
        }
    };

    rest.trim()
}

fn quote_text(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// `range` shrunk to exclude leading and trailing whitespace
fn trimmed(source: &str, range: Range<usize>) -> Range<usize> {
    let text = &source[range.clone()];
    let start = range.start + (text.len() - text.trim_start().len());
    let end = range.start + text.trim_end().len();

    start..end.max(start)
}

fn blank_line_between(source: &str, end: usize, start: usize) -> bool {
    source
        .get(end..start)
        .is_some_and(|gap| gap.matches('\n').count() > 1)
}

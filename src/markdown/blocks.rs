//! Line classification and the block state machine.

use super::inline::InlineRenderer;
use crate::util::escape_html;

/// Opening and closing marker for fenced code blocks.
const FENCE: &str = "```";

/// Kind of list currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "<ol>",
            ListKind::Unordered => "<ul>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "</ol>",
            ListKind::Unordered => "</ul>",
        }
    }
}

/// Classification of a single line outside fenced code.
///
/// Classification is local: it never depends on neighbouring lines. The
/// carried-over context lives in [`BlockWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Fence marker, with the trailing info string.
    Fence { info: &'a str },
    Blank,
    Heading { level: usize, text: &'a str },
    Quote(&'a str),
    Item { kind: ListKind, text: &'a str },
    Paragraph(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a raw line.
    ///
    /// The line is trimmed first. Detection order: fence, blank, heading,
    /// blockquote, ordered item, unordered item, paragraph.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            return Line::Fence { info: info.trim() };
        }
        if trimmed.is_empty() {
            return Line::Blank;
        }
        if let Some((level, text)) = heading(trimmed) {
            return Line::Heading { level, text };
        }
        if let Some(text) = trimmed.strip_prefix('>') {
            return Line::Quote(text.trim_start());
        }
        if let Some(text) = ordered_item(trimmed) {
            return Line::Item {
                kind: ListKind::Ordered,
                text,
            };
        }
        if let Some(text) = unordered_item(trimmed) {
            return Line::Item {
                kind: ListKind::Unordered,
                text,
            };
        }

        Line::Paragraph(trimmed)
    }

    /// Returns whether a raw line opens or closes a fenced block.
    pub fn is_fence(line: &str) -> bool {
        line.trim().starts_with(FENCE)
    }
}

/// Matches `#{1,6}` followed by whitespace and text.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let text = after_whitespace(&line[level..])?;
    Some((level, text))
}

/// Matches `<digits>.` followed by whitespace and text.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    after_whitespace(rest)
}

/// Matches `-`, `*` or `+` followed by whitespace and text.
fn unordered_item(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('+'))?;
    after_whitespace(rest)
}

/// Requires at least one leading whitespace character and strips the run.
fn after_whitespace(rest: &str) -> Option<&str> {
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Buffered contents of an open fenced code block.
#[derive(Debug, Default)]
struct CodeBlock {
    language: Option<String>,
    lines: Vec<String>,
}

/// Block parser state carried between lines.
#[derive(Debug, Default)]
enum State {
    #[default]
    Normal,
    InList(ListKind),
    InCode(CodeBlock),
}

/// Consumes lines and accumulates one HTML string per emitted element.
///
/// List wrappers (`<ul>`, `</ol>`) are emitted as their own elements, so
/// joining the result with `\n` puts each `<li>` on its own line.
pub(crate) struct BlockWriter<'r> {
    inline: &'r InlineRenderer,
    state: State,
    blocks: Vec<String>,
}

impl<'r> BlockWriter<'r> {
    pub fn new(inline: &'r InlineRenderer) -> Self {
        Self {
            inline,
            state: State::Normal,
            blocks: Vec::new(),
        }
    }

    /// Feeds one line, without its trailing newline.
    pub fn push_line(&mut self, line: &str) {
        if let State::InCode(code) = &mut self.state {
            if !Line::is_fence(line) {
                code.lines.push(line.to_string());
                return;
            }
            self.flush_code();
            return;
        }

        match Line::classify(line) {
            Line::Fence { info } => {
                self.close_list();
                let language = info.split_whitespace().next().map(String::from);
                self.state = State::InCode(CodeBlock {
                    language,
                    lines: Vec::new(),
                });
            }
            Line::Blank => self.close_list(),
            Line::Heading { level, text } => {
                self.close_list();
                let html = format!("<h{level}>{}</h{level}>", self.inline_html(text));
                self.blocks.push(html);
            }
            Line::Quote(text) => {
                self.close_list();
                let html = format!("<blockquote><p>{}</p></blockquote>", self.inline_html(text));
                self.blocks.push(html);
            }
            Line::Item { kind, text } => {
                self.open_list(kind);
                let html = format!("<li>{}</li>", self.inline_html(text));
                self.blocks.push(html);
            }
            Line::Paragraph(text) => {
                self.close_list();
                let html = format!("<p>{}</p>", self.inline_html(text));
                self.blocks.push(html);
            }
        }
    }

    /// Force-closes whatever is open and returns the emitted elements.
    ///
    /// An unterminated fence is flushed as a code block.
    pub fn finish(mut self) -> Vec<String> {
        match self.state {
            State::InCode(_) => self.flush_code(),
            State::InList(_) => self.close_list(),
            State::Normal => {}
        }
        self.blocks
    }

    fn inline_html(&self, text: &str) -> String {
        self.inline.render(&escape_html(text))
    }

    fn open_list(&mut self, kind: ListKind) {
        if matches!(self.state, State::InList(open) if open == kind) {
            return;
        }
        self.close_list();
        self.blocks.push(kind.open_tag().to_string());
        self.state = State::InList(kind);
    }

    fn close_list(&mut self) {
        if let State::InList(kind) = self.state {
            self.blocks.push(kind.close_tag().to_string());
            self.state = State::Normal;
        }
    }

    fn flush_code(&mut self) {
        let State::InCode(code) = std::mem::take(&mut self.state) else {
            return;
        };

        let body = escape_html(&code.lines.join("\n"));
        let html = match code.language {
            Some(language) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(&language),
                body
            ),
            None => format!("<pre><code>{}</code></pre>", body),
        };
        self.blocks.push(html);
    }
}

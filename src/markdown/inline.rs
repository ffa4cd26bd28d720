//! Inline span rendering: code, images, links, bold and italic.
//!
//! Input is a single line that has already been HTML-escaped, so the only
//! angle brackets in the output are the tags introduced here. Each pass
//! splits the line into [`Piece`]s: leaf markup produced by an earlier pass
//! is opaque to later passes, which keeps code span contents and link
//! targets out of reach of the emphasis rules. Elements with rendered
//! content (links, emphasis) are kept as `Open`/`Close` pairs so later
//! passes never pair delimiters across them.

use super::links;

/// Fragment of a line during inline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// Escaped text still subject to later passes.
    Text(String),
    /// Self-contained markup (code span, image), copied verbatim.
    Markup(String),
    /// Opening tag of an element whose content follows.
    Open(String),
    /// Closing tag of the innermost unclosed `Open`.
    Close(String),
}

/// Position of an emphasis delimiter.
#[derive(Debug, Clone, Copy)]
struct Mark {
    piece: usize,
    offset: usize,
    /// Innermost `Open`/`Close` scope holding the delimiter, 0 at top level.
    scope: usize,
}

/// A link recognized starting at a `[` in some text piece.
struct LinkMatch<'p> {
    /// Piece holding the `](`
    close: usize,
    /// Label text of the closing piece, before the `]`
    label_tail: &'p str,
    target: &'p str,
    /// Byte offset just past the `)` in the closing piece
    end: usize,
}

/// Renders inline spans within one escaped line.
#[derive(Debug, Clone)]
pub(crate) struct InlineRenderer {
    image_class: String,
}

impl InlineRenderer {
    /// Creates inline renderer emitting `class` on every `<img>`.
    ///
    /// The class is escaped once here, not per image.
    pub fn new(image_class: &str) -> Self {
        Self {
            image_class: crate::util::escape_html(image_class),
        }
    }

    /// Applies all inline passes in order and concatenates the result.
    ///
    /// Pass order: code spans, images, links, bold, italic. Links run
    /// before bold and italic rather than last, so asterisks inside a link
    /// target never become `<em>`. The label keeps its text, code spans
    /// and images, so `[![logo](/l.png)](/x)` and `[**a**](/b)` both work,
    /// and emphasis around a whole link (`**[a](/b)**`) still applies.
    ///
    /// # Arguments
    ///
    /// * `escaped`: Line content, HTML-escaped
    ///
    /// # Returns
    ///
    /// HTML string for the line
    pub fn render(&self, escaped: &str) -> String {
        let pieces = vec![Piece::Text(escaped.to_string())];
        let pieces = map_text(pieces, |text| replace_matches(text, "`", code_span));
        let pieces = map_text(pieces, |text| {
            replace_matches(text, "![", |text, at| self.image(text, at))
        });
        let pieces = link_spans(pieces);
        let pieces = emphasis(pieces, "**", "strong");
        let pieces = emphasis(pieces, "*", "em");

        pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Text(s) | Piece::Markup(s) | Piece::Open(s) | Piece::Close(s) => s,
            })
            .collect()
    }

    /// Parses `![alt](url)` at `at` into an `<img>` tag.
    fn image(&self, text: &str, at: usize) -> Option<(Vec<Piece>, usize)> {
        let (alt, url, end) = bracket_target(text, at + 1)?;
        let tag = format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" class=\"{}\">",
            links::sanitize(url),
            alt,
            self.image_class
        );
        Some((vec![Piece::Markup(tag)], end))
    }
}

/// Parses a backtick code span at `at`.
///
/// Empty spans are not recognized, so a doubled backtick stays literal.
fn code_span(text: &str, at: usize) -> Option<(Vec<Piece>, usize)> {
    let start = at + 1;
    let len = text[start..].find('`')?;
    if len == 0 {
        return None;
    }
    let code = &text[start..start + len];
    Some((
        vec![Piece::Markup(format!("<code>{}</code>", code))],
        start + len + 1,
    ))
}

/// Parses `[label](target)` where `open` indexes the `[`.
///
/// # Returns
///
/// Label, target, and the byte index just past the closing `)`
fn bracket_target(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let label_start = open + 1;
    let label_end = label_start + text.get(label_start..)?.find(']')?;
    let (target, end) = target_after(text, label_end)?;
    Some((&text[label_start..label_end], target, end))
}

/// Parses `(target)` right after the `]` at `label_end`.
fn target_after(text: &str, label_end: usize) -> Option<(&str, usize)> {
    if text.as_bytes().get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let target_start = label_end + 2;
    let target_end = target_start + text[target_start..].find(')')?;
    Some((&text[target_start..target_end], target_end + 1))
}

/// Finds the link opened by the `[` at `open` in piece `index`.
///
/// The label runs to the first `]` in any later text piece and may span
/// leaf markup such as code spans and images. The `](target)` must sit in
/// a single text piece.
fn link_at(pieces: &[Piece], index: usize, open: usize) -> Option<LinkMatch<'_>> {
    for (close, piece) in pieces.iter().enumerate().skip(index) {
        let Piece::Text(text) = piece else {
            continue;
        };
        let label_start = if close == index { open + 1 } else { 0 };
        let Some(found) = text[label_start..].find(']') else {
            continue;
        };
        let label_end = label_start + found;
        let (target, end) = target_after(text, label_end)?;
        return Some(LinkMatch {
            close,
            label_tail: &text[label_start..label_end],
            target,
            end,
        });
    }
    None
}

/// Replaces `[label](url)` spans with anchors.
///
/// The label is kept as pieces so emphasis still applies inside it.
fn link_spans(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut result = Vec::with_capacity(pieces.len());
    let mut index = 0;
    let mut literal_start = 0;
    let mut search = 0;

    while index < pieces.len() {
        let Piece::Text(text) = &pieces[index] else {
            result.push(pieces[index].clone());
            index += 1;
            literal_start = 0;
            search = 0;
            continue;
        };

        let Some(found) = text[search..].find('[') else {
            push_text(&mut result, &text[literal_start..]);
            index += 1;
            literal_start = 0;
            search = 0;
            continue;
        };
        let open = search + found;

        let Some(link) = link_at(&pieces, index, open) else {
            search = open + 1;
            continue;
        };

        push_text(&mut result, &text[literal_start..open]);
        result.push(Piece::Open(format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">",
            links::sanitize(link.target)
        )));
        if link.close != index {
            push_text(&mut result, &text[open + 1..]);
            result.extend(pieces[index + 1..link.close].iter().cloned());
        }
        push_text(&mut result, link.label_tail);
        result.push(Piece::Close("</a>".to_string()));

        index = link.close;
        literal_start = link.end;
        search = link.end;
    }

    result
}

/// Applies `f` to every text piece, leaving markup untouched.
fn map_text(pieces: Vec<Piece>, f: impl Fn(&str) -> Vec<Piece>) -> Vec<Piece> {
    pieces
        .into_iter()
        .flat_map(|piece| match piece {
            Piece::Text(text) => f(&text),
            markup => vec![markup],
        })
        .collect()
}

/// Scans `text` for `trigger` and replaces every successful parse.
///
/// `parse` receives the full text and the trigger offset, and returns the
/// replacement pieces plus the offset where scanning resumes. A failed
/// parse leaves the trigger as literal text.
fn replace_matches<F>(text: &str, trigger: &str, parse: F) -> Vec<Piece>
where
    F: Fn(&str, usize) -> Option<(Vec<Piece>, usize)>,
{
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find(trigger) {
        let at = search + found;
        match parse(text, at) {
            Some((replacement, end)) => {
                push_text(&mut pieces, &text[literal_start..at]);
                pieces.extend(replacement);
                literal_start = end;
                search = end;
            }
            None => search = at + trigger.len(),
        }
    }

    push_text(&mut pieces, &text[literal_start..]);
    pieces
}

fn push_text(pieces: &mut Vec<Piece>, text: &str) {
    if !text.is_empty() {
        pieces.push(Piece::Text(text.to_string()));
    }
}

/// Wraps paired `delim` runs in `<tag>`.
///
/// Delimiters pair left to right within one scope: an opener and closer
/// separated by an unbalanced link or emphasis boundary never pair, so
/// the output stays well nested. A delimiter whose content up to the next
/// delimiter is empty or whitespace is left literal and pairing resumes
/// from that next delimiter. An odd trailing delimiter stays literal.
fn emphasis(pieces: Vec<Piece>, delim: &str, tag: &str) -> Vec<Piece> {
    let mut marks = Vec::new();
    let mut scopes = vec![0];
    let mut scope_count = 1;

    for (index, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Text(text) => {
                let scope = scopes.last().copied().unwrap_or(0);
                let mut from = 0;
                while let Some(found) = text[from..].find(delim) {
                    marks.push(Mark {
                        piece: index,
                        offset: from + found,
                        scope,
                    });
                    from += found + delim.len();
                }
            }
            Piece::Open(_) => {
                scopes.push(scope_count);
                scope_count += 1;
            }
            Piece::Close(_) => {
                if scopes.len() > 1 {
                    scopes.pop();
                }
            }
            Piece::Markup(_) => {}
        }
    }

    let mut pending: Vec<Option<Mark>> = vec![None; scope_count];
    let mut paired = Vec::new();
    for mark in marks {
        match pending[mark.scope].take() {
            Some(opener) if !is_blank_between(&pieces, opener, mark, delim.len()) => {
                paired.push((opener, true));
                paired.push((mark, false));
            }
            _ => pending[mark.scope] = Some(mark),
        }
    }

    if paired.is_empty() {
        return pieces;
    }
    paired.sort_by_key(|(mark, _)| (mark.piece, mark.offset));

    let mut result = Vec::with_capacity(pieces.len() + paired.len() * 2);
    let mut cursor = paired.into_iter().peekable();

    for (index, piece) in pieces.into_iter().enumerate() {
        let text = match piece {
            Piece::Text(text) => text,
            markup => {
                result.push(markup);
                continue;
            }
        };

        let mut last = 0;
        while let Some(&(mark, opening)) = cursor.peek().filter(|(mark, _)| mark.piece == index) {
            push_text(&mut result, &text[last..mark.offset]);
            result.push(if opening {
                Piece::Open(format!("<{}>", tag))
            } else {
                Piece::Close(format!("</{}>", tag))
            });
            last = mark.offset + delim.len();
            cursor.next();
        }
        push_text(&mut result, &text[last..]);
    }

    result
}

/// Returns whether only whitespace separates two delimiters.
fn is_blank_between(pieces: &[Piece], open: Mark, close: Mark, delim_len: usize) -> bool {
    let text = |index: usize| match &pieces[index] {
        Piece::Text(text) => text.as_str(),
        _ => "",
    };

    if open.piece == close.piece {
        return text(open.piece)[open.offset + delim_len..close.offset]
            .trim()
            .is_empty();
    }

    text(open.piece)[open.offset + delim_len..].trim().is_empty()
        && text(close.piece)[..close.offset].trim().is_empty()
        && pieces[open.piece + 1..close.piece]
            .iter()
            .all(|piece| matches!(piece, Piece::Text(t) if t.trim().is_empty()))
}

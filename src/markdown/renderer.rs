//! Markdown rendering for authored site content.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::blocks::BlockWriter;
use super::inline::InlineRenderer;
use crate::util::normalize_newlines;

/// Class attribute emitted on rendered images by default.
pub const DEFAULT_IMAGE_CLASS: &str = "md-image";

/// Options controlling the markup produced by [`MarkdownRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the `class` attribute on every `<img>`. Escaped on output.
    pub image_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_class: DEFAULT_IMAGE_CLASS.to_string(),
        }
    }
}

/// Renders the restricted markdown dialect to HTML fragments.
///
/// Supported blocks: headings (`#` to `######`), single line blockquotes,
/// ordered and unordered lists, fenced code blocks, and paragraphs (one
/// per line). Supported inline spans: code, images, links, bold, italic.
///
/// All literal text is escaped before markup is introduced, and link and
/// image targets outside the allowlist (`http://`, `https://`, `mailto:`,
/// `tel:`, `/`, `#`) are replaced by `#`. Rendering is total: malformed
/// markdown degrades to escaped paragraph text.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    inline: InlineRenderer,
}

impl MarkdownRenderer {
    /// Creates renderer with default options.
    pub fn new() -> Self {
        Self::with_options(&RenderOptions::default())
    }

    /// Creates renderer with explicit options.
    ///
    /// # Arguments
    ///
    /// * `options`: Markup options such as the image class
    pub fn with_options(options: &RenderOptions) -> Self {
        Self {
            inline: InlineRenderer::new(&options.image_class),
        }
    }

    /// Renders markdown content to HTML string.
    ///
    /// Processes the input line by line through the block state machine,
    /// applying inline spans to heading, quote, list item and paragraph
    /// text. Emitted elements are joined with `\n`.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// HTML fragment, empty for empty or blank input
    pub fn render(&self, content: &str) -> String {
        let content = normalize_newlines(content);
        let mut writer = BlockWriter::new(&self.inline);

        for line in content.split('\n') {
            writer.push_line(line);
        }

        writer.finish().join("\n")
    }

    /// Renders markdown file at given path.
    ///
    /// Convenience method that reads file and renders content.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to markdown file
    ///
    /// # Returns
    ///
    /// Rendered HTML string
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or is not valid UTF8
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;

        debug!(path = %path.display(), bytes = content.len(), "rendering markdown file");
        Ok(self.render(&content))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders markdown with default options.
///
/// Shorthand for `MarkdownRenderer::new().render(markdown)`.
pub fn render(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

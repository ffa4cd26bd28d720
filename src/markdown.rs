//! Markdown rendering for a restricted dialect.
//!
//! This module converts authored content (headings, quotes, lists, fenced
//! code, paragraphs and a handful of inline spans) into HTML fragments
//! that can be injected into a page without further sanitization. Literal
//! text is always escaped and link targets pass through a scheme
//! allowlist.

mod blocks;
mod inline;
pub mod links;
mod renderer;

pub use renderer::{DEFAULT_IMAGE_CLASS, MarkdownRenderer, RenderOptions, render};

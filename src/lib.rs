//! Restricted markdown to HTML rendering for institutional site content.

pub mod components;
mod config;
mod markdown;
mod util;

pub use components::layout::page_wrapper;
pub use config::{Config, Lang, STDIN_PATH};
pub use markdown::links::{is_allowed as is_allowed_url, sanitize as sanitize_url};
pub use markdown::{DEFAULT_IMAGE_CLASS, MarkdownRenderer, RenderOptions, render};
pub use util::escape_html;

//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::markdown::{DEFAULT_IMAGE_CLASS, RenderOptions};

/// Input path meaning "read from standard input".
pub const STDIN_PATH: &str = "-";

/// Title used for preview pages when none can be derived.
const FALLBACK_TITLE: &str = "Document";

/// Language of the site content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    /// BCP 47 code used in the `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }
}

/// Command line configuration for Sitemark.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitemark", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render (`-` for stdin)
    #[arg(default_value = STDIN_PATH)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wrap the fragment in a standalone HTML page
    #[arg(long)]
    pub page: bool,

    /// Page title (defaults to the input file stem)
    #[arg(long)]
    pub title: Option<String>,

    /// Page language
    #[arg(long, value_enum, default_value_t = Lang::Fr)]
    pub lang: Lang,

    /// Stylesheet to link from the page, may be repeated
    #[arg(long = "stylesheet")]
    pub stylesheets: Vec<String>,

    /// Class attribute for rendered images
    #[arg(long, default_value = DEFAULT_IMAGE_CLASS)]
    pub image_class: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.reads_stdin() && !self.input.is_file() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        Ok(())
    }

    /// Returns whether markdown is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN_PATH)
    }

    /// Returns renderer options derived from the command line.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            image_class: self.image_class.clone(),
        }
    }

    /// Returns page title from configuration or the input file stem.
    ///
    /// Falls back to `Document` when reading stdin.
    ///
    /// # Errors
    ///
    /// Returns error if the input path has no stem or contains invalid UTF8.
    pub fn page_title(&self) -> Result<String> {
        if let Some(title) = &self.title {
            return Ok(title.clone());
        }

        if self.reads_stdin() {
            return Ok(FALLBACK_TITLE.to_string());
        }

        self.input
            .file_stem()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot extract title from path: {}", self.input.display()))
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(input: &str) -> Config {
        Config {
            input: PathBuf::from(input),
            output: None,
            page: false,
            title: None,
            lang: Lang::Fr,
            stylesheets: Vec::new(),
            image_class: DEFAULT_IMAGE_CLASS.to_string(),
        }
    }

    #[test]
    fn test_parse_defaults() {
        // Act
        let config = Config::try_parse_from(["sitemark"]).expect("Should parse");

        // Assert
        assert!(config.reads_stdin(), "Input should default to stdin");
        assert_eq!(config.output, None);
        assert!(!config.page);
        assert_eq!(config.lang, Lang::Fr);
        assert_eq!(config.image_class, DEFAULT_IMAGE_CLASS);
        assert!(config.stylesheets.is_empty());
    }

    #[test]
    fn test_parse_all_flags() {
        // Act
        let config = Config::try_parse_from([
            "sitemark",
            "news.md",
            "-o",
            "news.html",
            "--page",
            "--title",
            "Actualités",
            "--lang",
            "en",
            "--stylesheet",
            "/a.css",
            "--stylesheet",
            "/b.css",
            "--image-class",
            "rounded",
        ])
        .expect("Should parse");

        // Assert
        assert_eq!(config.input, PathBuf::from("news.md"));
        assert_eq!(config.output, Some(PathBuf::from("news.html")));
        assert!(config.page);
        assert_eq!(config.title.as_deref(), Some("Actualités"));
        assert_eq!(config.lang, Lang::En);
        assert_eq!(config.stylesheets, ["/a.css", "/b.css"]);
        assert_eq!(config.render_options().image_class, "rounded");
    }

    #[test]
    fn test_parse_rejects_unknown_lang() {
        let result = Config::try_parse_from(["sitemark", "--lang", "de"]);
        assert!(result.is_err(), "Only fr and en are supported");
    }

    #[test]
    fn test_page_title_explicit() {
        // Arrange
        let mut config = config("docs/presentation.md");
        config.title = Some("Présentation".to_string());

        // Act
        let title = config.page_title().expect("Should have title");

        // Assert
        assert_eq!(title, "Présentation");
    }

    #[test]
    fn test_page_title_from_file_stem() {
        let title = config("docs/presentation.md").page_title().expect("Should have title");
        assert_eq!(title, "presentation");
    }

    #[test]
    fn test_page_title_stdin_fallback() {
        let title = config(STDIN_PATH).page_title().expect("Should have title");
        assert_eq!(title, "Document");
    }

    #[test]
    fn test_validate_stdin() {
        assert!(config(STDIN_PATH).validate().is_ok(), "Stdin needs no file");
    }

    #[test]
    fn test_validate_existing_file() {
        // Arrange
        let config = config(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_ok(), "Manifest should be a valid input");
    }

    #[test]
    fn test_validate_missing_file() {
        // Act
        let result = config("does/not/exist.md").validate();

        // Assert
        let err = result.expect_err("Missing input should fail");
        assert!(err.to_string().contains("does not exist"), "{}", err);
    }

    #[test]
    fn test_validate_directory_rejected() {
        let result = config(env!("CARGO_MANIFEST_DIR")).validate();
        assert!(result.is_err(), "A directory is not a markdown file");
    }

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::Fr.code(), "fr");
        assert_eq!(Lang::En.code(), "en");
        assert_eq!(Lang::default(), Lang::Fr);
    }
}

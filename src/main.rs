use anyhow::{Context, Result};
use sitemark::{Config, MarkdownRenderer, page_wrapper};
use std::fs;
use std::io::{self, Read, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Renders the configured input to an HTML fragment.
///
/// Reads stdin when the input is `-`, otherwise the input file.
///
/// # Errors
///
/// Returns error if the input cannot be read or is not valid UTF8
fn render_fragment(config: &Config, renderer: &MarkdownRenderer) -> Result<String> {
    if config.reads_stdin() {
        let mut markdown = String::new();
        io::stdin()
            .read_to_string(&mut markdown)
            .context("Failed to read markdown from stdin")?;
        debug!(bytes = markdown.len(), "rendering markdown from stdin");
        return Ok(renderer.render(&markdown));
    }

    renderer.render_file(&config.input)
}

/// Produces the final output document.
///
/// Returns the fragment unchanged, or a complete page when `--page` is set.
///
/// # Errors
///
/// Returns error if the page title cannot be derived from the input path
fn build_output(config: &Config, fragment: String) -> Result<String> {
    if !config.page {
        return Ok(fragment);
    }

    let title = config.page_title().context("Failed to determine page title")?;
    let page = page_wrapper(&title, config.lang, &config.stylesheets, &fragment);
    Ok(page.into_string())
}

/// Writes output to the configured file or stdout.
///
/// A trailing newline is appended so the output ends like a text file.
fn write_output(config: &Config, html: &str) -> Result<()> {
    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, format!("{}\n", html))
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "generated");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", html).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitemark=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let renderer = MarkdownRenderer::with_options(&config.render_options());
    let fragment = render_fragment(&config, &renderer)?;
    let output = build_output(&config, fragment)?;
    write_output(&config, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemark::{DEFAULT_IMAGE_CLASS, Lang};
    use std::path::PathBuf;

    fn config(input: PathBuf) -> Config {
        Config {
            input,
            output: None,
            page: false,
            title: None,
            lang: Lang::Fr,
            stylesheets: Vec::new(),
            image_class: DEFAULT_IMAGE_CLASS.to_string(),
        }
    }

    #[test]
    fn test_render_fragment_from_file() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let input = dir.path().join("partenaires.md");
        fs::write(&input, "## Partenaires\n- Campus France").expect("Should write input");
        let config = config(input);
        let renderer = MarkdownRenderer::with_options(&config.render_options());

        // Act
        let html = render_fragment(&config, &renderer).expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<h2>Partenaires</h2>\n<ul>\n<li>Campus France</li>\n</ul>"
        );
    }

    #[test]
    fn test_build_output_fragment_passthrough() {
        // Arrange
        let config = config(PathBuf::from("-"));

        // Act
        let output = build_output(&config, "<p>x</p>".to_string()).expect("Should build");

        // Assert
        assert_eq!(output, "<p>x</p>");
    }

    #[test]
    fn test_build_output_page() {
        // Arrange
        let mut config = config(PathBuf::from("content/vie-etudiante.md"));
        config.page = true;
        config.lang = Lang::En;

        // Act
        let output = build_output(&config, "<p>x</p>".to_string()).expect("Should build");

        // Assert
        assert!(output.contains("<html lang=\"en\">"), "{}", output);
        assert!(output.contains("<title>vie-etudiante - Sitemark</title>"), "{}", output);
        assert!(output.contains("<p>x</p>"), "{}", output);
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let output = dir.path().join("nested/out/page.html");
        let mut config = config(PathBuf::from("-"));
        config.output = Some(output.clone());

        // Act
        write_output(&config, "<h1>x</h1>").expect("Should write");

        // Assert
        let written = fs::read_to_string(&output).expect("Output should exist");
        assert_eq!(written, "<h1>x</h1>\n");
    }
}

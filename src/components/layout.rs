//! Page layout wrapper component

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::Lang;

/// Wraps a rendered fragment with standard HTML structure
///
/// Provides DOCTYPE, language attribute, charset, viewport and stylesheet
/// loading around an `article` holding the fragment. The fragment is
/// inserted as-is since the renderer already escaped it; the title is
/// escaped by maud.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `lang`: Document language
/// * `stylesheets`: CSS file paths or URLs to include
/// * `fragment`: HTML produced by the markdown renderer
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, lang: Lang, stylesheets: &[String], fragment: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Sitemark" }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                main class="container" {
                    article class="content" {
                        (PreEscaped(fragment))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_structure() {
        // Arrange
        let fragment = "<h1>Accueil</h1>";

        // Act
        let html = page_wrapper("Accueil", Lang::Fr, &[], fragment).into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"), "Should start with doctype");
        assert!(html.contains("<html lang=\"fr\">"), "Should set language: {}", html);
        assert!(html.contains("<title>Accueil - Sitemark</title>"), "Should set title");
        assert!(
            html.contains("<article class=\"content\"><h1>Accueil</h1></article>"),
            "Should embed fragment unescaped: {}",
            html
        );
    }

    #[test]
    fn test_page_wrapper_english() {
        let html = page_wrapper("Home", Lang::En, &[], "").into_string();
        assert!(html.contains("<html lang=\"en\">"), "Should set language: {}", html);
    }

    #[test]
    fn test_page_wrapper_escapes_title() {
        // Arrange
        let title = "<script>x</script>";

        // Act
        let html = page_wrapper(title, Lang::Fr, &[], "").into_string();

        // Assert
        assert!(!html.contains("<script>"), "Title should be escaped: {}", html);
        assert!(html.contains("&lt;script&gt;"), "Title should be escaped: {}", html);
    }

    #[test]
    fn test_page_wrapper_stylesheets() {
        // Arrange
        let stylesheets = vec!["/css/site.css".to_string(), "print.css".to_string()];

        // Act
        let html = page_wrapper("Styles", Lang::Fr, &stylesheets, "").into_string();

        // Assert
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/css/site.css\">"), "{}", html);
        assert!(html.contains("<link rel=\"stylesheet\" href=\"print.css\">"), "{}", html);
    }
}

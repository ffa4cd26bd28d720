//! Utility functions for sitemark

/// Escapes HTML special characters.
///
/// Ampersands are replaced first so entities introduced by later
/// substitutions are not escaped twice.
///
/// # Arguments
///
/// * `text`: Plain text to escape
///
/// # Returns
///
/// HTML safe string
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Normalizes Windows line endings to `\n`.
///
/// Lone carriage returns are left alone; only `\r\n` pairs are collapsed.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

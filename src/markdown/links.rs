//! URL allowlist for link and image targets.

/// Scheme prefixes accepted in `href` and `src` attributes.
///
/// Compared case-insensitively.
const ALLOWED_SCHEMES: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];

/// Replacement for any target that fails the allowlist.
pub const NEUTRALIZED_URL: &str = "#";

/// Returns whether a link target may be emitted as-is.
///
/// Accepts:
/// - Absolute URLs with `http://` or `https://`
/// - `mailto:` and `tel:` targets
/// - Site-relative paths (`/actualites/2024`)
/// - Anchor links (`#programme`)
///
/// Everything else, including `javascript:`, `data:` and bare relative
/// paths, is rejected.
///
/// # Arguments
///
/// * `url`: Link target, already trimmed
pub fn is_allowed(url: &str) -> bool {
    if url.starts_with('/') || url.starts_with('#') {
        return true;
    }

    ALLOWED_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Returns the target unchanged when allowed, otherwise `#`.
///
/// Never fails: an unsafe target degrades to a dead link.
///
/// # Arguments
///
/// * `url`: Raw link target from markdown
///
/// # Returns
///
/// Trimmed target or [`NEUTRALIZED_URL`]
pub fn sanitize(url: &str) -> &str {
    let url = url.trim();
    if is_allowed(url) { url } else { NEUTRALIZED_URL }
}

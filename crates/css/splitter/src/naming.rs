//! Output file naming.
//!
//! A stylesheet `styles/main.1a2b.css` splits into `styles/main.1a2b.css`
//! (unconditioned rules) and `styles/main.1a2b.<breakpoint>.css` for every
//! non-empty width bucket. The breakpoint is always dot-delimited.

/// Extension appended to output identifiers.
pub const STYLESHEET_EXTENSION: &str = "css";

/// `name` without its `.css` extension and any `?query` after it, if it
/// has one.
pub fn strip_stylesheet_extension(name: &str) -> Option<&str> {
    let lower = name.to_ascii_lowercase();
    lower
        .match_indices(".css")
        .map(|(index, _)| index)
        .find(|&index| {
            let rest = &lower[index + ".css".len()..];
            rest.is_empty() || rest.starts_with('?')
        })
        .map(|index| &name[..index])
}

/// Whether an asset name refers to a stylesheet (`.css`, optionally followed
/// by a query string; case-insensitive).
pub fn is_stylesheet_asset(name: &str) -> bool {
    strip_stylesheet_extension(name).is_some()
}

/// The name outputs derive from: the asset name without `.css[?query]`.
pub fn base_name(name: &str) -> &str {
    strip_stylesheet_extension(name).unwrap_or(name)
}

/// `base` for the unconditioned bucket, `base.<breakpoint>` otherwise.
pub fn output_identifier(base: &str, breakpoint: Option<u32>) -> String {
    match breakpoint {
        Some(width) => format!("{base}.{width}"),
        None => base.to_owned(),
    }
}

/// File name for an output identifier.
pub fn stylesheet_file_name(identifier: &str) -> String {
    format!("{identifier}.{STYLESHEET_EXTENSION}")
}

/// Recover the breakpoint from a name produced by [`output_identifier`] and
/// [`stylesheet_file_name`].
///
/// The last dot-separated segment before `.css` must be all digits. A base
/// name whose own last segment is numeric (a numeric content hash, say) is
/// indistinguishable from a breakpoint file; prefer the breakpoint carried by
/// the split result when it is available.
pub fn breakpoint_from_file_name(name: &str) -> Option<u32> {
    let (_, segment) = strip_stylesheet_extension(name)?.rsplit_once('.')?;
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Characters kept in a stored filename; everything else is dropped
    /// - Kept: ASCII letters, digits, `_`, `.`, `-`
    /// - Dropped: path separators, quotes, non-ASCII, shell metacharacters
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]").unwrap();
}

/// Name used when nothing of the original filename survives sanitization
pub const FALLBACK_FILENAME: &str = "upload";

/// Reduce a client-supplied filename to a flat, portable name.
///
/// - Accented letters fold to their ASCII base (`café` becomes `cafe`)
/// - Path separators become spaces, so `../../etc/passwd` cannot escape the upload root
/// - Whitespace runs collapse into a single `_`
/// - Characters outside `[A-Za-z0-9_.-]` are removed
/// - Leading and trailing `.`/`_` are trimmed (no hidden files, no `..`)
pub fn sanitize_filename(original: &str) -> String {
    let folded: String = original.nfkd().collect();
    let without_separators = folded.replace(['/', '\\'], " ");
    let joined = without_separators
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lowercased text after the last `.`, or `None` when there is no dot
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

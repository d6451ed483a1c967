use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical comparison form of a Jrai or Vietnamese string.
///
/// Decomposes to NFD, drops combining marks, lowercases and trims. Letters with
/// no decomposition keep their identity, so `Đ` folds to `đ` and never to `d`.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// File name used when the caption yields no usable characters.
pub const DEFAULT_EXPORT_NAME: &str = "polaroid.png";

/// Extension appended to every derived file name.
pub const EXPORT_EXTENSION: &str = ".png";

/// Derive a download file name from the caption.
///
/// Only lowercase ASCII letters, digits and `_` survive; whitespace runs become a single `_`.
/// Accented and other non-ASCII letters are dropped, not transliterated. Captions that leave
/// nothing behind map to [`DEFAULT_EXPORT_NAME`].
pub fn export_file_name(caption: &str) -> String {
    let trimmed = caption.trim();
    if trimmed.is_empty() {
        return DEFAULT_EXPORT_NAME.to_owned();
    }

    let mut stem = String::with_capacity(trimmed.len());
    let mut pending_sep = false;
    for ch in trimmed.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_sep = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !stem.is_empty() {
                stem.push('_');
            }
            pending_sep = false;
            stem.push(ch);
        }
    }

    if stem.is_empty() {
        return DEFAULT_EXPORT_NAME.to_owned();
    }
    stem.push_str(EXPORT_EXTENSION);
    stem
}

#[cfg(test)]
#[path = "../../tests/unit/export/namer.rs"]
mod tests;

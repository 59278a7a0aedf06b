use std::borrow::Cow;

/// Decodes bytes as UTF-8, dropping any invalid sequences.
pub fn extract(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(valid) => valid.to_string(),
        Cow::Owned(replaced) => replaced.replace('\u{FFFD}', ""),
    }
}

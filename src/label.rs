//! Bounded-length text used for file labels, material names and input lines.
//!
//! Every name carried by the formats fits in 1023 bytes. Longer text is
//! truncated rather than rejected.

/// Maximum number of bytes kept for a label or a text line.
pub const MAX_LABEL_LEN: usize = 1023;

/// Truncate `text` to at most [`MAX_LABEL_LEN`] bytes.
///
/// The cut never splits a UTF-8 character, so the result can be a few bytes
/// shorter than the cap.
pub fn clip(text: &str) -> &str {
    if text.len() <= MAX_LABEL_LEN {
        return text;
    }
    let mut end = MAX_LABEL_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Owned version of [`clip`].
pub fn bounded(text: &str) -> String {
    clip(text).to_string()
}

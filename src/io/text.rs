//! Line scanning shared by the OBJ and MTL readers.

use std::io::BufRead;

use crate::error::Result;
use crate::label;

/// Call `visit(key, rest)` for every non-blank line of `reader`.
///
/// `key` is the first whitespace-delimited token and `rest` the remainder
/// with surrounding whitespace trimmed. Lines are cut to
/// [`label::MAX_LABEL_LEN`] bytes first; invalid UTF-8 is replaced rather
/// than rejected.
pub(crate) fn for_each_keyed_line<R, F>(mut reader: R, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str, &str),
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = label::clip(&line).trim();
        if line.is_empty() {
            continue;
        }
        let (key, rest) = match line.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim()),
            None => (line, ""),
        };
        visit(key, rest);
    }
    Ok(())
}

/// Parse leading whitespace-separated floats of `text` into `out`.
///
/// Parsing stops at the first token that is not a number or when `out` is
/// full. Slots past that point keep their previous values. Returns the number
/// of slots written.
pub(crate) fn parse_floats(text: &str, out: &mut [f32]) -> usize {
    let mut written = 0;
    for (slot, token) in out.iter_mut().zip(text.split_whitespace()) {
        match token.parse::<f32>() {
            Ok(value) => {
                *slot = value;
                written += 1;
            }
            Err(_) => break,
        }
    }
    written
}

/// First whitespace-delimited token of `text`, if any.
pub(crate) fn first_token(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

use memchr::{memchr, memchr2_iter};

use crate::constants::is_layout_byte;

/// Byte offsets of a quoted token: `open` and `close` point at the quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuotedSpan {
    pub open: usize,
    pub close: usize,
}

impl QuotedSpan {
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.open + 1..self.close]
    }

    pub fn is_empty(&self) -> bool {
        self.close == self.open + 1
    }
}

/// Returns the index of the `}` closing the `{` at `open`.
///
/// `None` when `open` is not a `{` or the buffer ends before depth returns to
/// zero.
pub fn match_brace(bytes: &[u8], open: usize) -> Option<usize> {
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth: usize = 0;
    for idx in memchr2_iter(b'{', b'}', &bytes[open..]) {
        let pos = open + idx;
        if bytes[pos] == b'{' {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

pub fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    let tail = bytes.get(from..)?;
    memchr(needle, tail).map(|idx| from + idx)
}

/// Next `"..."` token at or after `from`. No escape handling.
pub fn find_quoted(bytes: &[u8], from: usize) -> Option<QuotedSpan> {
    let open = find_byte(bytes, from, b'"')?;
    let close = find_byte(bytes, open + 1, b'"')?;
    Some(QuotedSpan { open, close })
}

pub fn skip_layout(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_layout_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}

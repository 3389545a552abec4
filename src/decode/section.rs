use memchr::memmem;

use crate::decode::scan::{find_byte, match_brace};
use crate::{Error, Result};

/// A brace-delimited top-level block, found by its quoted key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    /// Offset of the opening quote of the key.
    pub key: usize,
    /// Offset of `{`.
    pub open: usize,
    /// Offset of the matching `}`.
    pub close: usize,
}

impl Section {
    /// Bytes strictly between the braces.
    pub fn body<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.open + 1..self.close]
    }

    pub fn body_offset(&self) -> usize {
        self.open + 1
    }
}

/// Finds the first textual occurrence of `"key"`, the next `{` after it and
/// its balanced `}`.
///
/// `Ok(None)` when the key or the opening brace is absent. Nesting depth of
/// the key is not checked.
pub fn locate_section(bytes: &[u8], key: &str) -> Result<Option<Section>> {
    let needle = format!("\"{key}\"");
    let Some(key_at) = memmem::find(bytes, needle.as_bytes()) else {
        return Ok(None);
    };
    let Some(open) = find_byte(bytes, key_at + needle.len(), b'{') else {
        return Ok(None);
    };
    let close = match_brace(bytes, open).ok_or(Error::Unbalanced { offset: open })?;
    tracing::debug!(key, open, close, "located section");
    Ok(Some(Section {
        key: key_at,
        open,
        close,
    }))
}

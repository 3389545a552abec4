use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::decode::scan::{find_quoted, skip_layout, QuotedSpan};

/// Ordered key/value mapping of one record. Keys keep the position of their
/// first occurrence; a repeated key overwrites the earlier value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    entries: SmallVec<[(SmolStr, SmolStr); 8]>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&mut self, key: &str, value: impl AsRef<str>) {
        let value = SmolStr::new(value.as_ref());
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((SmolStr::new(key), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<SmolStr> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.set(key.as_ref(), value);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value.as_str())?;
        }
        map.end()
    }
}

/// Extracts every `"key" <whitespace> "value"` pair from a record body.
///
/// Keys must be non-empty; values may be empty and are taken verbatim. When a
/// candidate pair does not match, scanning resumes at the next quote.
pub fn parse_fields(body: &str) -> Fields {
    let bytes = body.as_bytes();
    let mut fields = Fields::new();
    let mut pos = 0;
    while let Some(key) = find_quoted(bytes, pos) {
        match pair_value(bytes, key.close + 1) {
            Some(value) if !key.is_empty() => {
                fields.set(key.inner(body), value.inner(body));
                pos = value.close + 1;
            }
            _ => pos = key.open + 1,
        }
    }
    fields
}

fn pair_value(bytes: &[u8], from: usize) -> Option<QuotedSpan> {
    let pos = skip_layout(bytes, from);
    if pos == from || bytes.get(pos) != Some(&b'"') {
        return None;
    }
    find_quoted(bytes, pos)
}

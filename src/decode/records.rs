use serde::Serialize;
use smol_str::SmolStr;

use crate::constants::{ACCOUNT_NAME, FLAG_ON, MOST_RECENT, PERSONA_NAME};
use crate::decode::fields::{parse_fields, Fields};
use crate::decode::scan::{find_byte, find_quoted, match_brace, skip_layout};

/// One account entry of the `users` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: SmolStr,
    pub fields: Fields,
}

impl Record {
    pub fn new(id: impl AsRef<str>, fields: Fields) -> Self {
        Self {
            id: SmolStr::new(id.as_ref()),
            fields,
        }
    }

    pub fn account_name(&self) -> Option<&str> {
        self.fields.get(ACCOUNT_NAME)
    }

    pub fn persona_name(&self) -> Option<&str> {
        self.fields.get(PERSONA_NAME)
    }

    pub fn is_most_recent(&self) -> bool {
        self.fields.get(MOST_RECENT) == Some(FLAG_ON)
    }
}

/// Where a record walk stopped before reaching the end of the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
    /// Offset into the section body where the unparsed remainder starts.
    pub offset: usize,
    pub parsed: usize,
}

/// Lazy walk over the sibling records of a section body.
///
/// A clone taken before iterating walks the body again from the start. Once
/// the iterator returns `None`, [`RecordSplitter::truncation`] reports whether
/// trailing text could not be read as a record.
#[derive(Clone, Debug)]
pub struct RecordSplitter<'a> {
    body: &'a str,
    pos: usize,
    parsed: usize,
    truncation: Option<Truncation>,
    done: bool,
}

impl<'a> RecordSplitter<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            body,
            pos: 0,
            parsed: 0,
            truncation: None,
            done: false,
        }
    }

    pub fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }

    fn stop(&mut self, truncated: bool) -> Option<Record> {
        if truncated {
            self.truncation = Some(Truncation {
                offset: self.pos,
                parsed: self.parsed,
            });
        }
        self.done = true;
        None
    }
}

impl Iterator for RecordSplitter<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.done {
            return None;
        }
        let bytes = self.body.as_bytes();
        self.pos = skip_layout(bytes, self.pos);
        if self.pos >= bytes.len() {
            return self.stop(false);
        }

        let Some(id) = find_quoted(bytes, self.pos) else {
            return self.stop(true);
        };
        let Some(open) = find_byte(bytes, id.close, b'{') else {
            return self.stop(true);
        };
        let Some(close) = match_brace(bytes, open) else {
            return self.stop(true);
        };

        let record = Record::new(id.inner(self.body), parse_fields(&self.body[open + 1..close]));
        self.pos = close + 1;
        self.parsed += 1;
        Some(record)
    }
}

/// Every record the splitter could read, plus where it gave up, if it did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitRecords {
    pub records: Vec<Record>,
    pub truncation: Option<Truncation>,
}

pub fn split_records(body: &str) -> SplitRecords {
    let mut splitter = RecordSplitter::new(body);
    let records = splitter.by_ref().collect();
    SplitRecords {
        records,
        truncation: splitter.truncation(),
    }
}

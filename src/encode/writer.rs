use crate::constants::{FIELD_INDENT, FIELD_SEPARATOR, RECORD_INDENT};

/// Buffer for the canonical tab-indented record layout.
pub(crate) struct Writer {
    buffer: String,
    records: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            records: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn write_quoted(&mut self, s: &str) {
        self.buffer.push('"');
        self.write_str(s);
        self.buffer.push('"');
    }

    /// `\t"<id>"\n\t{\n`, preceded by one blank line unless it is the first
    /// record.
    pub fn open_record(&mut self, id: &str) {
        if self.records > 0 {
            self.write_newline();
        }
        self.records += 1;
        self.write_str(RECORD_INDENT);
        self.write_quoted(id);
        self.write_newline();
        self.write_str(RECORD_INDENT);
        self.write_str("{");
        self.write_newline();
    }

    pub fn write_field(&mut self, key: &str, value: &str) {
        self.write_str(FIELD_INDENT);
        self.write_quoted(key);
        self.write_str(FIELD_SEPARATOR);
        self.write_quoted(value);
        self.write_newline();
    }

    pub fn close_record(&mut self) {
        self.write_str(RECORD_INDENT);
        self.write_str("}");
        self.write_newline();
    }
}

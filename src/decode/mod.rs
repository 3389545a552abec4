pub mod fields;
pub mod records;
pub mod scan;
pub mod section;

pub use fields::{parse_fields, Fields};
pub use records::{split_records, Record, RecordSplitter, SplitRecords, Truncation};
pub use section::{locate_section, Section};

use std::str;

use crate::{Error, Result, RewriteOptions};

/// A located section together with the records read from its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSection {
    pub section: Section,
    pub records: Vec<Record>,
    pub truncation: Option<Truncation>,
}

/// Locates the configured section and reads its records.
///
/// `Ok(None)` when the section does not exist. Only the section body has to
/// be UTF-8. In strict mode a truncated record walk is an error; otherwise it
/// is logged and the partial list is returned.
pub fn parse_section(text: &[u8], options: &RewriteOptions) -> Result<Option<ParsedSection>> {
    let Some(section) = locate_section(text, &options.section_key)? else {
        return Ok(None);
    };
    let body = str::from_utf8(section.body(text)).map_err(|err| Error::InvalidUtf8 {
        offset: section.body_offset() + err.valid_up_to(),
    })?;
    let SplitRecords {
        records,
        truncation,
    } = split_records(body);

    if let Some(truncation) = truncation {
        let offset = section.body_offset() + truncation.offset;
        if options.strict {
            return Err(Error::TruncatedSection {
                offset,
                parsed: truncation.parsed,
            });
        }
        tracing::warn!(
            offset,
            parsed = truncation.parsed,
            "section ends with unreadable text; trailing records dropped"
        );
    }

    Ok(Some(ParsedSection {
        section,
        records,
        truncation,
    }))
}

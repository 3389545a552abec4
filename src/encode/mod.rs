pub(crate) mod writer;

use crate::constants::FIELD_ORDER;
use crate::decode::Record;

use writer::Writer;

/// Renders records in the canonical section layout.
///
/// Only fields in [`FIELD_ORDER`] are written, in that order; absent ones are
/// skipped and unknown ones dropped. Records are separated by exactly one
/// blank line with none before the first or after the last.
pub fn serialize_records(records: &[Record]) -> String {
    let mut writer = Writer::with_capacity(records.len() * 256);
    for record in records {
        write_record(&mut writer, record);
    }
    writer.finish()
}

pub fn serialize_record(record: &Record) -> String {
    let mut writer = Writer::new();
    write_record(&mut writer, record);
    writer.finish()
}

fn write_record(writer: &mut Writer, record: &Record) {
    writer.open_record(&record.id);
    for key in FIELD_ORDER {
        if let Some(value) = record.fields.get(key) {
            writer.write_field(key, value);
        }
    }
    writer.close_record();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{split_records, Fields};

    #[rstest::rstest]
    fn test_fixed_order_and_allow_list() {
        let fields: Fields = [
            ("Timestamp", "5"),
            ("AvatarHash", "abc"),
            ("AccountName", "alice"),
            ("MostRecent", "1"),
        ]
        .into_iter()
        .collect();
        let rendered = serialize_record(&Record::new("7", fields));
        assert_eq!(
            rendered,
            "\t\"7\"\n\t{\n\t\t\"AccountName\"\t\t\"alice\"\n\t\t\"MostRecent\"\t\t\"1\"\n\t\t\"Timestamp\"\t\t\"5\"\n\t}\n"
        );
    }

    #[rstest::rstest]
    fn test_unknown_field_drop_is_a_fixed_point() {
        let body = "\t\"1\"\n\t{\n\t\t\"AccountName\"\t\t\"a\"\n\t\t\"Extra\"\t\t\"x\"\n\t}\n";
        let once = serialize_records(&split_records(body).records);
        assert!(!once.contains("Extra"));
        let twice = serialize_records(&split_records(&once).records);
        assert_eq!(once, twice);
    }

    #[rstest::rstest]
    fn test_empty_list_renders_nothing() {
        assert_eq!(serialize_records(&[]), "");
    }

    #[rstest::rstest]
    fn test_record_without_fields() {
        let rendered = serialize_record(&Record::new("1", Fields::new()));
        assert_eq!(rendered, "\t\"1\"\n\t{\n\t}\n");
    }
}

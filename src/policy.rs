use crate::constants::{
    ACCOUNT_NAME, ALLOW_AUTO_LOGIN, FLAG_OFF, FLAG_ON, MOST_RECENT, REMEMBER_PASSWORD, TIMESTAMP,
};
use crate::decode::Record;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activation {
    /// Records whose account name equals the target.
    pub matched: usize,
    /// Records cleared of the active flags.
    pub cleared: usize,
}

/// Flags the record named `target` as the active, auto-login account and
/// clears the flags on every other record.
///
/// The comparison is exact and case-sensitive. All fields not named here
/// pass through unchanged. When nothing matches, every record is cleared.
pub fn apply_activation(records: &mut [Record], target: &str, now: u64) -> Activation {
    let mut buffer = itoa::Buffer::new();
    let timestamp = buffer.format(now);
    let mut activation = Activation::default();

    for record in records.iter_mut() {
        let fields = &mut record.fields;
        if fields.get(ACCOUNT_NAME) == Some(target) {
            fields.set(REMEMBER_PASSWORD, FLAG_ON);
            fields.set(MOST_RECENT, FLAG_ON);
            fields.set(ALLOW_AUTO_LOGIN, FLAG_ON);
            fields.set(TIMESTAMP, timestamp);
            activation.matched += 1;
        } else {
            fields.set(MOST_RECENT, FLAG_OFF);
            fields.set(ALLOW_AUTO_LOGIN, FLAG_OFF);
            activation.cleared += 1;
        }
    }
    activation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Fields;

    fn record(id: &str, name: &str, flags: &str) -> Record {
        let fields: Fields = [
            (ACCOUNT_NAME, name),
            (REMEMBER_PASSWORD, "0"),
            ("WantsOfflineMode", "0"),
            (ALLOW_AUTO_LOGIN, flags),
            (MOST_RECENT, flags),
            (TIMESTAMP, "1600000000"),
        ]
        .into_iter()
        .collect();
        Record::new(id, fields)
    }

    #[rstest::rstest]
    fn test_single_target_invariant() {
        let mut records = vec![
            record("1", "alice", "1"),
            record("2", "bob", "0"),
            record("3", "carol", "1"),
        ];
        let activation = apply_activation(&mut records, "bob", 1_700_000_000);
        assert_eq!(activation, Activation { matched: 1, cleared: 2 });

        let active: Vec<_> = records
            .iter()
            .filter(|r| r.fields.get(MOST_RECENT) == Some("1"))
            .filter(|r| r.fields.get(ALLOW_AUTO_LOGIN) == Some("1"))
            .map(|r| r.account_name().unwrap())
            .collect();
        assert_eq!(active, ["bob"]);
        for other in [&records[0], &records[2]] {
            assert_eq!(other.fields.get(MOST_RECENT), Some("0"));
            assert_eq!(other.fields.get(ALLOW_AUTO_LOGIN), Some("0"));
            assert_eq!(other.fields.get(TIMESTAMP), Some("1600000000"));
        }
    }

    #[rstest::rstest]
    fn test_target_gets_remember_password_and_timestamp() {
        let mut records = vec![record("1", "alice", "0")];
        apply_activation(&mut records, "alice", 1_700_000_123);
        let fields = &records[0].fields;
        assert_eq!(fields.get(REMEMBER_PASSWORD), Some("1"));
        assert_eq!(fields.get(TIMESTAMP), Some("1700000123"));
        assert_eq!(fields.get("WantsOfflineMode"), Some("0"));
    }

    #[rstest::rstest]
    fn test_match_is_case_sensitive() {
        let mut records = vec![record("1", "Alice", "1")];
        let activation = apply_activation(&mut records, "alice", 1);
        assert_eq!(activation.matched, 0);
        assert_eq!(records[0].fields.get(MOST_RECENT), Some("0"));
    }

    #[rstest::rstest]
    fn test_missing_flags_are_added_to_others() {
        let mut records = vec![Record::new("1", [(ACCOUNT_NAME, "x")].into_iter().collect())];
        apply_activation(&mut records, "y", 1);
        assert_eq!(records[0].fields.get(MOST_RECENT), Some("0"));
        assert_eq!(records[0].fields.get(ALLOW_AUTO_LOGIN), Some("0"));
        assert!(!records[0].fields.contains(TIMESTAMP));
    }
}

/// Key of the top-level block holding one record per account.
pub const USERS_SECTION: &str = "users";

pub const ACCOUNT_NAME: &str = "AccountName";
pub const PERSONA_NAME: &str = "PersonaName";
pub const REMEMBER_PASSWORD: &str = "RememberPassword";
pub const WANTS_OFFLINE_MODE: &str = "WantsOfflineMode";
pub const SKIP_OFFLINE_MODE_WARNING: &str = "SkipOfflineModeWarning";
pub const ALLOW_AUTO_LOGIN: &str = "AllowAutoLogin";
pub const MOST_RECENT: &str = "MostRecent";
pub const TIMESTAMP: &str = "Timestamp";

/// Fields the serializer emits, in emission order. Anything else is dropped.
pub const FIELD_ORDER: [&str; 8] = [
    ACCOUNT_NAME,
    PERSONA_NAME,
    REMEMBER_PASSWORD,
    WANTS_OFFLINE_MODE,
    SKIP_OFFLINE_MODE_WARNING,
    ALLOW_AUTO_LOGIN,
    MOST_RECENT,
    TIMESTAMP,
];

pub const FLAG_ON: &str = "1";
pub const FLAG_OFF: &str = "0";

pub const RECORD_INDENT: &str = "\t";
pub const FIELD_INDENT: &str = "\t\t";
pub const FIELD_SEPARATOR: &str = "\t\t";

#[inline]
pub fn is_known_field(name: &str) -> bool {
    FIELD_ORDER.contains(&name)
}

/// Whitespace the record splitter skips between blocks.
#[inline]
pub fn is_layout_byte(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

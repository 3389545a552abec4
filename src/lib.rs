pub mod config;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod host;
pub mod options;
pub mod policy;
pub mod rewrite;
pub mod splice;
pub mod store;
pub mod switch;

pub use crate::config::{SteamPaths, STEAM_PATH_ENV};
pub use crate::decode::{parse_section, Fields, ParsedSection, Record, Section, Truncation};
pub use crate::encode::{serialize_record, serialize_records};
pub use crate::error::Error;
pub use crate::host::{CommandOutput, KillOutcome, SteamHost, WindowsHost};
pub use crate::options::{RewriteOptions, SwitchOptions};
pub use crate::policy::{apply_activation, Activation};
pub use crate::rewrite::{
    list_accounts, set_active_account, unix_now, AccountSummary, Rewrite, Rewritten,
};
pub use crate::splice::splice_section;
pub use crate::store::LoginUsersFile;
pub use crate::switch::{Launched, SwitchReport, Switcher};

pub type Result<T> = std::result::Result<T, Error>;

/// Reads `file`, activates `account` and writes the result back.
///
/// Returns `Rewrite::SectionMissing` without touching the file when there is
/// no section to edit.
pub fn rewrite_file(
    file: &LoginUsersFile,
    account: &str,
    now: u64,
    options: &RewriteOptions,
) -> Result<Rewrite> {
    let text = file.read()?;
    let rewrite = set_active_account(&text, account, now, options)?;
    if let Some(updated) = rewrite.text() {
        file.write(updated)?;
    }
    Ok(rewrite)
}

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use smol_str::SmolStr;

use crate::decode::{parse_section, Record, Truncation};
use crate::encode::serialize_records;
use crate::policy::{apply_activation, Activation};
use crate::splice::splice_section;
use crate::{Result, RewriteOptions};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rewrite {
    /// No section with the configured key; the document must be left as is.
    SectionMissing,
    Rewritten(Rewritten),
}

impl Rewrite {
    pub fn text(&self) -> Option<&[u8]> {
        match self {
            Rewrite::SectionMissing => None,
            Rewrite::Rewritten(rewritten) => Some(rewritten.text.as_slice()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewritten {
    pub text: Vec<u8>,
    pub records: Vec<Record>,
    pub activation: Activation,
    pub truncation: Option<Truncation>,
}

/// Account listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: SmolStr,
    pub account_name: SmolStr,
    pub persona_name: Option<SmolStr>,
    pub most_recent: bool,
}

/// Marks `target` as the auto-login account inside the login file bytes.
///
/// Only the section body is rebuilt; bytes before its `{` and from its `}` on
/// are copied unchanged.
pub fn set_active_account(
    text: &[u8],
    target: &str,
    now: u64,
    options: &RewriteOptions,
) -> Result<Rewrite> {
    let Some(parsed) = parse_section(text, options)? else {
        tracing::debug!(key = %options.section_key, "section missing, nothing to rewrite");
        return Ok(Rewrite::SectionMissing);
    };
    let mut records = parsed.records;
    let activation = apply_activation(&mut records, target, now);
    let body = serialize_records(&records);
    let text = splice_section(text, &parsed.section, &body);
    Ok(Rewrite::Rewritten(Rewritten {
        text,
        records,
        activation,
        truncation: parsed.truncation,
    }))
}

/// Records of the section that carry an account name, in source order.
pub fn list_accounts(text: &[u8], options: &RewriteOptions) -> Result<Vec<AccountSummary>> {
    let Some(parsed) = parse_section(text, options)? else {
        return Ok(Vec::new());
    };
    Ok(parsed
        .records
        .iter()
        .filter_map(|record| {
            Some(AccountSummary {
                id: record.id.clone(),
                account_name: SmolStr::new(record.account_name()?),
                persona_name: record.persona_name().map(SmolStr::new),
                most_recent: record.is_most_recent(),
            })
        })
        .collect())
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

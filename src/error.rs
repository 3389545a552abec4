use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unbalanced brace at byte {offset}")]
    Unbalanced { offset: usize },

    #[error("section body is not valid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("section truncated at byte {offset} after {parsed} record(s)")]
    TruncatedSection { offset: usize, parsed: usize },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("account not found: {account}. Please log in with this account in Steam first")]
    AccountNotFound { account: String },

    #[error("Steam path not found in registry or STEAM_PATH environment variable")]
    SteamPathNotFound,

    #[error("{program}: {message}")]
    Command { program: String, message: String },

    #[error("Steam is still running after {attempts} termination attempt(s)")]
    SteamStillRunning { attempts: usize },

    #[error("launch command is empty")]
    InvalidLaunchCommand,
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn command(program: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Command {
            program: program.into(),
            message: message.into(),
        }
    }

    pub fn account_not_found(account: impl Into<String>) -> Self {
        Error::AccountNotFound {
            account: account.into(),
        }
    }

    /// True for failures that come from parsing the login file rather than
    /// from the store or the host.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::Unbalanced { .. } | Error::InvalidUtf8 { .. } | Error::TruncatedSection { .. }
        )
    }
}

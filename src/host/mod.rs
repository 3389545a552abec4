pub mod mock;
mod windows;

use std::path::{Path, PathBuf};

pub use mock::{MockCall, MockHost};
pub use windows::{parse_reg_query, WindowsHost};

use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillOutcome {
    /// A termination request was delivered to at least one process.
    Signalled,
    NotRunning,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// stdout followed by stderr.
    pub combined: String,
}

/// Registry values and the Steam process.
pub trait SteamHost {
    /// Install directory recorded by the Steam installer, if any.
    fn install_path(&self) -> Result<Option<PathBuf>>;

    /// Account Steam will log into on its next start.
    fn auto_login_user(&self) -> Result<Option<String>>;

    fn set_auto_login_user(&self, account: &str) -> Result<()>;

    fn kill_steam(&self) -> Result<KillOutcome>;

    fn steam_running(&self) -> Result<bool>;

    /// Starts `program` without waiting for it.
    fn spawn(&self, program: &Path) -> Result<()>;

    /// Runs a command to completion.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

impl<H: SteamHost + ?Sized> SteamHost for &H {
    fn install_path(&self) -> Result<Option<PathBuf>> {
        (**self).install_path()
    }

    fn auto_login_user(&self) -> Result<Option<String>> {
        (**self).auto_login_user()
    }

    fn set_auto_login_user(&self, account: &str) -> Result<()> {
        (**self).set_auto_login_user(account)
    }

    fn kill_steam(&self) -> Result<KillOutcome> {
        (**self).kill_steam()
    }

    fn steam_running(&self) -> Result<bool> {
        (**self).steam_running()
    }

    fn spawn(&self, program: &Path) -> Result<()> {
        (**self).spawn(program)
    }

    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

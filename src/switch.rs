use std::thread;

use crate::config::SteamPaths;
use crate::host::{CommandOutput, KillOutcome, SteamHost};
use crate::rewrite::{list_accounts, unix_now, AccountSummary, Rewrite};
use crate::store::LoginUsersFile;
use crate::{rewrite_file, Error, Result, SwitchOptions};

/// Placeholder in a custom launch command, replaced with the Steam executable.
pub const STEAM_PATH_PLACEHOLDER: &str = "STEAM_PATH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchReport {
    pub account: String,
    pub kill_attempts: usize,
    /// False when the login file has no users section and was left alone.
    pub login_file_updated: bool,
    pub records: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Launched {
    Spawned,
    Command {
        program: String,
        args: Vec<String>,
        output: CommandOutput,
    },
}

/// Drives a switch against one Steam installation.
pub struct Switcher<H> {
    host: H,
    paths: SteamPaths,
    options: SwitchOptions,
    clock: fn() -> u64,
}

impl<H: SteamHost> Switcher<H> {
    pub fn new(host: H, paths: SteamPaths, options: SwitchOptions) -> Self {
        Self {
            host,
            paths,
            options,
            clock: unix_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn paths(&self) -> &SteamPaths {
        &self.paths
    }

    pub fn login_file(&self) -> LoginUsersFile {
        LoginUsersFile::new(self.paths.login_users())
    }

    pub fn accounts(&self) -> Result<Vec<AccountSummary>> {
        let text = self.login_file().read()?;
        list_accounts(&text, &self.options.rewrite)
    }

    pub fn account_names(&self) -> Result<Vec<String>> {
        Ok(self
            .accounts()?
            .into_iter()
            .map(|account| account.account_name.to_string())
            .collect())
    }

    pub fn current_account(&self) -> Result<Option<String>> {
        self.host.auto_login_user()
    }

    /// Validates `account`, stops Steam, rewrites the login file and points
    /// the auto-login registry value at the account.
    pub fn switch_to(&self, account: &str) -> Result<SwitchReport> {
        if !self.account_names()?.iter().any(|name| name == account) {
            return Err(Error::account_not_found(account));
        }
        tracing::info!(account, "switching account");

        let kill_attempts = self.stop_steam()?;

        tracing::info!(path = %self.paths.login_users().display(), "updating login file");
        let now = (self.clock)();
        let (login_file_updated, records) =
            match rewrite_file(&self.login_file(), account, now, &self.options.rewrite)? {
                Rewrite::SectionMissing => (false, 0),
                Rewrite::Rewritten(rewritten) => (true, rewritten.records.len()),
            };

        tracing::info!(account, "updating auto-login registry value");
        self.host.set_auto_login_user(account)?;

        Ok(SwitchReport {
            account: account.to_string(),
            kill_attempts,
            login_file_updated,
            records,
        })
    }

    /// Terminates Steam and waits until no process is left.
    ///
    /// Returns the number of termination requests sent.
    pub fn stop_steam(&self) -> Result<usize> {
        tracing::info!("stopping Steam");
        for attempt in 1..=self.options.max_kill_attempts {
            if self.host.kill_steam()? == KillOutcome::NotRunning {
                return Ok(attempt - 1);
            }
            thread::sleep(self.options.kill_poll_interval);
            if !self.host.steam_running()? {
                return Ok(attempt);
            }
            tracing::debug!(attempt, "Steam still running");
        }
        Err(Error::SteamStillRunning {
            attempts: self.options.max_kill_attempts,
        })
    }

    /// Starts Steam, through the custom launch command when one is set.
    pub fn launch_steam(&self) -> Result<Launched> {
        let executable = self.paths.executable();
        let launched = match self.options.launch_command.as_deref() {
            None => {
                tracing::info!(path = %executable.display(), "starting Steam");
                self.host.spawn(&executable)?;
                Launched::Spawned
            }
            Some(command) => {
                let mut parts =
                    expand_launch_command(command, &executable.to_string_lossy()).into_iter();
                let program = parts.next().ok_or(Error::InvalidLaunchCommand)?;
                let args: Vec<String> = parts.collect();
                tracing::info!(%program, ?args, "running launch command");
                let output = self.host.run(&program, &args)?;
                if !output.success {
                    tracing::warn!(%program, "launch command exited unsuccessfully");
                }
                Launched::Command {
                    program,
                    args,
                    output,
                }
            }
        };
        thread::sleep(self.options.launch_settle);
        Ok(launched)
    }
}

/// Splits `command` on whitespace and substitutes the first
/// [`STEAM_PATH_PLACEHOLDER`] of each part with `executable`.
pub fn expand_launch_command(command: &str, executable: &str) -> Vec<String> {
    command
        .split_whitespace()
        .map(|part| part.replacen(STEAM_PATH_PLACEHOLDER, executable, 1))
        .collect()
}

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CommandOutput, KillOutcome, SteamHost};
use crate::{Error, Result};

/// A recorded call to the mock host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    InstallPath,
    AutoLoginUser,
    SetAutoLoginUser(String),
    KillSteam,
    SteamRunning,
    Spawn(PathBuf),
    Run(String, Vec<String>),
}

#[derive(Debug, Default)]
struct State {
    install_path: Option<PathBuf>,
    install_path_fails: bool,
    auto_login_user: Option<String>,
    kill_outcomes: VecDeque<KillOutcome>,
    running: VecDeque<bool>,
    run_output: CommandOutput,
    calls: Vec<MockCall>,
}

/// In-memory host for tests. Records every call and answers from
/// pre-configured state.
#[derive(Debug, Default)]
pub struct MockHost {
    state: Mutex<State>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_install_path(self, path: impl Into<PathBuf>) -> Self {
        self.lock().install_path = Some(path.into());
        self
    }

    /// Make `install_path` return an error, as a missing registry tool would.
    pub fn with_failing_install_path(self) -> Self {
        self.lock().install_path_fails = true;
        self
    }

    pub fn with_auto_login_user(self, account: impl Into<String>) -> Self {
        self.lock().auto_login_user = Some(account.into());
        self
    }

    /// Answers for successive `kill_steam` calls; `NotRunning` once exhausted.
    pub fn with_kill_outcomes(self, outcomes: impl IntoIterator<Item = KillOutcome>) -> Self {
        self.lock().kill_outcomes = outcomes.into_iter().collect();
        self
    }

    /// Answers for successive `steam_running` calls; `false` once exhausted.
    pub fn with_running(self, running: impl IntoIterator<Item = bool>) -> Self {
        self.lock().running = running.into_iter().collect();
        self
    }

    pub fn with_run_output(self, output: CommandOutput) -> Self {
        self.lock().run_output = output;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    pub fn current_auto_login_user(&self) -> Option<String> {
        self.lock().auto_login_user.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: MockCall) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl SteamHost for MockHost {
    fn install_path(&self) -> Result<Option<PathBuf>> {
        let state = self.record(MockCall::InstallPath);
        if state.install_path_fails {
            return Err(Error::command("reg", "not available"));
        }
        Ok(state.install_path.clone())
    }

    fn auto_login_user(&self) -> Result<Option<String>> {
        Ok(self.record(MockCall::AutoLoginUser).auto_login_user.clone())
    }

    fn set_auto_login_user(&self, account: &str) -> Result<()> {
        self.record(MockCall::SetAutoLoginUser(account.to_string()))
            .auto_login_user = Some(account.to_string());
        Ok(())
    }

    fn kill_steam(&self) -> Result<KillOutcome> {
        let mut state = self.record(MockCall::KillSteam);
        Ok(state.kill_outcomes.pop_front().unwrap_or(KillOutcome::NotRunning))
    }

    fn steam_running(&self) -> Result<bool> {
        let mut state = self.record(MockCall::SteamRunning);
        Ok(state.running.pop_front().unwrap_or(false))
    }

    fn spawn(&self, program: &Path) -> Result<()> {
        self.record(MockCall::Spawn(program.to_path_buf()));
        Ok(())
    }

    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let state = self.record(MockCall::Run(program.to_string(), args.to_vec()));
        Ok(state.run_output.clone())
    }
}

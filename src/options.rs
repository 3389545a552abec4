use std::time::Duration;

use crate::constants::USERS_SECTION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub section_key: String,
    pub strict: bool,
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section_key(mut self, key: impl Into<String>) -> Self {
        self.section_key = key.into();
        self
    }

    /// Fail instead of dropping records after an unreadable one.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            section_key: USERS_SECTION.to_string(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOptions {
    pub rewrite: RewriteOptions,
    pub kill_poll_interval: Duration,
    pub max_kill_attempts: usize,
    pub launch_settle: Duration,
    /// Replaces the plain `steam.exe` launch. `STEAM_PATH` in any argument is
    /// substituted with the executable path.
    pub launch_command: Option<String>,
}

impl SwitchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rewrite(mut self, rewrite: RewriteOptions) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn with_kill_poll_interval(mut self, interval: Duration) -> Self {
        self.kill_poll_interval = interval;
        self
    }

    pub fn with_max_kill_attempts(mut self, attempts: usize) -> Self {
        self.max_kill_attempts = attempts.max(1);
        self
    }

    pub fn with_launch_settle(mut self, settle: Duration) -> Self {
        self.launch_settle = settle;
        self
    }

    pub fn with_launch_command(mut self, command: Option<String>) -> Self {
        self.launch_command = command;
        self
    }
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            rewrite: RewriteOptions::default(),
            kill_poll_interval: Duration::from_secs(1),
            max_kill_attempts: 30,
            launch_settle: Duration::from_secs(3),
            launch_command: None,
        }
    }
}

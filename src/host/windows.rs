use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use super::{CommandOutput, KillOutcome, SteamHost};
use crate::{Error, Result};

const INSTALL_KEY: &str = r"HKLM\SOFTWARE\WOW6432Node\Valve\Steam";
const INSTALL_VALUE: &str = "InstallPath";
const USER_KEY: &str = r"HKCU\Software\Valve\Steam";
const AUTO_LOGIN_VALUE: &str = "AutoLoginUser";
const STEAM_IMAGE: &str = "steam.exe";

/// `taskkill` exit status when no process matched the filter.
const TASKKILL_NO_MATCH: i32 = 128;
/// `reg query` exit status when the key or value does not exist.
const REG_NOT_FOUND: i32 = 1;

/// Host backed by the stock Windows tools `reg`, `taskkill` and `tasklist`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsHost;

impl WindowsHost {
    pub fn new() -> Self {
        Self
    }

    fn query(&self, key: &str, value: &str) -> Result<Option<String>> {
        let output = exec("reg", &["query", key, "/v", value])?;
        if !output.status.success() {
            if output.status.code() == Some(REG_NOT_FOUND) {
                return Ok(None);
            }
            return Err(failure("reg", &output));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(parse_reg_query(&text, value))
    }
}

impl SteamHost for WindowsHost {
    fn install_path(&self) -> Result<Option<PathBuf>> {
        Ok(self.query(INSTALL_KEY, INSTALL_VALUE)?.map(PathBuf::from))
    }

    fn auto_login_user(&self) -> Result<Option<String>> {
        self.query(USER_KEY, AUTO_LOGIN_VALUE)
    }

    fn set_auto_login_user(&self, account: &str) -> Result<()> {
        let output = exec(
            "reg",
            &["add", USER_KEY, "/v", AUTO_LOGIN_VALUE, "/t", "REG_SZ", "/d", account, "/f"],
        )?;
        if !output.status.success() {
            return Err(failure("reg", &output));
        }
        Ok(())
    }

    fn kill_steam(&self) -> Result<KillOutcome> {
        let output = exec("taskkill", &["/F", "/IM", STEAM_IMAGE])?;
        match output.status.code() {
            Some(0) => Ok(KillOutcome::Signalled),
            Some(TASKKILL_NO_MATCH) => Ok(KillOutcome::NotRunning),
            _ => Err(failure("taskkill", &output)),
        }
    }

    fn steam_running(&self) -> Result<bool> {
        let filter = format!("IMAGENAME eq {STEAM_IMAGE}");
        let output = exec("tasklist", &["/FI", &filter, "/NH"])?;
        if !output.status.success() {
            return Err(failure("tasklist", &output));
        }
        let listing = String::from_utf8_lossy(&output.stdout).to_ascii_lowercase();
        Ok(listing.contains(STEAM_IMAGE))
    }

    fn spawn(&self, program: &Path) -> Result<()> {
        Command::new(program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|err| Error::command(program.display().to_string(), err.to_string()))
    }

    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|err| Error::command(program, err.to_string()))?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(CommandOutput {
            success: output.status.success(),
            combined,
        })
    }
}

fn exec(program: &str, args: &[&str]) -> Result<Output> {
    tracing::trace!(program, ?args, "exec");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|err| Error::command(program, err.to_string()))
}

fn failure(program: &str, output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match output.status.code() {
        Some(code) => format!("exit status {code}: {}", stderr.trim()),
        None => format!("terminated by signal: {}", stderr.trim()),
    };
    Error::command(program, message)
}

/// Extracts `value` from `reg query` output.
///
/// Value lines look like `    AutoLoginUser    REG_SZ    alice`; the data is
/// everything after the type column and may contain spaces or be empty.
pub fn parse_reg_query(output: &str, value: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix(value)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.trim_start();
        if !rest.starts_with("REG_") {
            return None;
        }
        let data = match rest.find(char::is_whitespace) {
            Some(idx) => rest[idx..].trim_start(),
            None => "",
        };
        Some(data.trim_end_matches(['\r', '\n']).to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = "\r\nHKEY_CURRENT_USER\\Software\\Valve\\Steam\r\n    AutoLoginUser    REG_SZ    alice\r\n\r\n";

    #[rstest::rstest]
    fn test_parse_reg_query_value() {
        assert_eq!(parse_reg_query(QUERY, "AutoLoginUser").as_deref(), Some("alice"));
    }

    #[rstest::rstest]
    fn test_parse_reg_query_keeps_inner_spaces() {
        let output = "HKEY_LOCAL_MACHINE\\SOFTWARE\\WOW6432Node\\Valve\\Steam\n    InstallPath    REG_SZ    C:\\Program Files (x86)\\Steam\n";
        assert_eq!(
            parse_reg_query(output, "InstallPath").as_deref(),
            Some("C:\\Program Files (x86)\\Steam")
        );
    }

    #[rstest::rstest]
    fn test_parse_reg_query_empty_data() {
        let output = "    AutoLoginUser    REG_SZ    \r\n";
        assert_eq!(parse_reg_query(output, "AutoLoginUser").as_deref(), Some(""));
    }

    #[rstest::rstest]
    #[case("AutoLogin")]
    #[case("autologinuser")]
    #[case("Missing")]
    fn test_parse_reg_query_requires_exact_name(#[case] name: &str) {
        assert_eq!(parse_reg_query(QUERY, name), None);
    }
}

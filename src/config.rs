use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::host::SteamHost;
use crate::{Error, Result};

/// Fallback for the install directory when the registry has none.
pub const STEAM_PATH_ENV: &str = "STEAM_PATH";

const LOGIN_USERS_FILE: &str = "loginusers.vdf";
const CONFIG_DIR: &str = "config";
const STEAM_EXECUTABLE: &str = "steam.exe";

/// Locations inside a Steam installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteamPaths {
    install_dir: PathBuf,
}

impl SteamPaths {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
        }
    }

    /// Resolves the install directory: `explicit`, then the host registry,
    /// then [`STEAM_PATH_ENV`].
    pub fn resolve<H: SteamHost>(explicit: Option<&Path>, host: &H) -> Result<Self> {
        Self::resolve_with_env(explicit, host, |key| env::var_os(key))
    }

    pub fn resolve_with_env<H, F>(explicit: Option<&Path>, host: &H, lookup: F) -> Result<Self>
    where
        H: SteamHost,
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(dir) = explicit {
            return Ok(Self::new(dir));
        }
        match host.install_path() {
            Ok(Some(dir)) if !dir.as_os_str().is_empty() => return Ok(Self::new(dir)),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "registry lookup failed, trying {STEAM_PATH_ENV}");
            }
        }
        match lookup(STEAM_PATH_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir)),
            _ => Err(Error::SteamPathNotFound),
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn login_users(&self) -> PathBuf {
        self.install_dir.join(CONFIG_DIR).join(LOGIN_USERS_FILE)
    }

    pub fn executable(&self) -> PathBuf {
        self.install_dir.join(STEAM_EXECUTABLE)
    }
}

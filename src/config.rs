use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::Filesystem;

/// Home directory used when the current user cannot be resolved.
const DEFAULT_HOME: &str = "/root";

/// Run-wide settings shared by every action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// action to perform with terraform
    pub action: String,
    /// credentials for fetching private modules and providers
    pub netrc: Netrc,
}

/// One `.netrc` stanza.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netrc {
    pub machine: String,
    pub login: String,
    pub password: String,
}

impl Netrc {
    pub fn render(&self) -> String {
        format!("\nmachine {}\nlogin {}\npassword {}\n", self.machine, self.login, self.password)
    }
}

pub fn netrc_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME))
        .join(".netrc")
}

impl Config {
    /// Write the `.netrc` file, readable by its owner only.
    pub fn write(&self, fs: &dyn Filesystem, path: &Path) -> Result<()> {
        tracing::trace!("writing .netrc credentials file to {}", path.display());

        fs.write_file(path, self.netrc.render().as_bytes(), 0o600)
            .map_err(|e| Error::fs(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        tracing::trace!("validating config plugin configuration");

        if self.action.is_empty() {
            return Err(Error::MissingAction);
        }
        Ok(())
    }
}

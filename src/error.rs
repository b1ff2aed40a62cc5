use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no config action provided")]
    MissingAction,
    #[error("invalid action provided: {provided} (Valid actions: {valid})")]
    InvalidAction { provided: String, valid: String },
    #[error("invalid terraform version: {0:?}")]
    InvalidVersion(String),
    #[error("unable to unmarshal init options: {0}")]
    InitOptions(#[from] serde_json::Error),
    #[error("unable to launch `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}", .code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    Exit { command: String, code: Option<i32> },
    #[error("`{command}` interrupted")]
    Interrupted { command: String },
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to download terraform from {url}: {source}")]
    Download { url: String, source: reqwest::Error },
    #[error("unable to read terraform release archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("terraform release archive has no `terraform` entry")]
    MissingBinary,
}

impl Error {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Exit status the plugin should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Exit { code: Some(code), .. } if *code != 0 => *code,
            Error::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        let err = Error::Exit { command: "terraform plan".into(), code: Some(2) };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "`terraform plan` exited with status 2");

        let err = Error::Exit { command: "terraform plan".into(), code: None };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "`terraform plan` exited with signal");

        assert_eq!(Error::MissingAction.exit_code(), 1);
    }
}

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::Filesystem;

const DOWNLOAD: &str = "https://releases.hashicorp.com/terraform";

pub fn download_url(version: &str) -> String {
    format!("{DOWNLOAD}/{version}/terraform_{version}_linux_amd64.zip")
}

/// Swaps the image's terraform binary for a requested release.
pub struct Installer<'a> {
    fs: &'a dyn Filesystem,
    http: reqwest::Client,
    binary: PathBuf,
}

impl<'a> Installer<'a> {
    pub fn new(fs: &'a dyn Filesystem, binary: impl Into<PathBuf>) -> Self {
        Self { fs, http: reqwest::Client::new(), binary: binary.into() }
    }

    /// Make `requested` the installed terraform. Nothing happens when it
    /// already matches `default`, the release baked into the image.
    pub async fn install(&self, requested: &str, default: &str) -> Result<()> {
        tracing::info!("custom terraform version requested: {}", requested);

        if requested.eq_ignore_ascii_case(default) {
            return Ok(());
        }
        tracing::debug!("custom version does not match default: {}", default);

        // keep the image's binary around instead of overwriting it
        let backup = self.backup_path();
        self.fs
            .rename(&self.binary, &backup)
            .map_err(|e| Error::fs(&self.binary, e))?;

        let url = download_url(requested);
        tracing::info!("downloading terraform version from: {}", url);
        let archive = self.fetch(&url).await?;
        let binary = extract_binary(&archive)?;

        tracing::debug!("changing permissions of file: {}", self.binary.display());
        self.fs
            .write_file(&self.binary, &binary, 0o700)
            .and_then(|_| self.fs.set_mode(&self.binary, 0o700))
            .map_err(|e| Error::fs(&self.binary, e))
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.binary.as_os_str().to_owned();
        name.push(".default");
        PathBuf::from(name)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let download = |source| Error::Download { url: url.to_string(), source };

        let res = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(download)?;
        let bytes = res.bytes().await.map_err(download)?;
        Ok(bytes.to_vec())
    }
}

/// Pull the `terraform` executable out of a release archive.
pub fn extract_binary(archive: &[u8]) -> Result<Vec<u8>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let is_binary = Path::new(entry.name()).file_name().is_some_and(|n| n == "terraform");
        if entry.is_file() && is_binary {
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut data)
                .map_err(|e| Error::Archive(e.into()))?;
            return Ok(data);
        }
    }
    Err(Error::MissingBinary)
}

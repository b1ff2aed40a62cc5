//! Filesystem capability handed to the pieces of the plugin that touch disk
//! (credential writing, binary installation), so tests can swap in memory.

use std::io;
use std::path::Path;

#[cfg(unix)]
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

pub trait Filesystem: Send + Sync {
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;
}

/// The real operating system filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl Filesystem for OsFs {
    #[cfg(unix)]
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        // new files are created with `mode`; existing ones are narrowed
        // before any contents land in them
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(mode)
            .open(path)?;
        file.set_permissions(std::fs::Permissions::from_mode(mode))?;
        file.write_all(contents)
    }

    #[cfg(not(unix))]
    fn write_file(&self, path: &Path, contents: &[u8], _mode: u32) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, _path: &Path, _mode: u32) -> io::Result<()> { Ok(()) }
}

#[cfg(test)]
pub use mem::MemFs;

#[cfg(test)]
mod mem {
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::Filesystem;

    /// In-memory filesystem; optionally read-only.
    #[derive(Debug, Default)]
    pub struct MemFs {
        files: Mutex<HashMap<PathBuf, (Vec<u8>, u32)>>,
        read_only: bool,
    }

    impl MemFs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn read_only() -> Self {
            Self { read_only: true, ..Self::default() }
        }

        /// Seed a file, bypassing the read-only flag.
        pub fn with_file(self, path: impl Into<PathBuf>, contents: &[u8], mode: u32) -> Self {
            self.files.lock().unwrap().insert(path.into(), (contents.to_vec(), mode));
            self
        }

        pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).map(|(data, _)| data.clone())
        }

        pub fn mode(&self, path: &Path) -> Option<u32> {
            self.files.lock().unwrap().get(path).map(|(_, mode)| *mode)
        }

        fn check_writable(&self) -> io::Result<()> {
            if self.read_only {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"));
            }
            Ok(())
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path.display()))
    }

    impl Filesystem for MemFs {
        fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
            self.check_writable()?;
            self.files.lock().unwrap().insert(path.to_path_buf(), (contents.to_vec(), mode));
            Ok(())
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            self.check_writable()?;
            let mut files = self.files.lock().unwrap();
            let entry = files.remove(from).ok_or_else(|| not_found(from))?;
            files.insert(to.to_path_buf(), entry);
            Ok(())
        }

        fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
            self.check_writable()?;
            let mut files = self.files.lock().unwrap();
            let entry = files.get_mut(path).ok_or_else(|| not_found(path))?;
            entry.1 = mode;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_os_fs_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".netrc");

        OsFs.write_file(&path, b"machine example.com", 0o600).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"machine example.com");

        #[cfg(unix)]
        {
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_os_fs_write_file_narrows_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".netrc");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        OsFs.write_file(&path, b"password hunter2", 0o600).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"password hunter2");
    }

    #[cfg(unix)]
    #[test]
    fn test_os_fs_write_file_created_with_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("terraform");

        // an empty write leaves only what `open` produced
        OsFs.write_file(&path, b"", 0o600).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_os_fs_rename_missing() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("terraform");
        let to = temp_dir.path().join("terraform.default");
        assert!(OsFs.rename(&from, &to).is_err());
    }

    #[test]
    fn test_mem_fs() {
        let fs = MemFs::new();
        let path = Path::new("/bin/terraform");
        fs.write_file(path, b"bin", 0o755).unwrap();
        fs.set_mode(path, 0o700).unwrap();
        assert_eq!(fs.mode(path), Some(0o700));

        fs.rename(path, Path::new("/bin/terraform.default")).unwrap();
        assert!(fs.read(path).is_none());
        assert_eq!(fs.read(Path::new("/bin/terraform.default")).unwrap(), b"bin");

        let ro = MemFs::read_only().with_file("/bin/terraform", b"bin", 0o755);
        assert!(ro.write_file(path, b"x", 0o600).is_err());
        assert!(ro.rename(path, Path::new("/tmp/x")).is_err());
    }
}

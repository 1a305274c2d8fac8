//! Plaintext token storage
//!
//! The whole file content is the token. It is written owner read/write only.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::GistError;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl AsRef<Path>) -> TokenStore {
        TokenStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token.
    ///
    /// Trailing line endings are dropped so a hand-edited file still works.
    /// A missing or empty file is `TokenNotFound`.
    pub fn read(&self) -> Result<String, GistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GistError::TokenNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => {
                return Err(GistError::io(
                    format!("reading token from {}", self.path.display()),
                    e,
                ))
            }
        };

        let token = content.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if token.trim().is_empty() {
            return Err(GistError::TokenNotFound {
                path: self.path.clone(),
            });
        }

        Ok(token.to_string())
    }

    /// Create or overwrite the token file with mode 0600.
    pub fn write(&self, token: &str) -> Result<(), GistError> {
        let context = || format!("writing token to {}", self.path.display());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GistError::io(context(), e))?;
            }
        }

        let mut file = open_private(&self.path).map_err(|e| GistError::io(context(), e))?;
        file.write_all(token.as_bytes())
            .map_err(|e| GistError::io(context(), e))?;

        restrict_permissions(&self.path).map_err(|e| GistError::io(context(), e))?;

        log::debug!("token written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// The open mode only applies on creation, so an existing file is fixed up here.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join(".gogist"));

        store.write("ghp_abc123").unwrap();

        assert_eq!(store.read().unwrap(), "ghp_abc123");
        assert_eq!(fs::read(store.path()).unwrap(), b"ghp_abc123");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join(".gogist"));
        store.write("secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_tightens_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gogist");
        fs::write(&path, "old-token-that-is-longer").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = TokenStore::new(&path);
        store.write("new").unwrap();

        assert_eq!(store.read().unwrap(), "new");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/config/.gogist"));

        store.write("t0k3n").unwrap();

        assert_eq!(store.read().unwrap(), "t0k3n");
    }

    #[test]
    fn test_read_missing_file_is_token_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join(".gogist"));

        match store.read() {
            Err(GistError::TokenNotFound { path }) => assert_eq!(path, store.path()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_empty_file_is_token_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gogist");
        fs::write(&path, "\n").unwrap();

        let result = TokenStore::new(&path).read();
        assert!(matches!(result, Err(GistError::TokenNotFound { .. })));
    }

    #[test]
    fn test_read_strips_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gogist");
        fs::write(&path, "ghp_edited\r\n").unwrap();

        assert_eq!(TokenStore::new(&path).read().unwrap(), "ghp_edited");
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = TokenStore::new(dir.path()).read();
        assert!(matches!(result, Err(GistError::Io { .. })));
    }
}

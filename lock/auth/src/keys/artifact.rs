use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

/**
    A uniquely named file in a work directory, removed on drop.

    Names are `{unix millis}-{random 64-bit}.{ext}`, so concurrent
    pipelines sharing a directory never collide. Removal is best effort:
    a file that is already gone is logged and otherwise ignored.
*/
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /**
        Reserve a fresh name in `dir`. Nothing is created on disk until the
        artifact is written (or an external program writes to its path).
    */
    pub fn new(dir: &Path, ext: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let suffix: u64 = rand::random();
        Self {
            path: dir.join(format!("{millis}-{suffix:016x}.{ext}")),
        }
    }

    /**
        Another artifact sharing this one's stem, with a different extension.
    */
    pub fn sibling(&self, ext: &str) -> Self {
        Self {
            path: self.path.with_extension(ext),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /**
        Create the file and write `contents`. Fails if it already exists.
    */
    pub fn write(&self, contents: &[u8]) -> AuthResult<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| AuthError::file_io(&self.path, e))?;
        file.write_all(contents)
            .map_err(|e| AuthError::file_io(&self.path, e))
    }

    pub fn read(&self) -> AuthResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| AuthError::file_io(&self.path, e))
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temp artifact"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "temp artifact already absent");
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temp artifact");
            }
        }
    }
}

//! Файловое хранилище параметров
//!
//! Layout: one file per key inside the params directory, the file content is
//! the raw value. Writes go through a temporary file and a rename so a reader
//! never sees a half-written value.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::{validate_key, ParamStore};
use crate::error::Result;

const TMP_PREFIX: &str = ".tmp_";

/// Distinguishes temp files of concurrent writers inside one process
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Parameter store backed by a directory
#[derive(Debug, Clone)]
pub struct FileParams {
    dir: PathBuf,
}

impl FileParams {
    /// The directory is created lazily on the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the parameter files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{}{}.{}.{}", TMP_PREFIX, key, std::process::id(), seq))
    }

    /// Убедиться, что директория существует
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl ParamStore for FileParams {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;

        let tmp_path = self.tmp_path(key);
        if let Err(e) = write_new(&tmp_path, value.as_bytes()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        // Make the rename itself durable
        #[cfg(unix)]
        fs::File::open(&self.dir)?.sync_all()?;

        debug!(key, bytes = value.len(), "param written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "param removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Create a fresh file readable by the owner only and fill it
fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

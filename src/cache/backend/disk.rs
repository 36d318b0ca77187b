//! Disk Backend
//!
//! One file per key under a dedicated directory. Writes go to a temp file that
//! is renamed into place, so a crash mid-write never leaves a partial entry
//! under a live key.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::StorageBackend;
use crate::cache::{CacheKey, EntryMetadata};
use crate::error::{CacheError, Result};

const TEMP_SUFFIX: &str = ".tmp";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

// == Disk Backend ==
#[derive(Debug, Clone)]
pub struct DiskBackend {
    directory: PathBuf,
}

impl DiskBackend {
    /// Opens (and creates if needed) the cache directory.
    ///
    /// A directory that cannot be created is logged; every write retries the
    /// creation, so the backend heals once the path becomes writable.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        if let Err(e) = fs::create_dir_all(&directory) {
            warn!(dir = %directory.display(), error = %e, "failed to create cache directory");
        }
        Self { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Location of the file backing `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.directory.join(key.as_str())
    }

    // == Usage ==
    /// Total bytes and number of entry files in the directory.
    ///
    /// A missing or unreadable directory counts as empty.
    pub fn usage(&self) -> (u64, usize) {
        let Ok(dir) = fs::read_dir(&self.directory) else {
            return (0, 0);
        };
        dir.filter_map(|entry| entry.ok())
            .filter(|entry| is_entry_name(&entry.file_name().to_string_lossy()))
            .filter_map(|entry| entry.metadata().ok())
            .filter(|meta| meta.is_file())
            .fold((0, 0), |(size, count), meta| (size + meta.len(), count + 1))
    }

    fn temp_path(&self, key: &CacheKey) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.directory.join(format!(
            "{}.{}.{}{}",
            key,
            std::process::id(),
            seq,
            TEMP_SUFFIX
        ))
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> CacheError {
    let path = path.to_path_buf();
    move |e| CacheError::io(path, e)
}

fn is_entry_name(name: &str) -> bool {
    !name.ends_with(TEMP_SUFFIX) && !name.starts_with('.')
}

fn write_file(path: &Path, bytes: &[u8], modified: SystemTime) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.set_modified(modified)?;
    Ok(())
}

impl StorageBackend for DiskBackend {
    fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn write(&self, key: &CacheKey, bytes: &[u8], written_at: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.directory).map_err(io_err(&self.directory))?;

        let path = self.path_for(key);
        let tmp = self.temp_path(key);
        let result = write_file(&tmp, bytes, SystemTime::from(written_at))
            .and_then(|_| fs::rename(&tmp, &path));

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::io(path, e));
        }
        Ok(())
    }

    fn delete(&self, key: &CacheKey) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn list(&self) -> Result<Vec<CacheKey>> {
        let dir = match fs::read_dir(&self.directory) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(&self.directory, e)),
        };

        let mut keys = Vec::new();
        for entry in dir {
            let entry = entry.map_err(io_err(&self.directory))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_entry_name(&name) {
                keys.push(CacheKey::from_file_name(name));
            }
        }
        Ok(keys)
    }

    fn metadata(&self, key: &CacheKey) -> Result<Option<EntryMetadata>> {
        let path = self.path_for(key);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, e)),
        };
        let modified = meta.modified().map_err(io_err(&path))?;
        Ok(Some(EntryMetadata {
            size: meta.len(),
            written_at: DateTime::<Utc>::from(modified),
        }))
    }

    /// Removes every file in the directory, leftover temp files included.
    fn clear(&self) -> Result<usize> {
        let dir = match fs::read_dir(&self.directory) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CacheError::io(&self.directory, e)),
        };

        let mut removed = 0;
        for entry in dir.filter_map(|entry| entry.ok()) {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            match fs::remove_file(&path) {
                Ok(()) => {
                    if is_entry_name(&entry.file_name().to_string_lossy()) {
                        removed += 1;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(CacheError::io(path, e)),
            }
        }
        Ok(removed)
    }
}

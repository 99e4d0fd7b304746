//! Generic load/mutate/save primitive over one JSON document on disk.
//!
//! Nothing is cached between calls: every operation re-reads the file so a
//! write made by another process is visible on the next call. Writes go to a
//! temp file that is renamed over the target, so readers never observe a torn
//! document. With [`LockMode::Exclusive`] each read-modify-write cycle also
//! holds an advisory lock on a `<file>.lock` sidecar, closing the lost-update
//! window between concurrent writers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// How a store serializes concurrent writers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Exclusive advisory lock on a sidecar file around every mutation.
    #[default]
    Exclusive,
    /// No mutual exclusion. Concurrent writers may silently overwrite each
    /// other's updates.
    None,
}

/// Crash-tolerant read-modify-write access to one ledger file.
#[derive(Debug, Clone)]
pub struct RecordStore<D> {
    path: PathBuf,
    lock_mode: LockMode,
    default: fn() -> D,
}

impl<D> RecordStore<D>
where
    D: Serialize + DeserializeOwned,
{
    /// Store backed by `path`, falling back to `D::default()` when the file is
    /// missing or unreadable.
    pub fn new(path: impl Into<PathBuf>) -> Self
    where
        D: Default,
    {
        Self::with_default(path, D::default)
    }

    pub fn with_default(path: impl Into<PathBuf>, default: fn() -> D) -> Self {
        Self {
            path: path.into(),
            lock_mode: LockMode::default(),
            default,
        }
    }

    pub fn lock_mode(mut self, mode: LockMode) -> Self {
        self.lock_mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file yields the default; an unparsable
    /// one is logged and also yields the default.
    pub fn load(&self) -> D {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ledger file yet, starting fresh");
                return (self.default)();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read ledger, using default");
                return (self.default)();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ledger is corrupt, using default");
                (self.default)()
            }
        }
    }

    /// Serialize and atomically replace the backing file.
    pub fn try_save(&self, doc: &D) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(doc).map_err(io::Error::other)?;
        atomic_write(&self.path, &data)
    }

    /// Like [`try_save`](Self::try_save), but failures are logged and
    /// swallowed; the caller still returns its in-memory result.
    pub fn save(&self, doc: &D) {
        if let Err(e) = self.try_save(doc) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist ledger");
        }
    }

    /// Load, hand the document to `f`, and persist it if `f` succeeds.
    ///
    /// An `Err` from `f` leaves the file untouched.
    pub fn modify<R, E>(&self, f: impl FnOnce(&mut D) -> Result<R, E>) -> Result<R, E> {
        let _guard = self.acquire();
        let mut doc = self.load();
        let out = f(&mut doc)?;
        self.save(&doc);
        Ok(out)
    }

    /// Load and inspect the document without writing.
    pub fn read<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        let doc = self.load();
        f(&doc)
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn acquire(&self) -> Option<LockGuard> {
        if self.lock_mode == LockMode::None {
            return None;
        }
        match LockGuard::exclusive(&self.lock_path()) {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not lock ledger, continuing unlocked");
                None
            }
        }
    }
}

/// Holds an exclusive advisory lock until dropped.
struct LockGuard {
    file: File,
}

impl LockGuard {
    fn exclusive(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.lock()?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Write to a uniquely named temp file beside `path`, then rename over it.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let temp_path = path.with_file_name(name);
    if let Err(e) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};

use crate::errors::BackendError;

pub mod mock;

/// An append-only line store.
pub trait Store: Send + Sync {
    /// Appends one serialized record as a line.
    ///
    /// A successful return means the line was handed to the OS write
    /// path; there is no fsync beyond the OS default and no retry.
    fn append(&self, line: String) -> BoxFuture<Result<(), BackendError>>;
}

/// A store that appends lines to a local file. No locking is taken:
/// concurrent appends rely on OS-level append-mode writes interleaving
/// at line granularity for reasonably small lines.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store writing to the given path. The file is created
    /// on first append if it does not exist and is never truncated.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStore {
            path: path.as_ref().to_owned(),
        }
    }
}

impl Store for FileStore {
    fn append(&self, line: String) -> BoxFuture<Result<(), BackendError>> {
        append_line(self.path.clone(), line).boxed()
    }
}

async fn append_line(path: PathBuf, line: String) -> Result<(), BackendError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| BackendError::AppendFailed { source })?;

    writeln!(file, "{}", line).map_err(|source| BackendError::AppendFailed { source })?;

    Ok(())
}

//! File-backed key-value store scoped to a single directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::fmt;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::todo::ports::{KeyValueStore, StorageError, StorageResult};

const FILE_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = "tmp";

/// Key-value store keeping each key in `<root>/<key>.json`.
///
/// All file access goes through a capability handle for the root directory,
/// so keys can never escape it. Writes land in a temporary file that is then
/// renamed over the previous value.
#[derive(Clone)]
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl fmt::Debug for FileKeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileKeyValueStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FileKeyValueStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(StorageError::io)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(StorageError::io)?;
        debug!(root = %root, "opened file key-value store");
        Ok(Self {
            root: root.to_owned(),
            dir: Arc::new(dir),
        })
    }
}

/// Maps a key to its file name, rejecting keys that are not plain names.
fn file_name_for(key: &str) -> StorageResult<String> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if !is_valid {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.{FILE_EXTENSION}"))
}

fn write_error(key: &str, err: std::io::Error) -> StorageError {
    if err.kind() == ErrorKind::StorageFull {
        return StorageError::QuotaExceeded {
            key: key.to_owned(),
        };
    }
    StorageError::io(err)
}

/// Runs blocking filesystem work off the async executor.
async fn run_blocking<F, T>(f: F) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Unavailable(format!("task join error: {e}")))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let file_name = file_name_for(key)?;
        let dir = Arc::clone(&self.dir);
        run_blocking(move || match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(err)),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let file_name = file_name_for(key)?;
        let temp_name = format!("{file_name}.{TEMP_SUFFIX}");
        let owned_key = key.to_owned();
        let contents = value.to_owned();
        let dir = Arc::clone(&self.dir);
        run_blocking(move || {
            dir.write(&temp_name, contents)
                .map_err(|err| write_error(&owned_key, err))?;
            dir.rename(&temp_name, &dir, &file_name).map_err(|err| {
                if let Err(cleanup) = dir.remove_file(&temp_name) {
                    warn!(file = %temp_name, error = %cleanup, "could not remove temporary file");
                }
                write_error(&owned_key, err)
            })
        })
        .await?;
        debug!(key, bytes = value.len(), "wrote key-value entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let file_name = file_name_for(key)?;
        let dir = Arc::clone(&self.dir);
        run_blocking(move || match dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(err)),
        })
        .await
    }
}

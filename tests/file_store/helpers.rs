//! Shared helpers for file-backed store integration tests.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::fixture;
use tempfile::TempDir;
use toist::todo::adapters::fs::FileKeyValueStore;

/// File store rooted in a temporary directory removed on drop.
pub struct TempStore {
    /// Store under test.
    pub store: FileKeyValueStore,
    /// Root directory of the store.
    pub root: Utf8PathBuf,
    _dir: TempDir,
}

impl TempStore {
    /// Lists the file names currently in the store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn file_names(&self) -> Result<Vec<String>, eyre::Report> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())?;
        let mut names = Vec::new();
        for entry in dir.entries()? {
            names.push(entry?.file_name()?);
        }
        Ok(names)
    }

    /// Reopens the store at the same root, as a later session would.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn reopen(&self) -> Result<FileKeyValueStore, eyre::Report> {
        Ok(FileKeyValueStore::open(&self.root)?)
    }
}

/// Provides a file store in a fresh nested temporary directory.
///
/// The store root does not exist beforehand, so opening it also exercises
/// directory creation.
///
/// # Errors
///
/// Returns an error if the temporary directory or the store cannot be
/// created.
#[fixture]
pub fn temp_store() -> Result<TempStore, eyre::Report> {
    let dir = tempfile::tempdir()?;
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| eyre::eyre!("temporary path is not UTF-8: {}", path.display()))?;
    let root = base.join("data");
    let store = FileKeyValueStore::open(&root)?;
    Ok(TempStore {
        store,
        root,
        _dir: dir,
    })
}

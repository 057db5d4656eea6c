//! One JSON file per key inside a capability-scoped data directory.
//!
//! Writes go to a hidden temporary file in the same directory which is then
//! renamed over the target, so readers never observe a partial document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, is_valid_key};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-backed store rooted at a data directory.
#[derive(Debug)]
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileKeyValueStore {
    /// Open (creating if needed) the data directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self { root, dir })
    }

    fn file_name(key: &str) -> Result<String, KeyValueStoreError> {
        if is_valid_key(key) {
            Ok(format!("{key}.json"))
        } else {
            Err(KeyValueStoreError::invalid_key(key))
        }
    }

    fn write_atomic(&self, file_name: &str, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let written = self.dir.open_with(&tmp_name, &options).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        let renamed = written.and_then(|()| self.dir.rename(&tmp_name, &self.dir, file_name));
        if let Err(error) = renamed {
            drop(self.dir.remove_file(&tmp_name));
            return Err(error);
        }
        Ok(())
    }
}

fn io_error(key: &str, error: &io::Error) -> KeyValueStoreError {
    KeyValueStoreError::io(key, error.to_string())
}

impl KeyValueStore for FileKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let file_name = Self::file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(io_error(key, &error)),
        }
    }

    fn save(&self, key: &str, json: &str) -> Result<(), KeyValueStoreError> {
        let file_name = Self::file_name(key)?;
        self.write_atomic(&file_name, json)
            .map_err(|error| io_error(key, &error))?;
        debug!(key, root = %self.root, bytes = json.len(), "document saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let file_name = Self::file_name(key)?;
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(key, &error)),
        }
    }
}

//! Persistence of the single note file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the note inside the data directory.
pub const NOTE_FILE_NAME: &str = "note.md";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read note {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write note {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Platform data directory for braincache.
pub fn data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("braincache");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("braincache");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("braincache");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("braincache");
        }
    }

    PathBuf::from(".braincache")
}

pub fn default_note_path() -> PathBuf {
    data_dir().join(NOTE_FILE_NAME)
}

/// Loads and saves the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStorage {
    path: PathBuf,
}

impl NoteStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the note. A missing file is an empty note.
    pub fn load(&self) -> Result<String, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the note through a temp file and rename, creating parent
    /// directories as needed.
    pub fn save(&self, content: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(write_err)?;
        if let Err(source) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(write_err(source));
        }
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "note saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| NOTE_FILE_NAME.into(), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for NoteStorage {
    fn default() -> Self {
        Self::new(default_note_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = NoteStorage::new(dir.path().join("note.md"));
        assert_eq!(storage.load().unwrap(), "");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let storage = NoteStorage::new(dir.path().join("note.md"));
        storage.save("- milk\n- eggs\n").unwrap();
        assert_eq!(storage.load().unwrap(), "- milk\n- eggs\n");
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("note.md");
        let storage = NoteStorage::new(&path);
        storage.save("hello").unwrap();
        assert!(path.exists());
        assert!(!path.with_file_name("note.md.tmp").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let storage = NoteStorage::new(dir.path().join("note.md"));
        storage.save("first").unwrap();
        storage.save("").unwrap();
        assert_eq!(storage.load().unwrap(), "");
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let storage = NoteStorage::new(dir.path());
        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(err.to_string().contains("Failed to read note"));
    }

    #[test]
    fn test_default_note_path_ends_with_note_file() {
        assert!(default_note_path().ends_with(NOTE_FILE_NAME));
    }
}

//! Credential file storage.
//!
//! Saved keys live in a TOML file:
//!
//! ```toml
//! [[keys]]
//! name = "shellhub"
//! data = "..."
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::credential::{Credential, CredentialList};

/// Maximum file size for the credentials file (1MB).
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File too large.
    #[error("File too large (max {MAX_FILE_SIZE} bytes)")]
    FileTooLarge,

    /// Key name is blank.
    #[error("Key name must not be empty")]
    EmptyName,

    /// Key file has no content.
    #[error("Key material must not be empty")]
    EmptyKeyData,

    /// Too many saved keys.
    #[error("Key limit reached")]
    TooManyKeys,

    /// No key with the given name.
    #[error("No saved key named '{0}'")]
    KeyNotFound(String),
}

/// Loads and saves the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Creates a storage manager with the default path.
    ///
    /// Default path: `~/.hubterm/keys.toml`
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Creates a storage manager with a custom path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default storage path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hubterm")
            .join("keys.toml")
    }

    /// Returns the storage path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved keys. A missing file yields an empty list.
    pub fn load(&self) -> Result<CredentialList, StorageError> {
        if !self.path.exists() {
            return Ok(CredentialList::new());
        }

        let metadata = fs::metadata(&self.path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(StorageError::FileTooLarge);
        }

        let content = fs::read_to_string(&self.path)?;
        let mut list: CredentialList = toml::from_str(&content)?;
        let dropped = list.truncate_to_limit();
        if dropped > 0 {
            tracing::warn!(
                "Ignoring {} key(s) past the limit in {}",
                dropped,
                self.path.display()
            );
        }
        tracing::debug!("Loaded {} key(s) from {}", list.len(), self.path.display());
        Ok(list)
    }

    /// Saves the keys, replacing the file atomically.
    pub fn save(&self, list: &CredentialList) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(list)?;
        if content.len() as u64 > MAX_FILE_SIZE {
            return Err(StorageError::FileTooLarge);
        }
        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = create_private(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Reads `key_file` and saves it under `name`.
    pub fn add_key_file(&self, name: &str, key_file: &Path) -> Result<(), StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }

        if fs::metadata(key_file)?.len() > MAX_FILE_SIZE {
            return Err(StorageError::FileTooLarge);
        }
        let data = fs::read_to_string(key_file)?;
        if data.trim().is_empty() {
            return Err(StorageError::EmptyKeyData);
        }

        let mut list = self.load()?;
        if !list.add(Credential::new(name, data)) {
            return Err(StorageError::TooManyKeys);
        }
        self.save(&list)?;
        tracing::info!("Saved key '{}'", name);
        Ok(())
    }

    /// Removes every key named `name`.
    pub fn remove_key(&self, name: &str) -> Result<usize, StorageError> {
        let mut list = self.load()?;
        let removed = list.remove_named(name);
        if removed == 0 {
            return Err(StorageError::KeyNotFound(name.to_string()));
        }
        self.save(&list)?;
        tracing::info!("Removed {} key(s) named '{}'", removed, name);
        Ok(removed)
    }
}

/// Opens `path` for writing, readable by the owner only.
///
/// A leftover file keeps its inode, so its mode is reset as well.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

impl Default for CredentialStorage {
    fn default() -> Self {
        Self::new()
    }
}

//! Saved key-pair credentials.
//!
//! Provides functionality for:
//! - The ordered list of named keys offered by the terminal dialog
//! - The read-only listing seam the dialog consumes
//! - Persisting keys to a TOML file

pub mod credential;
pub mod storage;

pub use credential::{Credential, CredentialList, CredentialStore};
pub use storage::{CredentialStorage, StorageError};

//! Saved key-pair credentials.

use serde::{Deserialize, Serialize};

/// Maximum number of saved keys.
const MAX_KEYS: usize = 100;

/// A named, previously saved private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Name shown in the key selector. Not required to be unique.
    pub name: String,
    /// Opaque key material.
    pub data: String,
}

impl Credential {
    /// Creates a new credential.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Read-only listing capability consumed by the terminal dialog.
///
/// Implementations return a snapshot; callers re-read instead of
/// subscribing to changes.
pub trait CredentialStore {
    /// Returns the saved credentials in display order.
    fn list_credentials(&self) -> Vec<Credential>;
}

/// Ordered collection of saved credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialList {
    #[serde(default)]
    keys: Vec<Credential>,
}

impl CredentialList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of saved keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no key is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns an iterator over the keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.keys.iter()
    }

    /// Returns the key at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Credential> {
        self.keys.get(index)
    }

    /// Appends a key. Returns false if the list is full.
    pub fn add(&mut self, credential: Credential) -> bool {
        if self.keys.len() >= MAX_KEYS {
            return false;
        }
        self.keys.push(credential);
        true
    }

    /// Drops keys past the limit, returning how many were dropped.
    pub fn truncate_to_limit(&mut self) -> usize {
        let dropped = self.keys.len().saturating_sub(MAX_KEYS);
        self.keys.truncate(MAX_KEYS);
        dropped
    }

    /// Removes every key named `name`, returning how many were removed.
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.keys.len();
        self.keys.retain(|k| k.name != name);
        before - self.keys.len()
    }
}

impl FromIterator<Credential> for CredentialList {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().take(MAX_KEYS).collect(),
        }
    }
}

impl CredentialStore for CredentialList {
    fn list_credentials(&self) -> Vec<Credential> {
        self.keys.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_preserves_order() {
        let list: CredentialList = [
            Credential::new("shellhub", "BBGVvbmF"),
            Credential::new("shellhub", "AbGVvbmF"),
        ]
        .into_iter()
        .collect();

        let listed = list.list_credentials();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].data, "BBGVvbmF");
        assert_eq!(listed[1].data, "AbGVvbmF");
    }

    #[test]
    fn test_remove_named_removes_duplicates() {
        let mut list = CredentialList::new();
        list.add(Credential::new("shellhub", "a"));
        list.add(Credential::new("work", "b"));
        list.add(Credential::new("shellhub", "c"));

        assert_eq!(list.remove_named("shellhub"), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).map(|k| k.name.as_str()), Some("work"));
        assert_eq!(list.remove_named("missing"), 0);
    }

    #[test]
    fn test_add_respects_limit() {
        let mut list = CredentialList::new();
        for i in 0..MAX_KEYS {
            assert!(list.add(Credential::new(format!("key{}", i), "data")));
        }
        assert!(!list.add(Credential::new("overflow", "data")));
        assert_eq!(list.len(), MAX_KEYS);
    }

    #[test]
    fn test_truncate_to_limit() {
        let mut list: CredentialList = toml::from_str(
            &(0..MAX_KEYS + 5)
                .map(|i| format!("[[keys]]\nname = \"k{}\"\ndata = \"d\"\n", i))
                .collect::<String>(),
        )
        .unwrap_or_default();
        assert_eq!(list.len(), MAX_KEYS + 5);

        assert_eq!(list.truncate_to_limit(), 5);
        assert_eq!(list.len(), MAX_KEYS);
        assert_eq!(list.truncate_to_limit(), 0);
    }
}

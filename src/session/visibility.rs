//! Process-wide record of which target's terminal dialog is open.

/// Visibility store consulted by the embedding application.
///
/// The dialog only reads the derived `show` flag; toggling is done by
/// whoever embeds it.
pub trait SessionVisibility {
    /// Returns true if the dialog for `target` is open.
    fn is_open_for(&self, target: &str) -> bool;

    /// Opens the dialog for `target`, or closes it if it is already open.
    fn toggle(&mut self, target: &str);
}

/// In-memory registry holding at most one open target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityRegistry {
    open: Option<String>,
}

impl VisibilityRegistry {
    /// Creates a registry with no open dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionVisibility for VisibilityRegistry {
    fn is_open_for(&self, target: &str) -> bool {
        self.open.as_deref() == Some(target)
    }

    fn toggle(&mut self, target: &str) {
        if self.is_open_for(target) {
            tracing::debug!(device = target, "Closing terminal dialog");
            self.open = None;
        } else {
            tracing::debug!(device = target, "Opening terminal dialog");
            self.open = Some(target.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut registry = VisibilityRegistry::new();
        assert!(!registry.is_open_for("a582b47a"));

        registry.toggle("a582b47a");
        assert!(registry.is_open_for("a582b47a"));

        registry.toggle("a582b47a");
        assert!(!registry.is_open_for("a582b47a"));
        assert_eq!(registry, VisibilityRegistry::new());
    }

    #[test]
    fn test_toggle_other_target_switches() {
        let mut registry = VisibilityRegistry::new();
        registry.toggle("first");
        registry.toggle("second");

        assert!(!registry.is_open_for("first"));
        assert!(registry.is_open_for("second"));
    }
}

//! Stable identifiers for interactive elements.
//!
//! Widgets record where each interactive element was drawn. The map backs
//! mouse hit-testing and lets tests address elements by name instead of
//! screen coordinates.

use ratatui::layout::{Position, Rect};

use crate::session::AuthMethod;

/// Identifier of an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Full connect button, also the Password tab's submit button.
    ConnectButton,
    /// Compact console icon trigger.
    ConsoleIcon,
    /// Menu item paired with the console icon.
    ConsoleItem,
    /// Dialog container.
    TerminalDialog,
    /// Method tab header.
    Tab(AuthMethod),
    /// Username input on the Password tab.
    UsernameField,
    /// Password input.
    PasswordField,
    /// Username input on the PublicKey tab.
    Username2Field,
    /// Saved key selector.
    PrivateKeysSelect,
    /// PublicKey tab's submit button.
    Connect2Button,
}

impl ElementId {
    /// Returns the stable name of the element.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectButton => "connect-btn",
            Self::ConsoleIcon => "console-icon",
            Self::ConsoleItem => "console-item",
            Self::TerminalDialog => "terminal-dialog",
            Self::Tab(AuthMethod::Password) => "Password-tab",
            Self::Tab(AuthMethod::PublicKey) => "PublicKey-tab",
            Self::UsernameField => "username-field",
            Self::PasswordField => "passwd-field",
            Self::Username2Field => "username2-field",
            Self::PrivateKeysSelect => "privatekeys-select",
            Self::Connect2Button => "connect2-btn",
        }
    }

    /// Looks an element up by its stable name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let id = match name {
            "connect-btn" => Self::ConnectButton,
            "console-icon" => Self::ConsoleIcon,
            "console-item" => Self::ConsoleItem,
            "terminal-dialog" => Self::TerminalDialog,
            "Password-tab" => Self::Tab(AuthMethod::Password),
            "PublicKey-tab" => Self::Tab(AuthMethod::PublicKey),
            "username-field" => Self::UsernameField,
            "passwd-field" => Self::PasswordField,
            "username2-field" => Self::Username2Field,
            "privatekeys-select" => Self::PrivateKeysSelect,
            "connect2-btn" => Self::Connect2Button,
            _ => return None,
        };
        Some(id)
    }
}

/// Elements drawn in the last frame, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct ElementMap {
    entries: Vec<(ElementId, Rect)>,
}

impl ElementMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every element. Called before each frame.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records an element drawn at `area`.
    pub fn register(&mut self, id: ElementId, area: Rect) {
        self.entries.push((id, area));
    }

    /// Returns true if the element was drawn.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.iter().any(|(e, _)| *e == id)
    }

    /// Returns true if an element with the stable `name` was drawn.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        ElementId::parse(name).is_some_and(|id| self.contains(id))
    }

    /// Returns how many times the element was drawn.
    #[must_use]
    pub fn count(&self, id: ElementId) -> usize {
        self.entries.iter().filter(|(e, _)| *e == id).count()
    }

    /// Returns the area of the last drawn instance of the element.
    #[must_use]
    pub fn area(&self, id: ElementId) -> Option<Rect> {
        self.entries
            .iter()
            .rev()
            .find(|(e, _)| *e == id)
            .map(|(_, area)| *area)
    }

    /// Returns the stable names of all drawn elements, in drawing order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(e, _)| e.as_str()).collect()
    }

    /// Returns the topmost element under the point.
    ///
    /// While the dialog container is drawn it is modal: points outside it
    /// hit nothing.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ElementId> {
        let point = Position::new(x, y);

        if let Some(dialog) = self.area(ElementId::TerminalDialog) {
            if !dialog.contains(point) {
                return None;
            }
        }

        self.entries
            .iter()
            .rev()
            .find(|(_, area)| area.contains(point))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        let all = [
            ElementId::ConnectButton,
            ElementId::ConsoleIcon,
            ElementId::ConsoleItem,
            ElementId::TerminalDialog,
            ElementId::Tab(AuthMethod::Password),
            ElementId::Tab(AuthMethod::PublicKey),
            ElementId::UsernameField,
            ElementId::PasswordField,
            ElementId::Username2Field,
            ElementId::PrivateKeysSelect,
            ElementId::Connect2Button,
        ];
        for id in all {
            assert_eq!(ElementId::parse(id.as_str()), Some(id));
        }
        assert_eq!(ElementId::parse("unknown"), None);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut map = ElementMap::new();
        map.register(ElementId::ConsoleItem, Rect::new(0, 0, 20, 1));
        map.register(ElementId::ConsoleIcon, Rect::new(0, 0, 2, 1));

        assert_eq!(map.hit_test(1, 0), Some(ElementId::ConsoleIcon));
        assert_eq!(map.hit_test(10, 0), Some(ElementId::ConsoleItem));
        assert_eq!(map.hit_test(10, 5), None);
    }

    #[test]
    fn test_hit_test_modal_dialog() {
        let mut map = ElementMap::new();
        map.register(ElementId::ConnectButton, Rect::new(0, 0, 10, 1));
        map.register(ElementId::TerminalDialog, Rect::new(5, 2, 30, 10));
        map.register(ElementId::UsernameField, Rect::new(6, 4, 20, 1));

        assert_eq!(map.hit_test(1, 0), None);
        assert_eq!(map.hit_test(7, 4), Some(ElementId::UsernameField));
        assert_eq!(map.hit_test(30, 10), Some(ElementId::TerminalDialog));
    }

    #[test]
    fn test_count_and_clear() {
        let mut map = ElementMap::new();
        map.register(ElementId::ConnectButton, Rect::new(0, 0, 10, 1));
        map.register(ElementId::ConnectButton, Rect::new(0, 5, 10, 1));

        assert_eq!(map.count(ElementId::ConnectButton), 2);
        assert_eq!(map.area(ElementId::ConnectButton), Some(Rect::new(0, 5, 10, 1)));
        assert!(map.contains_name("connect-btn"));

        map.clear();
        assert!(!map.contains(ElementId::ConnectButton));
    }
}

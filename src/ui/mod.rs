//! UI components.

pub mod element_map;
pub mod key_hints;
pub mod terminal_dialog;

pub use element_map::{ElementId, ElementMap};
pub use terminal_dialog::{TerminalDialog, TerminalDialogWidget};

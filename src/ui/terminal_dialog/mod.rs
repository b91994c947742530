//! Terminal connection dialog.
//!
//! One state machine behind two trigger affordances: a full connect
//! button, or a console icon paired with a menu item.

mod state;
mod types;
mod widget;
mod widget_render;

pub use state::TerminalDialog;
pub use types::{DialogError, DialogField, FormValidity};
pub use widget::TerminalDialogWidget;
pub use widget_render::key_list_offset;

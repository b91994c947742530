//! Mouse input handling for the application.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ui::ElementId;
use crate::ui::terminal_dialog::{DialogField, key_list_offset};

use super::App;

impl App {
    /// Handles mouse events.
    pub(super) fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.element_map.borrow().hit_test(event.column, event.row);
                if let Some(id) = hit {
                    self.click(id, event.row);
                }
            }
            MouseEventKind::ScrollUp => {
                if self.is_over(ElementId::PrivateKeysSelect, event) {
                    let keys = self.keys();
                    self.dialog.select_prev_key(&keys);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.is_over(ElementId::PrivateKeysSelect, event) {
                    let keys = self.keys();
                    self.dialog.select_next_key(&keys);
                }
            }
            _ => {}
        }
    }

    /// Returns true if the event lands on `id`.
    fn is_over(&self, id: ElementId, event: MouseEvent) -> bool {
        self.element_map.borrow().hit_test(event.column, event.row) == Some(id)
    }

    /// Dispatches a click on an element.
    fn click(&mut self, id: ElementId, row: u16) {
        tracing::trace!("Clicked {}", id.as_str());

        match id {
            ElementId::ConnectButton if self.is_dialog_visible() => self.submit(),
            ElementId::ConnectButton | ElementId::ConsoleIcon | ElementId::ConsoleItem => {
                self.open_dialog();
            }
            ElementId::Tab(method) => self.dialog.select_method(method),
            ElementId::UsernameField | ElementId::Username2Field => {
                self.dialog.focus(DialogField::Username);
            }
            ElementId::PasswordField => self.dialog.focus(DialogField::Password),
            ElementId::PrivateKeysSelect => self.click_key_list(row),
            ElementId::Connect2Button => self.submit(),
            ElementId::TerminalDialog => {}
        }
    }

    /// Selects the key drawn on `row` of the key list.
    fn click_key_list(&mut self, row: u16) {
        self.dialog.focus(DialogField::PrivateKey);

        let Some(area) = self.element_map.borrow().area(ElementId::PrivateKeysSelect) else {
            return;
        };
        let offset = key_list_offset(self.dialog.selected_key(), area.height);
        let index = offset + usize::from(row.saturating_sub(area.y));

        let keys = self.keys();
        self.dialog.select_key(index, &keys);
    }
}

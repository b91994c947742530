//! Key input handling for the application.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::terminal_dialog::DialogField;

use super::App;

impl App {
    /// Handles a key event.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.is_dialog_visible() {
            self.handle_dialog_key(key);
        } else {
            self.handle_panel_key(key);
        }
    }

    /// Handles keys while the dialog is closed.
    fn handle_panel_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => {
                self.quit();
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('c')) => {
                self.open_dialog();
            }
            _ => {}
        }
    }

    /// Handles keys while the dialog is open.
    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let on_key_list = self.dialog.focused_field() == DialogField::PrivateKey;

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.quit(),
            (_, KeyCode::Esc) => self.close_dialog(),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => self.dialog.next_method(),
            (_, KeyCode::BackTab) => self.dialog.focus_prev(),
            (_, KeyCode::Tab) => self.dialog.focus_next(),
            (_, KeyCode::Up) if on_key_list => {
                let keys = self.keys();
                self.dialog.select_prev_key(&keys);
            }
            (_, KeyCode::Down) if on_key_list => {
                let keys = self.keys();
                self.dialog.select_next_key(&keys);
            }
            (_, KeyCode::Up) => self.dialog.focus_prev(),
            (_, KeyCode::Down) => self.dialog.focus_next(),
            (_, KeyCode::Enter) => self.submit(),
            (_, KeyCode::Backspace) => self.dialog.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.dialog.insert_char(c);
            }
            _ => {}
        }
    }
}

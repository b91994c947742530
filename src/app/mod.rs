//! Main application state and event handling.
//!
//! Hosts one device panel with its terminal dialog, routes key and mouse
//! input to the dialog, and owns the visibility store the dialog reads.

mod input;
mod input_mouse;
mod render;

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::config::Config;
use crate::credentials::{Credential, CredentialStore};
use crate::session::{SessionOpener, SessionVisibility};
use crate::ui::{ElementMap, TerminalDialog};

/// Event poll timeout in milliseconds.
const POLL_TIMEOUT_MS: u64 = 50;

/// Application state.
pub struct App {
    /// Application configuration.
    config: Config,
    /// Saved keys offered on the PublicKey tab.
    credentials: Box<dyn CredentialStore>,
    /// Which target's dialog is open.
    visibility: Box<dyn SessionVisibility>,
    /// Receives submitted connection requests.
    opener: Box<dyn SessionOpener>,
    /// Dialog for the current device.
    dialog: TerminalDialog,
    /// Interactive elements drawn in the last frame.
    element_map: RefCell<ElementMap>,
    /// Whether the app is running.
    running: bool,
    /// Status message.
    status: String,
}

impl App {
    /// Creates a new application for `target`.
    ///
    /// An empty target means no device is selected.
    #[must_use]
    pub fn new(
        config: Config,
        target: impl Into<String>,
        credentials: Box<dyn CredentialStore>,
        visibility: Box<dyn SessionVisibility>,
        opener: Box<dyn SessionOpener>,
    ) -> Self {
        let dialog = TerminalDialog::new(target, config.enable_connect_button);

        let mut app = Self {
            config,
            credentials,
            visibility,
            opener,
            dialog,
            element_map: RefCell::new(ElementMap::new()),
            running: true,
            status: String::new(),
        };
        app.sync_visibility();
        app
    }

    /// Returns true if the app is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the app.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the dialog state.
    #[must_use]
    pub fn dialog(&self) -> &TerminalDialog {
        &self.dialog
    }

    /// Returns the status message.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Sets the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Returns a copy of the elements drawn in the last frame.
    #[must_use]
    pub fn element_map(&self) -> ElementMap {
        self.element_map.borrow().clone()
    }

    /// Returns the `show` flag for the current device.
    #[must_use]
    pub fn show(&self) -> bool {
        self.visibility.is_open_for(self.dialog.target())
    }

    /// Returns true if the dialog is on screen.
    #[must_use]
    pub fn is_dialog_visible(&self) -> bool {
        self.dialog.is_visible(self.show())
    }

    /// Lists the saved keys.
    fn keys(&self) -> Vec<Credential> {
        self.credentials.list_credentials()
    }

    /// Feeds the current `show` flag to the dialog.
    fn sync_visibility(&mut self) {
        let show = self.show();
        self.dialog.on_show_transition(show);
    }

    /// Opens the dialog for the current device.
    pub fn open_dialog(&mut self) {
        if self.dialog.target().is_empty() {
            self.set_status("No device selected");
            return;
        }

        let target = self.dialog.target().to_string();
        if !self.visibility.is_open_for(&target) {
            self.visibility.toggle(&target);
        }
        self.sync_visibility();
    }

    /// Closes the dialog. Typed values survive until it is reopened.
    pub fn close_dialog(&mut self) {
        let target = self.dialog.target().to_string();
        if self.visibility.is_open_for(&target) {
            self.visibility.toggle(&target);
        }
        self.sync_visibility();
    }

    /// Submits the dialog and closes it on success.
    pub fn submit(&mut self) {
        let show = self.show();
        let keys = self.keys();

        match self
            .dialog
            .submit_connect(show, &keys, self.opener.as_mut())
        {
            Ok(request) => {
                self.set_status(format!("Session queued for {}", request.login()));
                self.close_dialog();
            }
            Err(err) => {
                tracing::debug!("Submit rejected: {}", err);
            }
        }
    }

    /// Processes pending input events.
    ///
    /// # Errors
    /// Returns error if event polling fails.
    pub fn update(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::CredentialList;
    use crate::session::{AuthPayload, PendingSessions, VisibilityRegistry};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use crate::session::AuthMethod;
    use crate::ui::ElementId;
    use crate::ui::terminal_dialog::DialogField;

    const UID: &str = "a582b47a";

    fn keys() -> CredentialList {
        [
            Credential::new("shellhub", "BBGVvbmF"),
            Credential::new("shellhub", "AbGVvbmF"),
        ]
        .into_iter()
        .collect()
    }

    fn app_with(target: &str, connect_button: bool) -> (App, PendingSessions) {
        let pending = PendingSessions::new();
        let config = Config {
            enable_connect_button: connect_button,
            ..Config::default()
        };
        let app = App::new(
            config,
            target,
            Box::new(keys()),
            Box::new(VisibilityRegistry::new()),
            Box::new(pending.clone()),
        );
        (app, pending)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn draw(app: &App) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn click(app: &mut App, id: ElementId) {
        let area = app.element_map().area(id).unwrap();
        click_at(app, area.x, area.y);
    }

    fn click_at(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_starts_closed() {
        let (app, _) = app_with(UID, true);
        assert!(app.is_running());
        assert!(!app.show());
        assert!(!app.is_dialog_visible());
    }

    #[test]
    fn test_enter_opens_and_escape_closes() {
        let (mut app, _) = app_with(UID, true);
        press(&mut app, KeyCode::Enter);
        assert!(app.is_dialog_visible());

        press(&mut app, KeyCode::Esc);
        assert!(!app.is_dialog_visible());
        assert!(app.is_running());
    }

    #[test]
    fn test_empty_target_never_opens() {
        let (mut app, _) = app_with("", true);
        app.open_dialog();
        assert!(!app.is_dialog_visible());
        assert_eq!(app.status(), "No device selected");
    }

    #[test]
    fn test_keyboard_password_submit() {
        let (mut app, pending) = app_with(UID, true);
        app.open_dialog();
        type_text(&mut app, "root");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);

        let request = pending.last().unwrap();
        assert_eq!(request.login(), "root@a582b47a");
        assert_eq!(
            request.auth,
            AuthPayload::Password {
                password: "secret".to_string()
            }
        );
        assert!(!app.is_dialog_visible());
        assert_eq!(app.status(), "Session queued for root@a582b47a");
    }

    #[test]
    fn test_invalid_submit_keeps_dialog_open() {
        let (mut app, pending) = app_with(UID, true);
        app.open_dialog();
        press(&mut app, KeyCode::Enter);

        assert!(pending.is_empty());
        assert!(app.is_dialog_visible());
        assert!(!app.dialog().is_form_valid());
    }

    #[test]
    fn test_close_keeps_values_and_reopen_resets() {
        let (mut app, _) = app_with(UID, true);
        app.open_dialog();
        type_text(&mut app, "root");

        app.close_dialog();
        assert_eq!(app.dialog().username(), "root");

        app.open_dialog();
        assert_eq!(app.dialog().username(), "");
    }

    #[test]
    fn test_ctrl_t_switches_method_and_arrows_select_key() {
        let (mut app, pending) = app_with(UID, true);
        app.open_dialog();
        type_text(&mut app, "root");
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.dialog().active_method(), AuthMethod::PublicKey);
        assert_eq!(app.dialog().focused_field(), DialogField::Username);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.dialog().selected_key(), Some(1));

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            pending.last().unwrap().auth,
            AuthPayload::PublicKey {
                name: "shellhub".to_string(),
                data: "AbGVvbmF".to_string()
            }
        );
    }

    #[test]
    fn test_q_quits_only_when_closed() {
        let (mut app, _) = app_with(UID, true);
        app.open_dialog();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_running());
        assert_eq!(app.dialog().username(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_click_connect_button_opens_dialog() {
        let (mut app, _) = app_with(UID, true);
        draw(&app);
        click(&mut app, ElementId::ConnectButton);
        assert!(app.is_dialog_visible());

        draw(&app);
        assert!(app.element_map().contains(ElementId::TerminalDialog));
    }

    #[test]
    fn test_click_console_item_opens_dialog() {
        let (mut app, _) = app_with(UID, false);
        draw(&app);
        assert!(!app.element_map().contains(ElementId::ConnectButton));

        click(&mut app, ElementId::ConsoleItem);
        assert!(app.is_dialog_visible());
    }

    #[test]
    fn test_click_flow_public_key() {
        let (mut app, pending) = app_with(UID, false);
        app.open_dialog();
        type_text(&mut app, "root");
        draw(&app);

        click(&mut app, ElementId::Tab(AuthMethod::PublicKey));
        assert_eq!(app.dialog().active_method(), AuthMethod::PublicKey);

        draw(&app);
        let list = app.element_map().area(ElementId::PrivateKeysSelect).unwrap();
        click_at(&mut app, list.x, list.y + 1);
        assert_eq!(app.dialog().selected_key(), Some(1));
        assert_eq!(app.dialog().focused_field(), DialogField::PrivateKey);

        draw(&app);
        click(&mut app, ElementId::Connect2Button);
        assert_eq!(pending.len(), 1);
        assert!(!app.is_dialog_visible());
    }

    #[test]
    fn test_dialog_is_modal_for_clicks() {
        let (mut app, pending) = app_with(UID, true);
        draw(&app);
        let trigger = app.element_map().area(ElementId::ConnectButton).unwrap();

        app.open_dialog();
        draw(&app);
        click_at(&mut app, 0, 23);
        click_at(&mut app, trigger.x, trigger.y);

        assert!(app.is_dialog_visible());
        assert!(pending.is_empty());
    }
}

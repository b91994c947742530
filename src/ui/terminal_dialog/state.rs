//! Terminal dialog state machine.
//!
//! The dialog reconciles three inputs:
//! - the externally owned `show` flag and the device target,
//! - the form fields typed by the operator,
//! - the saved keys listed by the credential store.
//!
//! Visibility is derived, never stored: `show && !target.is_empty()`.
//! Opening the dialog resets the form; closing it leaves the typed values
//! alone.

use crate::credentials::Credential;
use crate::session::{AuthMethod, AuthPayload, ConnectionRequest, SessionOpener};

use super::types::{DialogError, DialogField, FormValidity};

/// State of one terminal dialog instance.
#[derive(Debug, Clone)]
pub struct TerminalDialog {
    /// Device the dialog connects to. Empty means no device.
    target: String,
    /// Whether the full connect button is the trigger (icon + menu item otherwise).
    enable_connect_button: bool,
    /// Username, shared by both tabs.
    username: String,
    /// Password input.
    password: String,
    /// Index of the chosen key in the credential listing.
    selected_key: Option<usize>,
    /// Active tab.
    active_method: AuthMethod,
    /// Field with focus.
    focused_field: DialogField,
    /// Form validation state.
    validity: FormValidity,
    /// Visibility seen at the last transition.
    was_visible: bool,
    /// Rejection shown inline.
    error: Option<DialogError>,
}

impl TerminalDialog {
    /// Creates a hidden dialog for `target`.
    #[must_use]
    pub fn new(target: impl Into<String>, enable_connect_button: bool) -> Self {
        Self {
            target: target.into(),
            enable_connect_button,
            username: String::new(),
            password: String::new(),
            selected_key: None,
            active_method: AuthMethod::Password,
            focused_field: DialogField::Username,
            validity: FormValidity::Unvalidated,
            was_visible: false,
            error: None,
        }
    }

    /// Returns the device target.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns true if the full connect button is the trigger.
    #[must_use]
    pub fn enable_connect_button(&self) -> bool {
        self.enable_connect_button
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the index of the chosen key.
    #[must_use]
    pub fn selected_key(&self) -> Option<usize> {
        self.selected_key
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_method(&self) -> AuthMethod {
        self.active_method
    }

    /// Returns the focused field.
    #[must_use]
    pub fn focused_field(&self) -> DialogField {
        self.focused_field
    }

    /// Returns the validation state.
    #[must_use]
    pub fn validity(&self) -> &FormValidity {
        &self.validity
    }

    /// Returns true unless validation has found missing fields.
    ///
    /// An untouched form is unvalidated and reports true.
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Returns the inline rejection message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&DialogError> {
        self.error.as_ref()
    }

    /// Returns true if the dialog is shown for the given `show` flag.
    #[must_use]
    pub fn is_visible(&self, show: bool) -> bool {
        show && !self.target.is_empty()
    }

    /// Reacts to the `show` flag, including repeats of the same value.
    ///
    /// Hidden to visible resets the form. Any other transition keeps it.
    pub fn on_show_transition(&mut self, show: bool) {
        let visible = self.is_visible(show);

        if visible && !self.was_visible {
            tracing::debug!(device = %self.target, "Terminal dialog opened");
            self.reset();
        } else if !visible && self.was_visible {
            tracing::debug!(device = %self.target, "Terminal dialog closed");
        }

        self.was_visible = visible;
    }

    /// Restores the form defaults.
    fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.selected_key = None;
        self.active_method = AuthMethod::Password;
        self.focused_field = DialogField::Username;
        self.validity = FormValidity::Unvalidated;
        self.error = None;
    }

    /// Switches the active tab. Fields of the other tab are kept.
    pub fn select_method(&mut self, method: AuthMethod) {
        if self.active_method == method {
            return;
        }

        self.active_method = method;
        self.focused_field = self.focused_field.for_method(method);
        self.error = None;
        self.revalidate();
    }

    /// Switches to the next tab.
    pub fn next_method(&mut self) {
        self.select_method(self.active_method.next());
    }

    /// Moves focus to the next field.
    pub fn focus_next(&mut self) {
        self.focused_field = self.focused_field.next(self.active_method);
    }

    /// Moves focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focused_field = self.focused_field.prev(self.active_method);
    }

    /// Focuses `field` if it belongs to the active tab.
    pub fn focus(&mut self, field: DialogField) {
        self.focused_field = field.for_method(self.active_method);
    }

    /// Types a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        input.push(c);
        self.touch();
    }

    /// Deletes the last character of the focused text field.
    pub fn backspace(&mut self) {
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        if input.pop().is_some() {
            self.touch();
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focused_field {
            DialogField::Username => Some(&mut self.username),
            DialogField::Password => Some(&mut self.password),
            DialogField::PrivateKey | DialogField::Connect => None,
        }
    }

    /// Chooses the key at `index` of `credentials`.
    pub fn select_key(&mut self, index: usize, credentials: &[Credential]) {
        if index >= credentials.len() {
            return;
        }
        self.selected_key = Some(index);
        self.touch();
    }

    /// Chooses the next key, wrapping around.
    pub fn select_next_key(&mut self, credentials: &[Credential]) {
        if credentials.is_empty() {
            return;
        }
        let next = match self.selected_key {
            Some(i) if i + 1 < credentials.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.select_key(next, credentials);
    }

    /// Chooses the previous key, wrapping around.
    pub fn select_prev_key(&mut self, credentials: &[Credential]) {
        if credentials.is_empty() {
            return;
        }
        let last = credentials.len() - 1;
        let prev = match self.selected_key {
            Some(i) if i > 0 && i <= last => i - 1,
            _ => last,
        };
        self.select_key(prev, credentials);
    }

    /// Marks the form as interacted with and re-checks it.
    fn touch(&mut self) {
        self.error = None;
        self.validity = self.evaluate();
    }

    /// Re-checks the form if validation has started.
    fn revalidate(&mut self) {
        if self.validity.is_engaged() {
            self.validity = self.evaluate();
        }
    }

    /// Computes validity of the active method from the form alone.
    #[must_use]
    pub fn evaluate(&self) -> FormValidity {
        let mut missing = Vec::with_capacity(2);

        if self.username.is_empty() {
            missing.push(DialogField::Username);
        }

        match self.active_method {
            AuthMethod::Password => {
                if self.password.is_empty() {
                    missing.push(DialogField::Password);
                }
            }
            AuthMethod::PublicKey => {
                if self.selected_key.is_none() {
                    missing.push(DialogField::PrivateKey);
                }
            }
        }

        if missing.is_empty() {
            FormValidity::Valid
        } else {
            FormValidity::Invalid(missing)
        }
    }

    /// Submits the form to `opener`.
    ///
    /// Rejections are kept for inline display and returned; the opener is
    /// only called for a complete form on a visible dialog. The visibility
    /// store is left to the caller.
    pub fn submit_connect(
        &mut self,
        show: bool,
        credentials: &[Credential],
        opener: &mut dyn SessionOpener,
    ) -> Result<ConnectionRequest, DialogError> {
        match self.build_request(show, credentials) {
            Ok(request) => {
                self.error = None;
                tracing::info!("Connecting to {}", request);
                opener.open(&request);
                Ok(request)
            }
            Err(err) => {
                tracing::debug!(device = %self.target, "Connect rejected: {}", err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn build_request(
        &mut self,
        show: bool,
        credentials: &[Credential],
    ) -> Result<ConnectionRequest, DialogError> {
        if self.target.is_empty() {
            return Err(DialogError::EmptyTarget);
        }
        if !self.is_visible(show) {
            return Err(DialogError::Closed);
        }

        self.validity = self.evaluate();
        if let FormValidity::Invalid(missing) = &self.validity {
            return Err(DialogError::Validation {
                method: self.active_method,
                missing: missing.clone(),
            });
        }

        let auth = match self.active_method {
            AuthMethod::Password => AuthPayload::Password {
                password: self.password.clone(),
            },
            AuthMethod::PublicKey => {
                // The listing may have shrunk since the key was chosen
                let Some(key) = self.selected_key.and_then(|i| credentials.get(i)) else {
                    self.selected_key = None;
                    self.validity = self.evaluate();
                    return Err(DialogError::Validation {
                        method: AuthMethod::PublicKey,
                        missing: vec![DialogField::PrivateKey],
                    });
                };
                AuthPayload::PublicKey {
                    name: key.name.clone(),
                    data: key.data.clone(),
                }
            }
        };

        Ok(ConnectionRequest::new(
            self.target.clone(),
            self.username.clone(),
            auth,
        ))
    }
}

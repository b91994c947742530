//! Terminal dialog types and enums.

use thiserror::Error;

use crate::session::AuthMethod;

/// Field holding focus inside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogField {
    #[default]
    Username,
    /// Password input (Password tab).
    Password,
    /// Key selector (PublicKey tab).
    PrivateKey,
    /// Submit button of the active tab.
    Connect,
}

impl DialogField {
    /// Returns the secret field used by `method`.
    #[must_use]
    pub fn secret_for(method: AuthMethod) -> Self {
        match method {
            AuthMethod::Password => Self::Password,
            AuthMethod::PublicKey => Self::PrivateKey,
        }
    }

    /// Moves to the next field of `method`'s tab.
    #[must_use]
    pub fn next(self, method: AuthMethod) -> Self {
        match self {
            Self::Username => Self::secret_for(method),
            Self::Password | Self::PrivateKey => Self::Connect,
            Self::Connect => Self::Username,
        }
    }

    /// Moves to the previous field of `method`'s tab.
    #[must_use]
    pub fn prev(self, method: AuthMethod) -> Self {
        match self {
            Self::Username => Self::Connect,
            Self::Password | Self::PrivateKey => Self::Username,
            Self::Connect => Self::secret_for(method),
        }
    }

    /// Returns the same slot on `method`'s tab.
    #[must_use]
    pub fn for_method(self, method: AuthMethod) -> Self {
        match self {
            Self::Password | Self::PrivateKey => Self::secret_for(method),
            other => other,
        }
    }

    /// Returns the inline message for a missing value.
    #[must_use]
    pub fn required_message(self) -> &'static str {
        match self {
            Self::Username => "Username is required",
            Self::Password => "Password is required",
            Self::PrivateKey => "Select a private key",
            Self::Connect => "Required",
        }
    }
}

/// Validation state of the form.
///
/// Validation stays [`FormValidity::Unvalidated`] until the first edit, key
/// selection or submit attempt. An unvalidated form reports itself as valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormValidity {
    #[default]
    Unvalidated,
    Valid,
    /// Required fields that are empty, in field order.
    Invalid(Vec<DialogField>),
}

impl FormValidity {
    /// Returns true unless a checked form found missing fields.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// Returns true once validation has run.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        !matches!(self, Self::Unvalidated)
    }

    /// Returns true if `field` is reported missing.
    #[must_use]
    pub fn is_missing(&self, field: DialogField) -> bool {
        match self {
            Self::Invalid(missing) => missing.contains(&field),
            _ => false,
        }
    }
}

/// Reasons a submission is rejected.
///
/// These never escape as panics: the dialog disables its submit button and
/// shows the message inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// Required fields of the active method are empty.
    #[error("{}", .missing.first().map_or("Required", |f| f.required_message()))]
    Validation {
        method: AuthMethod,
        missing: Vec<DialogField>,
    },

    /// No device is selected.
    #[error("No device selected")]
    EmptyTarget,

    /// The dialog is not open.
    #[error("Terminal dialog is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_password_tab() {
        let method = AuthMethod::Password;
        let mut field = DialogField::Username;
        field = field.next(method);
        assert_eq!(field, DialogField::Password);
        field = field.next(method);
        assert_eq!(field, DialogField::Connect);
        field = field.next(method);
        assert_eq!(field, DialogField::Username);
        assert_eq!(field.prev(method), DialogField::Connect);
    }

    #[test]
    fn test_field_cycle_key_tab() {
        let method = AuthMethod::PublicKey;
        assert_eq!(DialogField::Username.next(method), DialogField::PrivateKey);
        assert_eq!(DialogField::Connect.prev(method), DialogField::PrivateKey);
    }

    #[test]
    fn test_field_maps_across_tabs() {
        assert_eq!(
            DialogField::Password.for_method(AuthMethod::PublicKey),
            DialogField::PrivateKey
        );
        assert_eq!(
            DialogField::PrivateKey.for_method(AuthMethod::Password),
            DialogField::Password
        );
        assert_eq!(
            DialogField::Username.for_method(AuthMethod::PublicKey),
            DialogField::Username
        );
    }

    #[test]
    fn test_unvalidated_counts_as_valid() {
        assert!(FormValidity::Unvalidated.is_valid());
        assert!(!FormValidity::Unvalidated.is_engaged());
        assert!(!FormValidity::Invalid(vec![DialogField::Username]).is_valid());
    }

    #[test]
    fn test_validation_error_message() {
        let err = DialogError::Validation {
            method: AuthMethod::PublicKey,
            missing: vec![DialogField::PrivateKey],
        };
        assert_eq!(err.to_string(), "Select a private key");
    }
}

//! Connection request emitted by the terminal dialog.
//!
//! A request carries everything the session opener needs to start an
//! interactive session on a device: the target, the chosen method, the
//! username and the secret or key material for that method.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authentication method offered by the terminal dialog.
///
/// The dialog shows one tab per method, always in the order of [`AuthMethod::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMethod {
    /// Username and password.
    #[default]
    Password,
    /// Username and a saved private key.
    PublicKey,
}

impl AuthMethod {
    /// All methods in tab order.
    pub const ALL: [AuthMethod; 2] = [AuthMethod::Password, AuthMethod::PublicKey];

    /// Returns the stable name of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "Password",
            Self::PublicKey => "PublicKey",
        }
    }

    /// Returns the tab label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Password => "Password",
            Self::PublicKey => "Public Key",
        }
    }

    /// Returns the position of the method's tab.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Password => 0,
            Self::PublicKey => 1,
        }
    }

    /// Returns the method of the following tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Password => Self::PublicKey,
            Self::PublicKey => Self::Password,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secret part of a connection request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthPayload {
    /// Password typed into the dialog. Never serialized.
    Password {
        #[serde(skip_serializing, default)]
        password: String,
    },
    /// Saved key pair chosen in the dialog.
    PublicKey {
        /// Name of the saved key.
        name: String,
        /// Key material. Never serialized.
        #[serde(skip_serializing, default)]
        data: String,
    },
}

impl AuthPayload {
    /// Returns the method this payload authenticates with.
    #[must_use]
    pub fn method(&self) -> AuthMethod {
        match self {
            Self::Password { .. } => AuthMethod::Password,
            Self::PublicKey { .. } => AuthMethod::PublicKey,
        }
    }
}

impl fmt::Debug for AuthPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { .. } => f.debug_struct("Password").finish_non_exhaustive(),
            Self::PublicKey { name, .. } => f
                .debug_struct("PublicKey")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// Request to open an interactive terminal session on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Device identifier.
    pub target: String,
    /// Login name on the device.
    pub username: String,
    /// Credentials for the chosen method.
    pub auth: AuthPayload,
}

impl ConnectionRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(target: String, username: String, auth: AuthPayload) -> Self {
        Self {
            target,
            username,
            auth,
        }
    }

    /// Returns the method used by this request.
    #[must_use]
    pub fn method(&self) -> AuthMethod {
        self.auth.method()
    }

    /// Returns the `user@target` login string.
    #[must_use]
    pub fn login(&self) -> String {
        format!("{}@{}", self.username, self.target)
    }
}

impl fmt::Display for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.auth {
            AuthPayload::Password { .. } => write!(f, "{} (password)", self.login()),
            AuthPayload::PublicKey { name, .. } => write!(f, "{} (key '{}')", self.login(), name),
        }
    }
}

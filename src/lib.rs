//! hubterm
//!
//! A TUI for opening a terminal session on a remote device, through a
//! connection dialog that collects a username and either a password or a
//! saved private key.
//!
//! # Architecture
//!
//! - **UI Module**: Terminal dialog state machine and its ratatui widgets
//! - **Session Module**: Connection requests, the opener seam and the
//!   visibility registry
//! - **Credentials Module**: Saved keys and their TOML storage
//! - **App Module**: Event loop routing keys and clicks to the dialog
//!
//! # Usage
//!
//! ```no_run
//! use hubterm::app::App;
//! use hubterm::config::Config;
//! use hubterm::credentials::CredentialList;
//! use hubterm::session::{PendingSessions, VisibilityRegistry};
//!
//! let pending = PendingSessions::new();
//! let mut app = App::new(
//!     Config::default(),
//!     "a582b47a",
//!     Box::new(CredentialList::new()),
//!     Box::new(VisibilityRegistry::new()),
//!     Box::new(pending.clone()),
//! );
//! app.open_dialog();
//! // Run event loop...
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::unnested_or_patterns)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]

pub mod app;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod session;
pub mod ui;

// Re-export main types
pub use app::App;
pub use config::Config;
pub use credentials::{Credential, CredentialStore};
pub use session::{ConnectionRequest, SessionOpener, SessionVisibility};
pub use ui::{TerminalDialog, TerminalDialogWidget};

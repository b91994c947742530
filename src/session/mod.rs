//! Session hand-off module.
//!
//! Provides:
//! - The connection request emitted by the terminal dialog
//! - The session opener seam receiving those requests
//! - The visibility registry deciding which target's dialog is open

pub mod opener;
pub mod request;
pub mod visibility;

pub use opener::{PendingSessions, SessionOpener};
pub use request::{AuthMethod, AuthPayload, ConnectionRequest};
pub use visibility::{SessionVisibility, VisibilityRegistry};

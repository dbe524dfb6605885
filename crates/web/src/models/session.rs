//! Session-related types.
//!
//! Types stored in the session for authentication state. The session cookie
//! is the locally persisted identity cache: it is written on sign-in, read on
//! every request, and removed on sign-out.

use serde::{Deserialize, Serialize};

use gripen_core::UserId;

/// Session storage keys.
pub mod session_keys {
    /// Key under which the signed-in user is stored.
    pub const CURRENT_USER: &str = "current_user";
}

/// The signed-in user, as held in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Unique user ID.
    pub id: UserId,
    /// Email address at sign-in time.
    pub email: String,
    /// Display name, if the user has set one.
    pub display_name: Option<String>,
}

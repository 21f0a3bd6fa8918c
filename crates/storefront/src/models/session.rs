//! Session-related types.
//!
//! Keys for the data this service keeps in the session. The session itself
//! is the only server-side state the storefront holds.

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the logged-in Discord user.
    pub const USER: &str = "user";

    /// Key for Discord OAuth state (CSRF protection).
    pub const OAUTH_STATE: &str = "oauth_state";
}

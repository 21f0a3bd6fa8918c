//! Discord user identity and the viewer variant.
//!
//! The storefront never authenticates users itself; it reads the Discord
//! identity the OAuth callback placed in the session. Handlers and templates
//! consume the identity through [`Viewer`], so the anonymous case is an
//! explicit variant rather than a null check.

use serde::{Deserialize, Serialize};

use shardkeep_core::UserId;

/// Number of default avatar variants Discord serves.
const DEFAULT_AVATAR_VARIANTS: u64 = 5;

/// A Discord user as returned by `/users/@me` and stored in the session.
///
/// Read-only here; created and destroyed by the OAuth flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    /// Snowflake user id.
    pub id: UserId,
    /// Account name.
    pub username: String,
    /// Legacy four-digit tag, displayed as `username#discriminator`.
    pub discriminator: String,
    /// Email address (requires the `email` OAuth scope).
    pub email: String,
    /// Avatar hash; `None` when the user has no custom avatar.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DiscordUser {
    /// URL of the user's avatar image on the Discord CDN.
    ///
    /// Animated avatars (hash prefixed `a_`) resolve to a `.gif`, all other
    /// custom avatars to a `.png`. Users without a custom avatar get one of
    /// Discord's five default avatars, picked by `id mod 5`.
    #[must_use]
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => {
                let ext = if hash.starts_with("a_") { "gif" } else { "png" };
                format!(
                    "https://cdn.discordapp.com/avatars/{}/{hash}.{ext}",
                    self.id
                )
            }
            None => {
                let variant = self.id.value() % DEFAULT_AVATAR_VARIANTS;
                format!("https://cdn.discordapp.com/embed/avatars/{variant}.png")
            }
        }
    }

    /// The `username#discriminator` handle shown next to the avatar.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

/// The identity viewing the page.
///
/// Either nobody is logged in, or exactly one Discord user is. Consumers
/// match exhaustively; there is no way to dereference an absent user.
#[derive(Debug, Clone)]
pub enum Viewer {
    /// No user in the session.
    Anonymous,
    /// A logged-in Discord user.
    Authenticated(DiscordUser),
}

impl Viewer {
    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&DiscordUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

impl From<Option<DiscordUser>> for Viewer {
    fn from(user: Option<DiscordUser>) -> Self {
        user.map_or(Self::Anonymous, Self::Authenticated)
    }
}

//! User and profile domain types.
//!
//! A [`User`] is the authenticated identity; a [`Profile`] holds the
//! onboarding-collected data (home address). They are one-to-one, but the
//! profile is created later, at the end of onboarding.

use chrono::{DateTime, Utc};

use gripen_core::{Email, UserId};

/// An authenticated account (domain type).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Optional display name shown in the header.
    pub display_name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Onboarding-collected profile data, one-to-one with a [`User`].
///
/// Its presence drives the access guard: users without a profile are sent
/// to the onboarding page before they can reach the dashboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    /// Owning user ID.
    pub user_id: UserId,
    /// Physical address of the household.
    pub address: String,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update, validated before it reaches the database.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New address, if changing.
    pub address: Option<String>,
    /// New display name, if changing.
    pub display_name: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries any change at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.display_name.is_none()
    }
}

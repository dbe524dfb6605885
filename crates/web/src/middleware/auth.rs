//! Authentication extractors.
//!
//! Route handlers declare what they need: [`RequireAuth`] for a signed-in
//! user, [`RequireProfile`] for a signed-in user who finished onboarding,
//! [`RequireOnboarding`] for the onboarding page itself. Each extractor runs
//! the access guard and turns its decision into a redirect when the request
//! may not render.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::guard::{self, GuardPage};
use crate::models::{CurrentUser, Profile, session_keys};
use crate::state::AppState;

/// Rejection for guarded pages: a guard redirect or an internal failure
/// while resolving the profile signal.
pub enum GuardRejection {
    /// Follow the guard's redirect.
    Redirect(&'static str),
    /// Profile lookup failed.
    Internal,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(target) => Redirect::to(target).into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Read the current user out of the request's session, if signed in.
async fn current_user(parts: &mut Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Apply the guard for a page and extract the signed-in user.
async fn guarded_user(
    parts: &mut Parts,
    state: &AppState,
    page: GuardPage,
) -> Result<(CurrentUser, Option<Profile>), GuardRejection> {
    let user = current_user(parts).await;

    let profile = match &user {
        Some(u) => state
            .profile(u.id)
            .await
            .map_err(|_| GuardRejection::Internal)?,
        None => None,
    };

    let decision = guard::evaluate(user.is_some(), profile.is_some(), page);
    if let Some(target) = decision.redirect_target() {
        return Err(GuardRejection::Redirect(target));
    }

    // The guard only allows when a user is present.
    user.map(|u| (u, profile)).ok_or(GuardRejection::Internal)
}

/// Extractor requiring a signed-in user, without a profile requirement.
///
/// Used by sign-out, which must work for half-onboarded accounts too.
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_user(parts)
            .await
            .map(Self)
            .ok_or(GuardRejection::Redirect("/"))
    }
}

/// Extractor for guarded pages other than onboarding: a signed-in user with
/// a completed profile.
pub struct RequireProfile {
    pub user: CurrentUser,
    pub profile: Profile,
}

impl FromRequestParts<AppState> for RequireProfile {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, profile) = guarded_user(parts, state, GuardPage::Other).await?;
        let profile = profile.ok_or(GuardRejection::Internal)?;
        Ok(Self { user, profile })
    }
}

/// Extractor for the onboarding page: a signed-in user who has not yet
/// completed a profile.
pub struct RequireOnboarding(pub CurrentUser);

impl FromRequestParts<AppState> for RequireOnboarding {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, _) = guarded_user(parts, state, GuardPage::Onboarding).await?;
        Ok(Self(user))
    }
}

/// Helper to set the current user in the session after sign-in.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the session on sign-out.
///
/// Destroys the server-side session record and removes the cookie, so both
/// the held identity and the locally persisted copy are gone.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

//! Authentication route handlers.
//!
//! The entry page doubles as the login form. Auth failures render inline on
//! the form; nothing here is fatal and the user may simply retry.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, guard, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Entry/login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub email: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the entry/login page.
///
/// Already signed-in visitors are forwarded the same way the guard would
/// send them: to onboarding without a profile, to the dashboard with one.
pub async fn entry(State(state): State<AppState>, session: Session) -> Response {
    let current: Option<CurrentUser> = session
        .get(crate::models::session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    if let Some(user) = current {
        let has_profile = state.profile(user.id).await.is_ok_and(|p| p.is_some());
        let target = if has_profile { "/dashboard" } else { "/startup" };
        return Redirect::to(target).into_response();
    }

    LoginTemplate {
        error: None,
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());

    match service.login_with_password(&form.email, &form.password).await {
        Ok(user) => sign_in(&state, &session, &user).await,
        Err(err) => {
            tracing::info!(email = %form.email, error = %err, "login failed");
            LoginTemplate {
                error: Some(err.user_message()),
                email: form.email,
            }
            .into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        email: String::new(),
    }
}

/// Handle registration form submission.
///
/// A successful registration signs the user in and sends them straight to
/// onboarding (they cannot have a profile yet).
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return RegisterTemplate {
            error: Some("Passwords do not match.".to_owned()),
            email: form.email,
        }
        .into_response();
    }

    let service = AuthService::new(state.pool());

    match service
        .register_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => sign_in(&state, &session, &user).await,
        Err(err) => {
            tracing::info!(email = %form.email, error = %err, "registration failed");
            RegisterTemplate {
                error: Some(err.user_message()),
                email: form.email,
            }
            .into_response()
        }
    }
}

/// Handle sign-out.
///
/// Clears the held identity, the server-side session record, the session
/// cookie, and the cached profile.
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Response {
    if let Err(err) = clear_current_user(&session).await {
        tracing::warn!(error = %err, "failed to clear session on sign-out");
    }
    state.forget_profile(user.id).await;
    clear_sentry_user();

    Redirect::to("/").into_response()
}

/// Store the signed-in user and forward per the guard's rules.
async fn sign_in(state: &AppState, session: &Session, user: &User) -> Response {
    let current = CurrentUser {
        id: user.id,
        email: user.email.to_string(),
        display_name: user.display_name.clone(),
    };

    if let Err(err) = set_current_user(session, &current).await {
        tracing::error!(error = %err, "failed to persist session");
        return LoginTemplate {
            error: Some("Something went wrong. Please try again.".to_owned()),
            email: current.email,
        }
        .into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));

    let has_profile = state.profile(user.id).await.is_ok_and(|p| p.is_some());
    let decision = guard::evaluate(true, has_profile, guard::GuardPage::Onboarding);
    let target = decision.redirect_target().unwrap_or("/startup");
    Redirect::to(target).into_response()
}

//! Onboarding ("startup") route handlers.
//!
//! Collects the household address and the initial set of rooms, then creates
//! the profile. Once the profile exists the guard routes this page to the
//! dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::db::profiles::ProfileRepository;
use crate::db::rooms::RoomRepository;
use crate::db::users::UserRepository;
use crate::error::Result;
use crate::middleware::RequireOnboarding;
use crate::state::AppState;

/// Onboarding form data.
#[derive(Debug, Deserialize)]
pub struct StartupForm {
    pub display_name: String,
    pub address: String,
    /// One room name per line.
    pub rooms: String,
}

/// Onboarding page template.
#[derive(Template, WebTemplate)]
#[template(path = "startup.html")]
pub struct StartupTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Display the onboarding page.
pub async fn page(RequireOnboarding(user): RequireOnboarding) -> impl IntoResponse {
    StartupTemplate {
        email: user.email,
        error: None,
    }
}

/// Complete onboarding: create the profile and the initial rooms.
pub async fn complete(
    State(state): State<AppState>,
    RequireOnboarding(user): RequireOnboarding,
    Form(form): Form<StartupForm>,
) -> Result<Response> {
    let address = form.address.trim();
    let room_names = parse_room_names(&form.rooms);

    if let Some(message) = validate(address, &room_names) {
        return Ok(StartupTemplate {
            email: user.email,
            error: Some(message.to_owned()),
        }
        .into_response());
    }

    let profiles = ProfileRepository::new(state.pool());
    profiles.create(user.id, address).await?;

    let display_name = form.display_name.trim();
    if !display_name.is_empty() {
        UserRepository::new(state.pool())
            .set_display_name(user.id, display_name)
            .await?;
    }

    let rooms = RoomRepository::new(state.pool());
    for name in &room_names {
        rooms.create(user.id, name, None).await?;
    }

    // Overwrite the cached "no profile yet" entry so the guard lets the
    // redirect through.
    state.refresh_profile(user.id).await?;

    tracing::info!(user_id = %user.id, rooms = room_names.len(), "onboarding completed");

    Ok(Redirect::to("/dashboard").into_response())
}

/// Split the textarea into trimmed, non-empty room names.
fn parse_room_names(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Form validation, rejected before any database work.
fn validate(address: &str, room_names: &[String]) -> Option<&'static str> {
    if address.is_empty() {
        return Some("Please enter your address.");
    }
    if room_names.is_empty() {
        return Some("Please add at least one room.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_names_skips_blank_lines() {
        let names = parse_room_names("Living Room\n\n  Attic  \n");
        assert_eq!(names, vec!["Living Room".to_owned(), "Attic".to_owned()]);
    }

    #[test]
    fn test_validate_requires_address_and_rooms() {
        assert!(validate("", &["Attic".to_owned()]).is_some());
        assert!(validate("Storgatan 1", &[]).is_some());
        assert!(validate("Storgatan 1", &["Attic".to_owned()]).is_none());
    }
}

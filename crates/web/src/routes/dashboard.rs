//! Dashboard route handlers: the room list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use gripen_core::RoomId;

use crate::db::RepositoryError;
use crate::db::profiles::ProfileRepository;
use crate::db::rooms::RoomRepository;
use crate::error::Result;
use crate::middleware::{RequireProfile, set_current_user};
use crate::models::{CurrentUser, ProfileUpdate, Room};
use crate::state::AppState;

/// Query parameters for transient messages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// New room form data.
#[derive(Debug, Deserialize)]
pub struct NewRoomForm {
    pub name: String,
    pub description: Option<String>,
}

/// Household profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub display_name: String,
    pub address: String,
}

/// Room display data for templates.
pub struct RoomView {
    pub id: RoomId,
    pub name: String,
    pub description: Option<String>,
    pub box_count: i64,
    pub deletable: bool,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            deletable: room.deletable(),
            id: room.id,
            name: room.name,
            description: room.description,
            box_count: room.box_count,
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub display_name: Option<String>,
    pub address: String,
    pub rooms: Vec<RoomView>,
    pub total_rooms: usize,
    pub total_boxes: i64,
    pub error: Option<String>,
}

/// Display the dashboard: all rooms with live box counts plus totals.
pub async fn index(
    State(state): State<AppState>,
    auth: RequireProfile,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let rooms = RoomRepository::new(state.pool())
        .list_for_user(auth.user.id)
        .await?;

    let total_rooms = rooms.len();
    let total_boxes = rooms.iter().map(|r| r.box_count).sum();

    Ok(DashboardTemplate {
        display_name: auth.user.display_name,
        address: auth.profile.address,
        rooms: rooms.into_iter().map(RoomView::from).collect(),
        total_rooms,
        total_boxes,
        error: query.error,
    }
    .into_response())
}

/// Add a room.
pub async fn create_room(
    State(state): State<AppState>,
    auth: RequireProfile,
    Form(form): Form<NewRoomForm>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(redirect_with_error("Please enter a room name."));
    }

    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    RoomRepository::new(state.pool())
        .create(auth.user.id, name, description)
        .await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// Update the household profile (display name and address).
pub async fn update_profile(
    State(state): State<AppState>,
    auth: RequireProfile,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let address = form.address.trim();
    if address.is_empty() {
        return Ok(redirect_with_error("Please enter your address."));
    }

    let display_name = form.display_name.trim();
    let update = ProfileUpdate {
        address: Some(address.to_owned()),
        display_name: if display_name.is_empty() {
            None
        } else {
            Some(display_name.to_owned())
        },
    };

    ProfileRepository::new(state.pool())
        .update(auth.user.id, &update)
        .await?;
    state.refresh_profile(auth.user.id).await?;

    // The session carries a copy of the display name; keep it in step.
    let current = CurrentUser {
        id: auth.user.id,
        email: auth.user.email,
        display_name: update.display_name.clone().or(auth.user.display_name),
    };
    if let Err(err) = set_current_user(&session, &current).await {
        tracing::warn!(error = %err, "failed to refresh session after profile update");
    }

    Ok(Redirect::to("/dashboard").into_response())
}

/// Delete a room.
///
/// The repository refuses rooms that still hold boxes; that refusal comes
/// back as an inline message rather than an error page.
pub async fn delete_room(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(room_id): Path<RoomId>,
) -> Result<Response> {
    let outcome = RoomRepository::new(state.pool())
        .delete(auth.user.id, room_id)
        .await;
    delete_outcome(outcome)
}

fn delete_outcome(outcome: std::result::Result<(), RepositoryError>) -> Result<Response> {
    match outcome {
        Ok(()) => Ok(Redirect::to("/dashboard").into_response()),
        Err(RepositoryError::Conflict(_)) => Ok(redirect_with_error(
            "Empty the room before deleting it.",
        )),
        Err(other) => Err(other.into()),
    }
}

fn redirect_with_error(message: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("/dashboard?error={encoded}")).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{StatusCode, header::LOCATION};

    use super::*;

    fn location(response: &Response) -> &str {
        response.headers().get(LOCATION).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_delete_outcome_success_returns_to_dashboard() {
        let response = delete_outcome(Ok(())).unwrap();
        assert_eq!(location(&response), "/dashboard");
    }

    #[test]
    fn test_delete_outcome_conflict_becomes_inline_message() {
        let outcome = Err(RepositoryError::Conflict("room still holds boxes".into()));
        let response = delete_outcome(outcome).unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/dashboard?error=Empty+the+room+before+deleting+it."
        );
    }

    #[test]
    fn test_delete_outcome_missing_room_stays_an_error() {
        assert!(delete_outcome(Err(RepositoryError::NotFound)).is_err());
    }

    #[test]
    fn test_error_redirect_encodes_reserved_characters() {
        let response = redirect_with_error("50% done & counting #1");
        assert_eq!(
            location(&response),
            "/dashboard?error=50%25+done+%26+counting+%231"
        );
    }
}

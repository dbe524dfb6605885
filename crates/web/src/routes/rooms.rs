//! Room detail handlers: per-room box listing with search, and box creation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use gripen_core::RoomId;

use crate::error::{AppError, Result};
use crate::db::boxes::BoxRepository;
use crate::db::rooms::RoomRepository;
use crate::middleware::RequireProfile;
use crate::routes::boxes::{
    BoxView, box_view, delete_stored_photo, parse_box_form, parse_item_lines, room_name_map,
    store_photo,
};
use crate::search::{self, RoomScope};
use crate::state::AppState;

/// Query parameters for the room detail view.
#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    /// Free-text search term, scoped to this room.
    pub q: Option<String>,
    /// Inline error message carried across a redirect.
    pub error: Option<String>,
}

/// Room detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "rooms/detail.html")]
pub struct RoomDetailTemplate {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_description: Option<String>,
    pub boxes: Vec<BoxView>,
    pub term: String,
    pub error: Option<String>,
}

/// Display a room with its boxes, optionally filtered by a search term.
pub async fn show(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(room_id): Path<RoomId>,
    Query(query): Query<RoomQuery>,
) -> Result<Response> {
    let room = RoomRepository::new(state.pool())
        .get(auth.user.id, room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("room {room_id}")))?;

    let rooms = RoomRepository::new(state.pool())
        .list_for_user(auth.user.id)
        .await?;
    let boxes = BoxRepository::new(state.pool())
        .list_for_room(auth.user.id, room_id)
        .await?;

    let room_names = room_name_map(&rooms);
    let term = query.q.unwrap_or_default();

    // The box list is already room-scoped; the scope still applies so a term
    // matching another room's name cannot pull a box in through the name index.
    let hits = search::filter_boxes(&boxes, &term, RoomScope::Room(room_id), &room_names);
    let views = hits.iter().map(|b| box_view(b, &room_names)).collect();

    Ok(RoomDetailTemplate {
        room_id: room.id,
        room_name: room.name,
        room_description: room.description,
        boxes: views,
        term,
        error: query.error,
    }
    .into_response())
}

/// Create a box in a room from the multipart form.
pub async fn create_box(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(room_id): Path<RoomId>,
    multipart: Multipart,
) -> Result<Response> {
    let room = RoomRepository::new(state.pool())
        .get(auth.user.id, room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("room {room_id}")))?;

    let form = parse_box_form(multipart).await?;

    let box_number = form.box_number.trim().to_owned();
    if box_number.is_empty() {
        return Ok(redirect_with_error(room.id, "A box number is required."));
    }

    let items = match parse_item_lines(&form.items) {
        Ok(items) => items,
        Err(message) => return Ok(redirect_with_error(room.id, &message)),
    };

    let image_path = store_photo(&state, auth.user.id, form.photo.as_ref()).await?;

    match BoxRepository::new(state.pool())
        .create(
            auth.user.id,
            room.id,
            &box_number,
            form.description.trim(),
            image_path.as_deref(),
            &items,
        )
        .await
    {
        Ok(_) => Ok(Redirect::to(&format!("/dashboard/rooms/{}", room.id)).into_response()),
        Err(err) => {
            // The photo was written before the failed insert; don't orphan it.
            if let Some(path) = &image_path {
                delete_stored_photo(&state, path).await;
            }
            Err(err.into())
        }
    }
}

fn redirect_with_error(room_id: RoomId, message: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("/dashboard/rooms/{room_id}?error={encoded}")).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn test_error_redirect_encodes_reserved_characters() {
        let response = redirect_with_error(
            RoomId::new(4),
            "invalid quantity \"many\" for item \"Nuts & bolts #3\"",
        );

        let location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("/dashboard/rooms/4?error="));
        // Reserved characters must not survive into the query string raw.
        let query = location.split_once('=').unwrap().1;
        assert!(!query.contains('&'));
        assert!(!query.contains('#'));
        assert!(!query.contains('"'));
        assert!(query.contains("%26"));
        assert!(query.contains("%23"));
    }
}

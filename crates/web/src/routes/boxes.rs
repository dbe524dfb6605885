//! Box route handlers: cross-room search, edit, update, delete.
//!
//! Box create/update forms are multipart because of the optional photo. The
//! item list is entered one item per line as `name | quantity | category |
//! description`; only the name is required.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use gripen_core::{BoxId, RoomId, UserId};

use crate::error::{AppError, Result};
use crate::db::boxes::BoxRepository;
use crate::db::rooms::RoomRepository;
use crate::images;
use crate::middleware::RequireProfile;
use crate::models::{BoxUpdate, BoxWithItems, NewBoxItem, Room};
use crate::search::{self, RoomScope};
use crate::state::AppState;
use crate::storage::MediaStore;

// =============================================================================
// Query and Form Types
// =============================================================================

/// Query parameters for the all-boxes search view.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term.
    pub q: Option<String>,
    /// Room scope: "all" or a room id.
    pub room: Option<String>,
}

/// A parsed box create/update form.
#[derive(Debug, Default)]
pub struct BoxForm {
    pub room_id: Option<RoomId>,
    pub box_number: String,
    pub description: String,
    pub items: String,
    pub photo: Option<UploadedPhoto>,
}

/// An uploaded photo, validated before storage.
#[derive(Debug)]
pub struct UploadedPhoto {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// View Types
// =============================================================================

/// Box display data for templates.
pub struct BoxView {
    pub id: BoxId,
    pub box_number: String,
    pub description: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub thumbnail: Option<String>,
    pub item_count: i64,
    pub category_count: usize,
}

/// Build the template view of a box, resolving its room name and thumbnail.
#[must_use]
pub fn box_view(b: &BoxWithItems, room_names: &HashMap<RoomId, String>) -> BoxView {
    BoxView {
        id: b.storage_box.id,
        box_number: b.storage_box.box_number.clone(),
        description: b.storage_box.description.clone(),
        room_id: b.storage_box.room_id,
        room_name: room_names
            .get(&b.storage_box.room_id)
            .cloned()
            .unwrap_or_default(),
        thumbnail: b
            .storage_box
            .image_path
            .as_deref()
            .map(|path| images::thumbnail_url(&resolve_image_url(path), 200)),
        item_count: search::item_count(b),
        category_count: search::category_count(b),
    }
}

/// Resolve a stored image path to a URL.
///
/// Records imported from the previous deployment carry absolute CDN URLs;
/// everything uploaded here is a relative media path.
#[must_use]
pub fn resolve_image_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        MediaStore::public_url(path)
    }
}

/// Room choice for scope selects and edit forms.
pub struct RoomChoice {
    pub id: RoomId,
    pub name: String,
    pub selected: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// All-boxes search page template.
#[derive(Template, WebTemplate)]
#[template(path = "boxes/index.html")]
pub struct AllBoxesTemplate {
    pub boxes: Vec<BoxView>,
    pub rooms: Vec<RoomChoice>,
    pub term: String,
    pub all_selected: bool,
}

/// Box edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "boxes/edit.html")]
pub struct EditBoxTemplate {
    pub id: BoxId,
    pub box_number: String,
    pub description: String,
    pub items: String,
    pub rooms: Vec<RoomChoice>,
    pub image_url: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cross-room search view.
pub async fn index(
    State(state): State<AppState>,
    auth: RequireProfile,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let rooms = RoomRepository::new(state.pool())
        .list_for_user(auth.user.id)
        .await?;
    let boxes = BoxRepository::new(state.pool())
        .list_for_user(auth.user.id)
        .await?;

    let room_names = room_name_map(&rooms);
    let term = query.q.unwrap_or_default();
    let scope = parse_scope(query.room.as_deref());

    let hits = search::filter_boxes(&boxes, &term, scope, &room_names);
    let views = hits.iter().map(|b| box_view(b, &room_names)).collect();

    let room_choices = rooms
        .iter()
        .map(|room| RoomChoice {
            id: room.id,
            name: room.name.clone(),
            selected: scope == RoomScope::Room(room.id),
        })
        .collect();

    Ok(AllBoxesTemplate {
        boxes: views,
        rooms: room_choices,
        term,
        all_selected: scope == RoomScope::All,
    }
    .into_response())
}

/// Display the edit form for a box.
pub async fn edit_page(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(box_id): Path<BoxId>,
) -> Result<Response> {
    let b = BoxRepository::new(state.pool())
        .get(auth.user.id, box_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("box {box_id}")))?;

    let rooms = RoomRepository::new(state.pool())
        .list_for_user(auth.user.id)
        .await?;

    let room_choices = rooms
        .iter()
        .map(|room| RoomChoice {
            id: room.id,
            name: room.name.clone(),
            selected: room.id == b.storage_box.room_id,
        })
        .collect();

    Ok(EditBoxTemplate {
        id: b.storage_box.id,
        box_number: b.storage_box.box_number.clone(),
        description: b.storage_box.description.clone(),
        items: item_lines(&b),
        rooms: room_choices,
        image_url: b
            .storage_box
            .image_path
            .as_deref()
            .map(|p| images::preview_url(&resolve_image_url(p), 400, 300)),
        error: None,
    }
    .into_response())
}

/// Update a box: fields, wholesale item replacement, optional new photo.
pub async fn update(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(box_id): Path<BoxId>,
    multipart: Multipart,
) -> Result<Response> {
    let form = parse_box_form(multipart).await?;
    let items = parse_item_lines(&form.items).map_err(AppError::BadRequest)?;

    if form.box_number.trim().is_empty() {
        return Err(AppError::BadRequest("box number is required".to_owned()));
    }

    let new_image_path = store_photo(&state, auth.user.id, form.photo.as_ref()).await?;

    let repo = BoxRepository::new(state.pool());
    let previous = repo.get(auth.user.id, box_id).await?;

    let update = BoxUpdate {
        room_id: form.room_id,
        box_number: Some(form.box_number.trim().to_owned()),
        description: Some(form.description.trim().to_owned()),
        image_path: new_image_path.clone(),
        items: Some(items),
    };

    match repo.update(auth.user.id, box_id, &update).await {
        Ok(_) => {
            // The replaced photo is unreferenced now; clean it up best-effort.
            if let (Some(_), Some(prev)) = (
                &new_image_path,
                previous.and_then(|p| p.storage_box.image_path),
            ) {
                delete_stored_photo(&state, &prev).await;
            }
            Ok(Redirect::to("/dashboard/all-boxes").into_response())
        }
        Err(err) => {
            // The upload happened before the failed write; don't orphan it.
            if let Some(path) = &new_image_path {
                delete_stored_photo(&state, path).await;
            }
            Err(err.into())
        }
    }
}

/// Delete a box and its stored photo.
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireProfile,
    Path(box_id): Path<BoxId>,
) -> Result<Response> {
    let image_path = BoxRepository::new(state.pool())
        .delete(auth.user.id, box_id)
        .await?;

    if let Some(path) = image_path {
        delete_stored_photo(&state, &path).await;
    }

    Ok(Redirect::to("/dashboard/all-boxes").into_response())
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Room id to name lookup for search and display.
#[must_use]
pub fn room_name_map(rooms: &[Room]) -> HashMap<RoomId, String> {
    rooms
        .iter()
        .map(|room| (room.id, room.name.clone()))
        .collect()
}

/// Parse the room scope query value.
#[must_use]
pub fn parse_scope(raw: Option<&str>) -> RoomScope {
    match raw {
        None | Some("all" | "") => RoomScope::All,
        Some(value) => value
            .parse::<i32>()
            .map_or(RoomScope::All, |id| RoomScope::Room(RoomId::new(id))),
    }
}

/// Read a box create/update multipart form.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for malformed multipart bodies or uploads
/// failing validation.
pub async fn parse_box_form(mut multipart: Multipart) -> Result<BoxForm> {
    let mut form = BoxForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "room_id" => {
                let value = read_text(field).await?;
                form.room_id = value.trim().parse::<i32>().ok().map(RoomId::new);
            }
            "box_number" => form.box_number = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "items" => form.items = read_text(field).await?,
            "photo" => {
                // An empty file input still submits a zero-length part.
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                images::validate_upload(&content_type, bytes.len())
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.photo = Some(UploadedPhoto {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid form data: {e}")))
}

/// Store a validated photo, returning its relative media path.
pub async fn store_photo(
    state: &AppState,
    user_id: UserId,
    photo: Option<&UploadedPhoto>,
) -> Result<Option<String>> {
    let Some(photo) = photo else {
        return Ok(None);
    };

    let extension = images::extension_for(&photo.content_type);
    let path = state.media().save(user_id, extension, &photo.bytes).await?;
    Ok(Some(path))
}

/// Best-effort delete of a stored photo; legacy CDN URLs are skipped.
pub async fn delete_stored_photo(state: &AppState, path: &str) {
    if path.starts_with("http://") || path.starts_with("https://") {
        return;
    }
    if let Err(err) = state.media().delete(path).await {
        tracing::warn!(path = %path, error = %err, "failed to delete stored photo");
    }
}

/// Parse item lines: `name | quantity | category | description`.
///
/// # Errors
///
/// Returns a user-facing message for an unparseable quantity.
pub fn parse_item_lines(input: &str) -> std::result::Result<Vec<NewBoxItem>, String> {
    let mut items = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(4, '|').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let quantity = match parts.next().filter(|q| !q.is_empty()) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| format!("invalid quantity \"{raw}\" for item \"{name}\""))?,
            None => 1,
        };

        let category = parts.next().filter(|c| !c.is_empty()).map(str::to_owned);
        let description = parts.next().filter(|d| !d.is_empty()).map(str::to_owned);

        items.push(NewBoxItem {
            name: name.to_owned(),
            quantity,
            category,
            description,
        });
    }

    Ok(items)
}

/// Serialize a box's items back into form lines for the edit page.
#[must_use]
pub fn item_lines(b: &BoxWithItems) -> String {
    b.items
        .iter()
        .map(|item| {
            let mut line = format!("{} | {}", item.name, item.quantity);
            if let Some(category) = &item.category {
                line.push_str(&format!(" | {category}"));
            }
            if let Some(description) = &item.description {
                if item.category.is_none() {
                    line.push_str(" |");
                }
                line.push_str(&format!(" | {description}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_lines() {
        let items = parse_item_lines("Drill | 1 | Tools\nUSB cables | 12\nMystery thing").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Drill");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].category.as_deref(), Some("Tools"));
        assert_eq!(items[1].quantity, 12);
        assert_eq!(items[1].category, None);
        assert_eq!(items[2].quantity, 1);
    }

    #[test]
    fn test_parse_item_lines_rejects_bad_quantity() {
        assert!(parse_item_lines("Drill | many").is_err());
    }

    #[test]
    fn test_parse_item_lines_skips_blank_lines() {
        let items = parse_item_lines("\n\nBooks | 3\n\n").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope(None), RoomScope::All);
        assert_eq!(parse_scope(Some("all")), RoomScope::All);
        assert_eq!(parse_scope(Some("7")), RoomScope::Room(RoomId::new(7)));
        assert_eq!(parse_scope(Some("garbage")), RoomScope::All);
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(resolve_image_url("7/a.jpg"), "/media/7/a.jpg");
        assert_eq!(
            resolve_image_url("https://res.cloudinary.com/demo/image/upload/v1/a.jpg"),
            "https://res.cloudinary.com/demo/image/upload/v1/a.jpg"
        );
    }
}

//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Entry/login page (forwards signed-in users)
//! GET  /health                 - Health check
//!
//! # Auth
//! POST /auth/login             - Sign in
//! GET  /auth/register          - Registration page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Sign out
//!
//! # Onboarding (signed in, no profile yet)
//! GET  /startup                - Onboarding page (address + initial rooms)
//! POST /startup                - Complete onboarding
//!
//! # Dashboard (signed in with profile)
//! GET  /dashboard              - Room list with live box counts
//! POST /dashboard/profile      - Update display name and address
//! POST /dashboard/rooms        - Add room
//! POST /dashboard/rooms/{id}/delete - Delete room (refused while boxes remain)
//! GET  /dashboard/rooms/{id}   - Room detail: boxes + search + add-box form
//! POST /dashboard/rooms/{id}/boxes  - Add box (multipart, optional photo)
//! GET  /dashboard/all-boxes    - Cross-room search with room scope
//! GET  /dashboard/boxes/{id}/edit   - Edit box form
//! POST /dashboard/boxes/{id}   - Update box (multipart, wholesale item replace)
//! POST /dashboard/boxes/{id}/delete - Delete box
//! ```

pub mod auth;
pub mod boxes;
pub mod dashboard;
pub mod rooms;
pub mod startup;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/profile", post(dashboard::update_profile))
        .route("/rooms", post(dashboard::create_room))
        .route("/rooms/{id}/delete", post(dashboard::delete_room))
        .route("/rooms/{id}", get(rooms::show))
        .route("/rooms/{id}/boxes", post(rooms::create_box))
        .route("/all-boxes", get(boxes::index))
        .route("/boxes/{id}/edit", get(boxes::edit_page))
        .route("/boxes/{id}", post(boxes::update))
        .route("/boxes/{id}/delete", post(boxes::delete))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Entry/login page
        .route("/", get(auth::entry))
        // Onboarding
        .route("/startup", get(startup::page).post(startup::complete))
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Auth actions
        .nest("/auth", auth_routes())
}

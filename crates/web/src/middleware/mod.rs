//! HTTP middleware and extractors.
//!
//! # Layer Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! The access guard itself is not a layer: the extractors in [`auth`]
//! evaluate [`guard`] per guarded handler.

pub mod auth;
pub mod guard;
pub mod session;

pub use auth::{
    GuardRejection, RequireAuth, RequireOnboarding, RequireProfile, clear_current_user,
    set_current_user,
};
pub use guard::{GuardDecision, GuardPage};
pub use session::create_session_layer;

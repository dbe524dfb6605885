//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use gripen_core::UserId;

use crate::config::AppConfig;
use crate::db::RepositoryError;
use crate::db::profiles::ProfileRepository;
use crate::models::Profile;
use crate::storage::MediaStore;

/// How long a cached profile lookup stays fresh.
const PROFILE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: database pool, configuration, media store, and the per-user
/// profile cache that backs the access guard's `has_profile` signal.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    media: MediaStore,
    /// `None` is cached too: it records "onboarding not finished yet".
    profiles: Cache<UserId, Option<Profile>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AppConfig, pool: PgPool, media: MediaStore) -> Self {
        let profiles = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(PROFILE_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                media,
                profiles,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the media store.
    #[must_use]
    pub fn media(&self) -> &MediaStore {
        &self.inner.media
    }

    /// Fetch a user's profile through the cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying lookup fails; failures are
    /// not cached.
    pub async fn profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        if let Some(cached) = self.inner.profiles.get(&user_id).await {
            return Ok(cached);
        }

        let profile = ProfileRepository::new(self.pool()).get(user_id).await?;
        self.inner.profiles.insert(user_id, profile.clone()).await;
        Ok(profile)
    }

    /// Drop the cached entry and re-fetch the profile.
    ///
    /// Used after onboarding completes so the guard sees the new profile
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the re-fetch fails.
    pub async fn refresh_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, RepositoryError> {
        self.inner.profiles.invalidate(&user_id).await;
        self.profile(user_id).await
    }

    /// Forget a user's cached profile (sign-out).
    pub async fn forget_profile(&self, user_id: UserId) {
        self.inner.profiles.invalidate(&user_id).await;
    }
}

//! Profile service - cached profile reads and follow toggling

use std::sync::Arc;

use chirp_common::time::{Clock, SystemClock};
use chirp_domain::{ChirpError, ProfileUpdate, Result, UserProfile};
use tracing::debug;

use super::ports::ProfileRepository;
use crate::cache::{keys, AppCaches};

/// Profile service
pub struct ProfileService<C = SystemClock>
where
    C: Clock + Clone,
{
    repository: Arc<dyn ProfileRepository>,
    caches: AppCaches<C>,
}

impl<C> ProfileService<C>
where
    C: Clock + Clone,
{
    /// Create a new profile service
    pub fn new(repository: Arc<dyn ProfileRepository>, caches: AppCaches<C>) -> Self {
        Self { repository, caches }
    }

    /// Get a profile, reading through the profile cache
    ///
    /// # Errors
    /// Returns `ChirpError::NotFound` if the user does not exist, or the
    /// repository error if the fetch fails. Neither is cached.
    pub async fn profile(&self, user_id: &str) -> Result<Arc<UserProfile>> {
        let repository = Arc::clone(&self.repository);
        self.caches
            .profile_loader()
            .get_or_fetch(&keys::profile(user_id), || async move {
                repository
                    .get_profile(user_id)
                    .await?
                    .map(Arc::new)
                    .ok_or_else(|| ChirpError::NotFound(format!("profile {user_id}")))
            })
            .await
    }

    /// Update the profile and drop the cached copy
    ///
    /// # Errors
    /// Returns `ChirpError::InvalidInput` for an empty update or a blank
    /// display name.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Arc<UserProfile>> {
        if update.is_empty() {
            return Err(ChirpError::InvalidInput("profile update has no fields".to_string()));
        }
        if update.display_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ChirpError::InvalidInput("display name cannot be blank".to_string()));
        }

        let profile = self.repository.update_profile(user_id, update).await?;
        self.caches.invalidate_user_profile(user_id);
        Ok(Arc::new(profile))
    }

    /// Follow `target_id` if not yet followed, otherwise unfollow
    ///
    /// Both profiles' counters change, and the `following` feed depends on
    /// the edge, so both profiles and all feeds are invalidated.
    ///
    /// Returns whether `follower_id` follows `target_id` afterwards.
    ///
    /// # Errors
    /// Returns `ChirpError::InvalidInput` when a user targets themselves.
    pub async fn toggle_follow(&self, follower_id: &str, target_id: &str) -> Result<bool> {
        if follower_id == target_id {
            return Err(ChirpError::InvalidInput("users cannot follow themselves".to_string()));
        }

        let following = if self.repository.is_following(follower_id, target_id).await? {
            self.repository.unfollow(follower_id, target_id).await?;
            false
        } else {
            self.repository.follow(follower_id, target_id).await?;
            true
        };

        self.caches.invalidate_user_profile(follower_id);
        self.caches.invalidate_user_profile(target_id);
        self.caches.invalidate_feeds();
        debug!(follower_id, target_id, following, "Follow toggled");
        Ok(following)
    }

    pub async fn followers(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        self.repository.followers(user_id).await
    }

    pub async fn following(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        self.repository.following(user_id).await
    }
}

impl<C> Clone for ProfileService<C>
where
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self { repository: Arc::clone(&self.repository), caches: self.caches.clone() }
    }
}

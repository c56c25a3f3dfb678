//! Port interfaces for profiles
//!
//! These traits define the boundaries between core business logic
//! and the hosted backend.

use async_trait::async_trait;
use chirp_domain::{ProfileUpdate, Result, UserProfile};

/// Trait for reading and updating profiles and follow edges
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get a profile by user id; `None` if the user does not exist
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Apply an update and return the stored profile
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Record that `follower_id` follows `target_id`
    async fn follow(&self, follower_id: &str, target_id: &str) -> Result<()>;

    /// Remove the follow edge if present
    async fn unfollow(&self, follower_id: &str, target_id: &str) -> Result<()>;

    async fn is_following(&self, follower_id: &str, target_id: &str) -> Result<bool>;

    /// Users following `user_id`
    async fn followers(&self, user_id: &str) -> Result<Vec<UserProfile>>;

    /// Users `user_id` follows
    async fn following(&self, user_id: &str) -> Result<Vec<UserProfile>>;
}

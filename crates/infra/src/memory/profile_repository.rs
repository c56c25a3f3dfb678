//! `ProfileRepository` over the in-memory store

use async_trait::async_trait;
use chirp_core::ProfileRepository as ProfileRepositoryPort;
use chirp_domain::{ChirpError, ProfileUpdate, Result as DomainResult, UserProfile};

use super::store::{BackendState, InMemoryBackend};

fn require_user(state: &BackendState, user_id: &str) -> DomainResult<()> {
    if state.profiles.contains_key(user_id) {
        Ok(())
    } else {
        Err(ChirpError::NotFound(format!("user {user_id}")))
    }
}

/// Profiles on one side of the follow edges, ordered by username
fn edge_profiles<F>(state: &BackendState, select: F) -> Vec<UserProfile>
where
    F: Fn(&(String, String)) -> Option<&String>,
{
    let mut profiles: Vec<UserProfile> = state
        .follows
        .iter()
        .filter_map(|edge| select(edge))
        .filter_map(|id| state.profiles.get(id).cloned())
        .collect();
    profiles.sort_by(|a, b| a.username.cmp(&b.username));
    profiles
}

#[async_trait]
impl ProfileRepositoryPort for InMemoryBackend {
    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<UserProfile>> {
        Ok(self.read().profiles.get(user_id).cloned())
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> DomainResult<UserProfile> {
        let mut state = self.write();
        let profile = state
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| ChirpError::NotFound(format!("user {user_id}")))?;
        update.apply_to(profile);
        Ok(profile.clone())
    }

    async fn follow(&self, follower_id: &str, target_id: &str) -> DomainResult<()> {
        let mut state = self.write();
        require_user(&state, follower_id)?;
        require_user(&state, target_id)?;

        if state.follows.insert((follower_id.to_string(), target_id.to_string())) {
            if let Some(p) = state.profiles.get_mut(follower_id) {
                p.following_count += 1;
            }
            if let Some(p) = state.profiles.get_mut(target_id) {
                p.followers_count += 1;
            }
        }
        Ok(())
    }

    async fn unfollow(&self, follower_id: &str, target_id: &str) -> DomainResult<()> {
        let mut state = self.write();
        if state.follows.remove(&(follower_id.to_string(), target_id.to_string())) {
            if let Some(p) = state.profiles.get_mut(follower_id) {
                p.following_count = p.following_count.saturating_sub(1);
            }
            if let Some(p) = state.profiles.get_mut(target_id) {
                p.followers_count = p.followers_count.saturating_sub(1);
            }
        }
        Ok(())
    }

    async fn is_following(&self, follower_id: &str, target_id: &str) -> DomainResult<bool> {
        Ok(self.read().follows(follower_id, target_id))
    }

    async fn followers(&self, user_id: &str) -> DomainResult<Vec<UserProfile>> {
        let state = self.read();
        require_user(&state, user_id)?;
        Ok(edge_profiles(&state, |(follower, target)| (target == user_id).then_some(follower)))
    }

    async fn following(&self, user_id: &str) -> DomainResult<Vec<UserProfile>> {
        let state = self.read();
        require_user(&state, user_id)?;
        Ok(edge_profiles(&state, |(follower, target)| (follower == user_id).then_some(target)))
    }
}

//! User profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user, as shown on the profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweets_count: u64,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Minimal profile with zeroed counters
    pub fn new(id: impl Into<String>, username: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let username = username.into();
        Self {
            id: id.into(),
            display_name: username.clone(),
            username,
            bio: None,
            location: None,
            website: None,
            avatar_url: None,
            banner_url: None,
            followers_count: 0,
            following_count: 0,
            tweets_count: 0,
            created_at,
        }
    }
}

/// Editable profile fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy the set fields onto `profile`
    ///
    /// An empty string clears an optional field.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.display_name {
            profile.display_name.clone_from(name);
        }
        apply_optional(&mut profile.bio, self.bio.as_ref());
        apply_optional(&mut profile.location, self.location.as_ref());
        apply_optional(&mut profile.website, self.website.as_ref());
        apply_optional(&mut profile.avatar_url, self.avatar_url.as_ref());
        apply_optional(&mut profile.banner_url, self.banner_url.as_ref());
    }
}

fn apply_optional(field: &mut Option<String>, update: Option<&String>) {
    if let Some(value) = update {
        *field = if value.is_empty() { None } else { Some(value.clone()) };
    }
}

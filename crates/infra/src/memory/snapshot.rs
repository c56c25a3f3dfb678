//! Serializable backend state for seeding and export

use std::path::Path;

use chirp_domain::{ChirpError, Country, InteractionState, Result, Tweet, UserProfile};
use serde::{Deserialize, Serialize};

use crate::errors::InfraError;

/// Full backend contents as stored in a JSON seed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSnapshot {
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
    #[serde(default)]
    pub follows: Vec<Follow>,
    #[serde(default)]
    pub interactions: Vec<StoredInteraction>,
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: String,
    pub target_id: String,
}

/// One user's interaction state on one tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInteraction {
    pub user_id: String,
    pub tweet_id: String,
    #[serde(flatten)]
    pub state: InteractionState,
}

impl BackendSnapshot {
    /// Read a snapshot from a JSON file
    ///
    /// # Errors
    /// Returns `ChirpError::NotFound` for a missing file and
    /// `ChirpError::InvalidInput` for malformed JSON or dangling references.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(InfraError::from)?;
        let snapshot: Self = serde_json::from_str(&contents).map_err(InfraError::from)?;
        snapshot.check_references()?;
        tracing::info!(path = %path.display(), "Loaded backend snapshot");
        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON
    ///
    /// # Errors
    /// Returns the mapped I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(InfraError::from)?;
        std::fs::write(path, json).map_err(InfraError::from)?;
        Ok(())
    }

    /// Every tweet author and follow endpoint must be a known profile
    fn check_references(&self) -> Result<()> {
        let known = |id: &str| self.profiles.iter().any(|p| p.id == id);

        if let Some(tweet) = self.tweets.iter().find(|t| !known(&t.author_id)) {
            return Err(ChirpError::InvalidInput(format!(
                "tweet {} references unknown author {}",
                tweet.id, tweet.author_id
            )));
        }
        if let Some(edge) =
            self.follows.iter().find(|e| !known(&e.follower_id) || !known(&e.target_id))
        {
            return Err(ChirpError::InvalidInput(format!(
                "follow {} -> {} references an unknown user",
                edge.follower_id, edge.target_id
            )));
        }
        Ok(())
    }
}

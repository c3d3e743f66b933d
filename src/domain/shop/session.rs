use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Secret, UserId};

/// Authenticated user session. Its presence gates the Shop subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Secret,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<UserId>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: Secret::from(token.into()),
            user_id: user_id.into(),
            expires_at,
        }
    }

    /// Session valid for `ttl` starting at `now`
    pub fn starting_at(
        token: impl Into<String>,
        user_id: impl Into<UserId>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self::new(token, user_id, now + ttl)
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

use chrono::{DateTime, Utc};

/// A live admin session.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

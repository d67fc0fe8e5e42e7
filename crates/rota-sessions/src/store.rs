use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::SessionEntry;

/// Process-wide store of opaque admin session tokens.
///
/// All sessions carry the same single-admin identity, so an entry is just a
/// token with an expiry. Expired entries are removed on sight by
/// [`SessionStore::validate`] and swept in bulk by
/// [`SessionStore::purge_expired`].
pub struct SessionStore {
    entries: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Issue a fresh opaque token.
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string().replace('-', "");
        let now = Utc::now();
        self.entries.insert(
            token.clone(),
            SessionEntry {
                created_at: now,
                expires_at: now + self.ttl,
            },
        );
        info!(live = self.entries.len(), "session issued");
        token
    }

    /// True when the token exists and has not expired. An expired entry is
    /// evicted on the spot.
    pub fn validate(&self, token: &str) -> bool {
        let now = Utc::now();
        let expired = match self.entries.get(token) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };
        if expired {
            self.entries.remove(token);
            debug!("expired session evicted on validate");
            return false;
        }
        true
    }

    /// Drop a token (logout). Returns whether it was live.
    pub fn revoke(&self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Sweep all expired entries. Returns how many were evicted.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            info!(evicted, live = self.entries.len(), "expired sessions purged");
        }
        evicted
    }

    /// Number of live entries (including any not yet swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

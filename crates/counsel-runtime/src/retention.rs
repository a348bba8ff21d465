//! Short-lived storage of analysis results.
//!
//! A result is kept per session until its expiry and then erased. Only the
//! [`AnalysisResult`] is stored; the contract text is never retained.
//!
//! The store takes the current time as an argument on every call instead of
//! reading the clock, so expiry is reproducible under a fixed clock.

use chrono::{DateTime, Duration, Utc};
use counsel_core::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, RetentionConfig};

/// Errors from the retention store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetentionError {
    #[error("Expiry time out of range: {now} plus a TTL of {ttl_secs}s")]
    ExpiryOutOfRange { now: DateTime<Utc>, ttl_secs: i64 },
}

/// Identifies one user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone)]
struct Retained {
    result: AnalysisResult,
    expires_at: DateTime<Utc>,
}

impl Retained {
    /// Still valid at the expiry instant itself.
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Per-session result store with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct RetentionStore {
    ttl: Duration,
    entries: HashMap<SessionId, Retained>,
}

impl RetentionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn from_config(config: &RetentionConfig) -> Result<Self, ConfigError> {
        let ttl = Duration::from_std(config.ttl)
            .map_err(|e| ConfigError::Invalid(format!("retention.ttl out of range: {}", e)))?;
        Ok(Self::new(ttl))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a result, replacing any previous one for the session.
    ///
    /// Returns the expiry time, or an error if it is not representable.
    pub fn put(
        &mut self,
        session: SessionId,
        result: AnalysisResult,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, RetentionError> {
        let expires_at =
            now.checked_add_signed(self.ttl)
                .ok_or(RetentionError::ExpiryOutOfRange {
                    now,
                    ttl_secs: self.ttl.num_seconds(),
                })?;
        debug!(session = %session, %expires_at, "Result retained");
        self.entries.insert(session, Retained { result, expires_at });
        Ok(expires_at)
    }

    /// The session's result if it has not expired. Expired entries are
    /// erased on access.
    pub fn get(&mut self, session: &SessionId, now: DateTime<Utc>) -> Option<&AnalysisResult> {
        if self.entries.get(session)?.is_expired(now) {
            warn!(session = %session, "Retained result expired");
            self.entries.remove(session);
            return None;
        }
        self.entries.get(session).map(|r| &r.result)
    }

    /// Whether a result is held for the session, expired or not.
    pub fn contains(&self, session: &SessionId) -> bool {
        self.entries.contains_key(session)
    }

    pub fn expires_at(&self, session: &SessionId) -> Option<DateTime<Utc>> {
        self.entries.get(session).map(|r| r.expires_at)
    }

    /// Whole seconds until the session's result expires. 0 if there is none.
    pub fn remaining(&self, session: &SessionId, now: DateTime<Utc>) -> u64 {
        self.entries
            .get(session)
            .map(|r| (r.expires_at - now).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// Erase the session's result. Returns whether there was one.
    pub fn clear(&mut self, session: &SessionId) -> bool {
        self.entries.remove(session).is_some()
    }

    /// Erase every expired result. Returns how many were erased.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, r| !r.is_expired(now));
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, "Expired results purged");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RetentionStore {
    fn default() -> Self {
        Self::new(Duration::minutes(5))
    }
}

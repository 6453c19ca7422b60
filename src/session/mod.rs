//! Bearer credential lifecycle
//!
//! [`TokenManager`] is the single source of truth for whether a usable
//! credential exists. It never performs network I/O; the gateway consults it
//! before every request and updates it after login, logout and 401 responses.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use crate::error::SessionError;

pub mod clock;
pub mod jwt;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use storage::{FileSessionStorage, SessionStorage, StoredSession};

#[cfg(test)]
pub use clock::ManualClock;
#[cfg(test)]
pub use storage::MemorySessionStorage;

/// Default tolerance subtracted from the expiry instant
pub const DEFAULT_SKEW_SECS: i64 = 10;

/// Where the expiry instant comes from. One policy per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Decode the token's own `exp` claim
    Claim,
    /// `now + duration`, recorded when the token is stored
    Lease(Duration),
}

/// Owner of the stored bearer token.
pub struct TokenManager {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    policy: ExpiryPolicy,
    skew: Duration,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("policy", &self.policy)
            .field("skew", &self.skew)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager over `storage` using the wall clock and default skew.
    pub fn new(storage: Arc<dyn SessionStorage>, policy: ExpiryPolicy) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            policy,
            skew: Duration::seconds(DEFAULT_SKEW_SECS),
        }
    }

    /// Replace the time source.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the skew tolerance.
    pub fn with_skew(mut self, skew: Duration) -> Self {
        self.skew = skew;
        self
    }


    fn load(&self) -> Option<StoredSession> {
        match self.storage.load() {
            Ok(record) => record,
            Err(e) => {
                warn!("Could not read session storage: {}", e);
                None
            }
        }
    }

    /// Current token, if one is stored.
    pub fn get_token(&self) -> Option<String> {
        self.load().and_then(|record| record.token)
    }

    /// Store `token`, replacing any previous credential.
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let expires_at = match self.policy {
            ExpiryPolicy::Claim => None,
            ExpiryPolicy::Lease(lease) => Some(
                self.clock
                    .now()
                    .checked_add_signed(lease)
                    .ok_or_else(|| SessionError::Storage("lease end out of range".to_string()))?,
            ),
        };

        self.storage.save(&StoredSession {
            token: Some(token.to_string()),
            expires_at,
        })?;
        debug!("Stored new session token");
        Ok(())
    }

    /// Drop the stored credential. A no-op when nothing is stored.
    pub fn remove_token(&self) -> Result<(), SessionError> {
        self.storage.clear()?;
        debug!("Cleared session token");
        Ok(())
    }

    /// Expiry instant of the stored credential under the configured policy.
    ///
    /// `None` when no token is stored or its expiry cannot be determined.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let record = self.load()?;
        let token = record.token?;
        match self.policy {
            ExpiryPolicy::Claim => match jwt::decode_expiry(&token) {
                Ok(exp) => Some(exp),
                Err(e) => {
                    debug!("Treating token as expired: {}", e);
                    None
                }
            },
            ExpiryPolicy::Lease(_) => record.expires_at,
        }
    }

    /// True unless a token exists and is provably valid past the skew window.
    pub fn is_token_expired(&self) -> bool {
        match self.expires_at() {
            None => true,
            Some(expires_at) => match expires_at.checked_sub_signed(self.skew) {
                Some(deadline) => self.clock.now() >= deadline,
                None => true,
            },
        }
    }

    /// Whole seconds of remaining validity, 0 when unknown or expired.
    pub fn time_until_expiry(&self) -> u64 {
        self.expires_at()
            .map(|expires_at| (expires_at - self.clock.now()).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// Startup view of the session: a usable credential is present.
    pub fn is_authenticated(&self) -> bool {
        !self.is_token_expired()
    }
}

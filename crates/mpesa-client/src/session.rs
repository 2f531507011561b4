//! Session key lifecycle.
//!
//! The gateway authorises payment calls with a session key obtained by
//! presenting the encrypted API key. Keys expire after the lifetime set in
//! the developer portal, so the manager caches the current key with its
//! expiry and only goes back to the gateway once it has lapsed.

use chrono::{DateTime, Utc};
use mpesa_core::{ClientConfig, OperationKind, SessionResponse};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::ClientError;
use crate::pipeline::dispatch;
use crate::transport::{GatewayRequest, HttpExecutor};

/// A session key and the instant it stops being usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            expires_at,
        }
    }

    /// Usable strictly before `expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Owns the cached session of one client.
///
/// Refreshes triggered by [`ensure_session`](Self::ensure_session) are
/// single-flight: callers that find the session expired queue on a refresh
/// lock and re-check the cache once they hold it, so a burst of callers
/// produces one bootstrap call. [`acquire_session`](Self::acquire_session)
/// always goes to the gateway; concurrent forced acquisitions each store
/// their result and the last one wins.
pub struct SessionManager {
    config: Arc<ClientConfig>,
    executor: Arc<dyn HttpExecutor>,
    current: RwLock<Option<Session>>,
    refresh: Mutex<()>,
    deadline: Duration,
}

impl SessionManager {
    pub fn new(config: Arc<ClientConfig>, executor: Arc<dyn HttpExecutor>) -> Self {
        let deadline = Duration::from_secs(config.request_timeout_secs);
        Self {
            config,
            executor,
            current: RwLock::new(None),
            refresh: Mutex::new(()),
            deadline,
        }
    }

    /// Snapshot of the cached session, expired or not.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the cached session as a whole.
    pub fn replace(&self, session: Session) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Drop the cached session; the next call will acquire a new one.
    pub fn invalidate(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached_id(&self, now: DateTime<Utc>) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|s| s.is_valid_at(now))
            .map(|s| s.id.clone())
    }

    /// Return a usable session id, acquiring a new session if needed.
    ///
    /// A failed refresh aborts the call; the stale session is never used.
    pub async fn ensure_session(&self) -> Result<String, ClientError> {
        if let Some(id) = self.cached_id(Utc::now()) {
            tracing::debug!("using cached session");
            return Ok(id);
        }

        let _guard = self.refresh.lock().await;
        if let Some(id) = self.cached_id(Utc::now()) {
            tracing::debug!("session refreshed by a concurrent caller");
            return Ok(id);
        }

        let response = self.acquire_session().await?;
        Ok(response.id)
    }

    /// Open a new session with the gateway and cache it.
    ///
    /// The cache is only written after the whole exchange succeeded.
    pub async fn acquire_session(&self) -> Result<SessionResponse, ClientError> {
        let operation = OperationKind::SessionId;
        let bootstrap_token = mpesa_crypto::encrypt(&self.config.api_key, &self.config.public_key)?;

        let request = GatewayRequest::authorized(
            operation,
            self.config.url_for(operation),
            &bootstrap_token,
            None,
        );
        let response: SessionResponse =
            dispatch(self.executor.as_ref(), request, self.deadline).await?;

        if response.id.trim().is_empty() {
            return Err(ClientError::Business {
                operation,
                message: "gateway returned an empty session id".into(),
            });
        }

        let lifetime = chrono::Duration::try_minutes(self.config.session_lifetime_minutes)
            .ok_or_else(|| ClientError::Config(mpesa_core::CoreError::InvalidConfig(format!(
                "session lifetime out of range: {} minutes",
                self.config.session_lifetime_minutes
            ))))?;
        let expires_at = Utc::now().checked_add_signed(lifetime).ok_or_else(|| {
            ClientError::Config(mpesa_core::CoreError::InvalidConfig(format!(
                "session lifetime out of range: {} minutes",
                self.config.session_lifetime_minutes
            )))
        })?;
        self.replace(Session::new(response.id.clone(), expires_at));

        tracing::info!(
            expires_at = %expires_at,
            lifetime_minutes = self.config.session_lifetime_minutes,
            "acquired gateway session"
        );
        Ok(response)
    }
}

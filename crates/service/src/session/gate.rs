use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::errors::GateError;
use crate::cache::QueryCache;
use crate::remote::{BackendActor, RemoteError};
use crate::storage::LocalStore;

/// Local storage key of the session marker.
pub const ADMIN_SESSION_KEY: &str = "admin_session";
const SESSION_ACTIVE: &str = "active";
const SESSION_EXPIRED: &str = "Session expired";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateState {
    Unauthenticated,
    Validating,
    Authenticated,
}

/// What the admin views render from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateSnapshot {
    pub state: GateState,
    pub error: Option<String>,
}

impl GateSnapshot {
    pub fn is_logged_in(&self) -> bool {
        self.state == GateState::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state == GateState::Validating
    }
}

struct Committed {
    seq: u64,
    snapshot: GateSnapshot,
}

/// Owns the session marker and the query cache.
///
/// Every operation takes a sequence number when it starts; a result only
/// lands if no newer operation has started since, so a slow response can
/// never overwrite a later sign-out or re-validation.
pub struct AdminSessionGate {
    backend: Arc<dyn BackendActor>,
    local: Arc<LocalStore>,
    cache: QueryCache,
    timeout: Duration,
    sequence: AtomicU64,
    current: ArcSwap<Committed>,
}

impl AdminSessionGate {
    pub fn new(backend: Arc<dyn BackendActor>, local: Arc<LocalStore>, cache: QueryCache, timeout: Duration) -> Self {
        let initial = Committed {
            seq: 0,
            snapshot: GateSnapshot { state: GateState::Unauthenticated, error: None },
        };
        Self {
            backend,
            local,
            cache,
            timeout,
            sequence: AtomicU64::new(0),
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn snapshot(&self) -> GateSnapshot {
        self.current.load().snapshot.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.load().snapshot.is_logged_in()
    }

    pub fn has_session_marker(&self) -> bool {
        self.local
            .get_item(ADMIN_SESSION_KEY)
            .is_some_and(|v| !v.is_empty())
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Re-check the stored session with the backend.
    ///
    /// Without a marker no remote call is made. A `false` answer, an error or
    /// a timeout all sign the caller out and delete the marker.
    #[instrument(skip(self))]
    pub async fn validate_session(&self) -> GateSnapshot {
        let seq = self.begin();
        if !self.has_session_marker() {
            self.commit(seq, GateState::Unauthenticated, None);
            return self.snapshot();
        }

        self.commit(seq, GateState::Validating, None);
        match self.guarded(self.backend.is_caller_admin()).await {
            Ok(true) => {
                if self.commit(seq, GateState::Authenticated, None) {
                    info!("admin session confirmed");
                }
            }
            Ok(false) => {
                if self.commit(seq, GateState::Unauthenticated, Some(SESSION_EXPIRED.to_string())) {
                    self.remove_marker(seq);
                    info!("admin session no longer valid");
                }
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), transient = e.is_transient(), "session validation failed; signing out");
                if self.commit(seq, GateState::Unauthenticated, None) {
                    self.remove_marker(seq);
                }
            }
        }
        self.snapshot()
    }

    /// Sign in, then confirm the admin role before trusting the login.
    ///
    /// # Examples
    /// ```
    /// use std::{sync::Arc, time::Duration};
    /// use service::{cache::QueryCache, remote::mock::MockBackend, storage::LocalStore, AdminSessionGate};
    /// let backend = Arc::new(MockBackend::new("admin", "s3cret"));
    /// let gate = AdminSessionGate::new(backend, LocalStore::in_memory(), QueryCache::new(16, Duration::from_secs(60)), Duration::from_secs(5));
    /// let err = tokio_test::block_on(gate.login("admin", "wrong")).unwrap_err();
    /// assert_eq!(err.to_string(), "Invalid username or password");
    /// tokio_test::block_on(gate.login("admin", "s3cret")).unwrap();
    /// assert!(gate.is_logged_in());
    /// assert!(gate.has_session_marker());
    /// ```
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), GateError> {
        let seq = self.begin();
        self.commit(seq, GateState::Validating, None);

        match self.authenticate(username, password).await {
            Ok(()) => {
                if !self.commit(seq, GateState::Authenticated, None) {
                    return Err(GateError::Superseded);
                }
                if let Err(e) = self.local.set_item(ADMIN_SESSION_KEY, SESSION_ACTIVE) {
                    warn!(error = %e, "could not persist admin session marker");
                }
                self.cache.invalidate_all();
                info!("admin signed in");
                Ok(())
            }
            Err(err) => {
                if self.commit(seq, GateState::Unauthenticated, Some(err.to_string())) {
                    self.remove_marker(seq);
                }
                Err(err)
            }
        }
    }

    /// Sign out and purge every cached query.
    pub fn logout(&self) {
        let seq = self.begin();
        self.commit(seq, GateState::Unauthenticated, None);
        self.remove_marker(seq);
        self.cache.invalidate_all();
        info!("admin signed out");
    }

    /// Backend refused an admin operation: drop the session as if it expired.
    pub fn revoke(&self) {
        let seq = self.begin();
        self.commit(seq, GateState::Unauthenticated, Some(SESSION_EXPIRED.to_string()));
        self.remove_marker(seq);
        self.cache.invalidate_all();
        warn!("admin session revoked by backend");
    }

    pub fn clear_error(&self) {
        self.current.rcu(|cur| Committed {
            seq: cur.seq,
            snapshot: GateSnapshot { state: cur.snapshot.state, error: None },
        });
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<(), GateError> {
        match self.guarded(self.backend.admin_login(username, password)).await {
            Ok(true) => {}
            Ok(false) => return Err(GateError::InvalidCredentials),
            Err(e) => {
                warn!(error = %e, code = e.code(), transient = e.is_transient(), "admin login call failed");
                return Err(GateError::LoginFailed);
            }
        }
        match self.guarded(self.backend.is_caller_admin()).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("login accepted but caller lacks the admin role");
                Err(GateError::VerificationFailed)
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), transient = e.is_transient(), "admin check after login failed");
                Err(GateError::VerificationFailed)
            }
        }
    }

    async fn guarded<T>(&self, call: impl Future<Output = Result<T, RemoteError>>) -> Result<T, RemoteError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RemoteError::Timeout)?
    }

    fn begin(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == seq
    }

    // Publish only while `seq` is the newest operation.
    fn commit(&self, seq: u64, state: GateState, error: Option<String>) -> bool {
        let next = Arc::new(Committed { seq, snapshot: GateSnapshot { state, error } });
        loop {
            let cur = self.current.load_full();
            if !self.is_current(seq) || cur.seq > seq {
                debug!(seq, latest = cur.seq, "dropping stale session result");
                return false;
            }
            let prev = self.current.compare_and_swap(&cur, Arc::clone(&next));
            if Arc::ptr_eq(&*prev, &cur) {
                debug!(seq, ?state, "session state committed");
                return true;
            }
        }
    }

    fn remove_marker(&self, seq: u64) {
        if !self.is_current(seq) {
            return;
        }
        if let Err(e) = self.local.remove_item(ADMIN_SESSION_KEY) {
            warn!(error = %e, "could not remove admin session marker");
        }
    }
}

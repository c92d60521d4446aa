use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use finboard_core::domain::User;
use log::{info, warn};

use crate::error::ApiFailure;
use crate::notify::{NoticeKind, Notifier};

use super::status::SessionStatus;
use super::storage::{SessionRecord, SessionStorage};

/// Notice text for a bootstrap revalidation that did not come back clean.
pub const SESSION_EXPIRED_NOTICE: &str = "session expired, please sign in again";

const SIGNED_OUT_NOTICE: &str = "Signed out";

/// The revalidation seam used by [`SessionStore::initialize_auth`]. Fails on
/// an invalid or expired token, or on any transport fault.
#[async_trait]
pub trait IdentityFetch: Send + Sync {
    async fn current_identity(&self) -> Result<User, ApiFailure>;
}

/// Consistent point-in-time copy of the session, read by the outbound
/// pipeline stage without holding the store's lock.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub token: Option<String>,
    pub status: SessionStatus,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
    status: SessionStatus,
}

/// Single source of truth for the authenticated session.
///
/// One instance per process, explicitly threaded to every component that
/// needs session access. Mutations are synchronous; the lock is never held
/// across a suspension point. The token is owned here exclusively and only
/// ever forwarded, never inspected.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: SessionStorage,
    notifier: Arc<dyn Notifier>,
}

impl SessionStore {
    pub fn new(storage: SessionStorage, notifier: Arc<dyn Notifier>) -> Self {
        SessionStore {
            state: RwLock::new(SessionState::default()),
            storage,
            notifier,
        }
    }

    /// Commit a fresh credential exchange. Replaces any previous identity
    /// unconditionally; the token's authenticity is the caller's trust
    /// boundary, not validated here.
    pub fn set_user(&self, user: User, token: String) {
        let record = {
            let mut state = self.state.write().expect("session state lock");
            state.user = Some(user);
            state.token = Some(token);
            state.status = SessionStatus::Confirmed;
            SessionRecord {
                user: state.user.clone(),
                token: state.token.clone(),
            }
        };
        self.storage.save(&record);
        info!("Session established");
    }

    /// Explicit sign-out. Clears the session and tells the user: a warning
    /// carrying `reason` when one is supplied, a neutral notice otherwise.
    /// Idempotent except for the notification, which is not deduplicated.
    pub fn sign_out(&self, reason: Option<&str>) {
        self.clear();
        match reason {
            Some(reason) => self.notifier.notify(NoticeKind::Warning, reason, None),
            None => self.notifier.notify(NoticeKind::Info, SIGNED_OUT_NOTICE, None),
        }
    }

    /// Silent teardown for routine credential expiry (the 401 path). Same
    /// transition and persistence as [`sign_out`](Self::sign_out), without
    /// the notification.
    pub fn expire(&self) {
        self.clear();
    }

    fn clear(&self) {
        {
            let mut state = self.state.write().expect("session state lock");
            state.user = None;
            state.token = None;
            state.status = SessionStatus::Anonymous;
        }
        self.storage.save(&SessionRecord::default());
        info!("Session cleared");
    }

    /// Bootstrap rehydration. Call exactly once per process, before any
    /// pipeline-wrapped request; re-entrant calls are outside the contract
    /// and not guarded.
    ///
    /// With no persisted token this settles to `Anonymous` without touching
    /// the network. With one, the restored credential is provisionally
    /// trusted while `identity` revalidates it; any revalidation failure
    /// funnels through [`sign_out`](Self::sign_out) with
    /// [`SESSION_EXPIRED_NOTICE`], so the session can never stay stuck in a
    /// loading observation.
    pub async fn initialize_auth(&self, identity: &dyn IdentityFetch) {
        let restored = self.storage.load().unwrap_or_default();
        let Some(token) = restored.token else {
            let mut state = self.state.write().expect("session state lock");
            state.status = SessionStatus::Anonymous;
            return;
        };

        {
            let mut state = self.state.write().expect("session state lock");
            state.user = restored.user;
            state.token = Some(token);
            state.status = SessionStatus::Provisional;
        }

        match identity.current_identity().await {
            Ok(user) => {
                let record = {
                    let mut state = self.state.write().expect("session state lock");
                    state.user = Some(user);
                    state.status = SessionStatus::Confirmed;
                    SessionRecord {
                        user: state.user.clone(),
                        token: state.token.clone(),
                    }
                };
                self.storage.save(&record);
                info!("Session revalidated");
            }
            Err(err) => {
                warn!("Session revalidation failed: {err}");
                self.sign_out(Some(SESSION_EXPIRED_NOTICE));
            }
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().expect("session state lock").user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().expect("session state lock").token.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().expect("session state lock").status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().expect("session state lock");
        SessionSnapshot {
            user: state.user.clone(),
            token: state.token.clone(),
            status: state.status,
        }
    }
}

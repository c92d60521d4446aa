use std::sync::Arc;

use log::info;

use crate::api::envelope::flatten_field_errors;
use crate::error::ApiFailure;
use crate::navigation::{Navigator, LOGIN_PATH};
use crate::notify::{NoticeKind, Notifier};
use crate::session::SessionStore;

const PERMISSION_DENIED_NOTICE: &str = "You do not have permission to perform this action";
const VALIDATION_FAILED_NOTICE: &str = "Validation failed";
const SERVER_FAULT_NOTICE: &str = "The server hit an unexpected problem, please try again later";

/// One inbound classifier: side effects only, keyed off the failure it
/// matches. Stages run in the order the pipeline holds them, on every
/// failure, before the failure is returned to the caller unchanged.
pub trait InboundStage: Send + Sync {
    fn resolve(&self, failure: &ApiFailure);
}

/// 401: silent session teardown plus a redirect to the login view unless the
/// application is already there. No notification on this path.
pub struct SessionExpiryStage {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionExpiryStage {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        SessionExpiryStage { session, navigator }
    }
}

impl InboundStage for SessionExpiryStage {
    fn resolve(&self, failure: &ApiFailure) {
        if !matches!(failure, ApiFailure::AuthorizationExpired { .. }) {
            return;
        }
        info!("Authorization expired, clearing session");
        self.session.expire();
        if self.navigator.current_location() != LOGIN_PATH {
            self.navigator.redirect_to_login();
        }
    }
}

/// 403: surface the server's message when it sent one.
pub struct PermissionStage {
    notifier: Arc<dyn Notifier>,
}

impl PermissionStage {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        PermissionStage { notifier }
    }
}

impl InboundStage for PermissionStage {
    fn resolve(&self, failure: &ApiFailure) {
        if let ApiFailure::PermissionDenied { message } = failure {
            let text = message.as_deref().unwrap_or(PERMISSION_DENIED_NOTICE);
            self.notifier.notify(NoticeKind::Error, text, None);
        }
    }
}

/// 422: flatten the field-error map into one delimited line so form views
/// can also consume the structured map from the failure itself.
pub struct ValidationStage {
    notifier: Arc<dyn Notifier>,
}

impl ValidationStage {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        ValidationStage { notifier }
    }
}

impl InboundStage for ValidationStage {
    fn resolve(&self, failure: &ApiFailure) {
        if let ApiFailure::ValidationFailed { field_errors, .. } = failure {
            let detail = flatten_field_errors(field_errors);
            self.notifier
                .notify(NoticeKind::Error, VALIDATION_FAILED_NOTICE, Some(&detail));
        }
    }
}

/// 5xx, after transient retries are exhausted.
pub struct ServerFaultStage {
    notifier: Arc<dyn Notifier>,
}

impl ServerFaultStage {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        ServerFaultStage { notifier }
    }
}

impl InboundStage for ServerFaultStage {
    fn resolve(&self, failure: &ApiFailure) {
        if let ApiFailure::ServerFault { message, .. } = failure {
            let text = message.as_deref().unwrap_or(SERVER_FAULT_NOTICE);
            self.notifier.notify(NoticeKind::Error, text, None);
        }
    }
}

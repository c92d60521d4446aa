use log::warn;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::session::SessionSnapshot;

/// One outbound transform: pure header augmentation from a session snapshot.
/// Stages run in the order the pipeline holds them and must never remove or
/// override a header the caller set.
pub trait OutboundStage: Send + Sync {
    fn apply(&self, headers: &mut HeaderMap, session: &SessionSnapshot);
}

/// Attaches `Authorization: Bearer <token>` when the session holds a token.
/// A caller-supplied Authorization header always wins.
pub struct BearerAuth;

impl OutboundStage for BearerAuth {
    fn apply(&self, headers: &mut HeaderMap, session: &SessionSnapshot) {
        if headers.contains_key(AUTHORIZATION) {
            return;
        }
        let Some(token) = session.token.as_deref() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(err) => warn!("Skipping malformed credential header: {err}"),
        }
    }
}

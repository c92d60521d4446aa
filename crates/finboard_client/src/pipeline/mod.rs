//! The request pipeline: an explicit, ordered middleware chain.
//!
//! Outbound stages are pure `(headers, session snapshot) -> headers`
//! transforms; inbound stages are side-effect-only classifiers over the
//! failure taxonomy. Both lists run deterministically, in order, with no
//! ambient interception registered anywhere else.
//!
//! Classification consults only a response's own status, never the current
//! session: an in-flight call settling after a logout is still resolved
//! normally, so callers that care about staleness must defend against it
//! themselves.

mod inbound;
mod outbound;

use std::sync::Arc;

use reqwest::header::HeaderMap;

use crate::error::ApiFailure;
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::session::{SessionSnapshot, SessionStore};

pub use inbound::{
    InboundStage, PermissionStage, ServerFaultStage, SessionExpiryStage, ValidationStage,
};
pub use outbound::{BearerAuth, OutboundStage};

pub struct Pipeline {
    outbound: Vec<Box<dyn OutboundStage>>,
    inbound: Vec<Box<dyn InboundStage>>,
}

impl Pipeline {
    /// Custom composition. Order is preserved exactly as given.
    pub fn new(outbound: Vec<Box<dyn OutboundStage>>, inbound: Vec<Box<dyn InboundStage>>) -> Self {
        Pipeline { outbound, inbound }
    }

    /// The stock dashboard pipeline: bearer credential on the way out;
    /// session expiry, permission, validation and server-fault handling on
    /// the way back in.
    pub fn standard(
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Pipeline::new(
            vec![Box::new(BearerAuth)],
            vec![
                Box::new(SessionExpiryStage::new(session, navigator)),
                Box::new(PermissionStage::new(notifier.clone())),
                Box::new(ValidationStage::new(notifier.clone())),
                Box::new(ServerFaultStage::new(notifier)),
            ],
        )
    }

    pub fn prepare(&self, headers: &mut HeaderMap, session: &SessionSnapshot) {
        for stage in &self.outbound {
            stage.apply(headers, session);
        }
    }

    pub fn resolve(&self, failure: &ApiFailure) {
        for stage in &self.inbound {
            stage.resolve(failure);
        }
    }
}

//! finboard_client - Session lifecycle and request pipeline for the
//! finboard dashboard.
//!
//! Two components compose the core, leaves first: the session store owns the
//! durable identity and is the single source of truth; the request pipeline
//! wraps every outbound call, attaching the credential on the way out and
//! classifying failures on the way back in. Visual components, routing and
//! notification rendering live in the embedding shell and are reached only
//! through the `Navigator` and `Notifier` traits.

pub mod api;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod pipeline;
pub mod session;

pub use api::client::ApiClient;
pub use api::envelope::{PageMeta, Paginated};
pub use api::request::ApiRequest;
pub use error::ApiFailure;
pub use finboard_core::Config;
pub use navigation::{Navigator, NoopNavigator, LOGIN_PATH};
pub use notify::{LogNotifier, NoticeKind, Notifier};
pub use session::{
    IdentityFetch, SessionSnapshot, SessionStatus, SessionStorage, SessionStore,
    SESSION_EXPIRED_NOTICE,
};

//! User-facing notification seam.
//!
//! The pipeline and the session store centralize all error-display policy;
//! the embedding shell decides how a notice is rendered by implementing
//! [`Notifier`].

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str, description: Option<&str>);
}

/// Routes notices to the log facade. The headless default for embeddings
/// without a UI shell.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str, description: Option<&str>) {
        let detail = description.unwrap_or_default();
        match kind {
            NoticeKind::Info => info!("{message} {detail}"),
            NoticeKind::Warning => warn!("{message} {detail}"),
            NoticeKind::Error => error!("{message} {detail}"),
        }
    }
}

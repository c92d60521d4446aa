//! Navigation seam consumed by the 401 classification stage.

/// Route of the login view. The session-expiry stage skips the redirect when
/// the application is already there.
pub const LOGIN_PATH: &str = "/login";

#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn current_location(&self) -> String;
    fn redirect_to_login(&self);
}

/// For headless embeddings with no router: reports the root location and
/// records redirect attempts in the log.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_location(&self) -> String {
        "/".to_string()
    }

    fn redirect_to_login(&self) {
        log::debug!("Redirect to {LOGIN_PATH} requested (no navigator attached)");
    }
}

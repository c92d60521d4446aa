use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::envelope::ErrorBody;

/// Failure taxonomy for pipeline-wrapped calls.
///
/// A failure is classified, never translated: the variant a caller receives
/// is the same value the inbound stages saw, so local handling composes with
/// the centralized side effects.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// 401. The pipeline has already torn the session down by the time the
    /// caller sees this.
    #[error("authorization expired")]
    AuthorizationExpired { message: Option<String> },

    /// 403.
    #[error("permission denied")]
    PermissionDenied { message: Option<String> },

    /// 422 carrying a field-level error map.
    #[error("validation failed")]
    ValidationFailed {
        message: Option<String>,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// Any 5xx, after transient retries are exhausted.
    #[error("server fault (status {status})")]
    ServerFault { status: u16, message: Option<String> },

    /// Every other non-2xx status, including a 422 without a field map.
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16, message: Option<String> },

    /// No usable response: connection faults, timeouts, malformed bodies.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest_middleware::Error),
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        ApiFailure::Transport(err.into())
    }
}

pub(crate) fn classify(status: StatusCode, body: ErrorBody) -> ApiFailure {
    if status == StatusCode::UNAUTHORIZED {
        ApiFailure::AuthorizationExpired {
            message: body.message,
        }
    } else if status == StatusCode::FORBIDDEN {
        ApiFailure::PermissionDenied {
            message: body.message,
        }
    } else if status == StatusCode::UNPROCESSABLE_ENTITY && !body.errors.is_empty() {
        ApiFailure::ValidationFailed {
            message: body.message,
            field_errors: body.errors,
        }
    } else if status.is_server_error() {
        ApiFailure::ServerFault {
            status: status.as_u16(),
            message: body.message,
        }
    } else {
        ApiFailure::UnexpectedStatus {
            status: status.as_u16(),
            message: body.message,
        }
    }
}

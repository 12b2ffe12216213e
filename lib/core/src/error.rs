use thiserror::Error;

/// Unified error type for the console.
///
/// Each variant corresponds to one failure class of the service
/// contract. Non-2xx responses carry `{"detail": "..."}`; when present,
/// the detail string becomes the user-visible message. Nothing here is
/// retried and nothing is fatal — callers surface the message and
/// return to their pre-action state.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or expired credentials. HTTP 401. Invalidates the session.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacks permission. HTTP 403.
    #[error("{0}")]
    PermissionDenied(String),

    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input rejected, client-side or by the service. HTTP 400/422.
    #[error("{0}")]
    Validation(String),

    /// Service fault. HTTP 5xx.
    #[error("{0}")]
    Server(String),

    /// No response received.
    #[error("{0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Map an HTTP status and response body to an error.
    ///
    /// The service's `detail` field wins over the generic message,
    /// except for 5xx where the detail is internal and a generic
    /// message is shown instead.
    pub fn from_status(status: u16, body: &serde_json::Value) -> Self {
        let detail = body
            .get("detail")
            .and_then(|d| d.as_str())
            .map(String::from);

        match status {
            401 => ApiError::Unauthorized(
                detail.unwrap_or_else(|| "session expired, please log in again".into()),
            ),
            403 => ApiError::PermissionDenied(
                detail.unwrap_or_else(|| "not allowed to perform this operation".into()),
            ),
            404 => ApiError::NotFound(detail.unwrap_or_else(|| "resource not found".into())),
            400 | 422 => {
                ApiError::Validation(detail.unwrap_or_else(|| "invalid request".into()))
            }
            500..=599 => ApiError::Server("server error, please try again later".into()),
            _ => ApiError::Server(
                detail.unwrap_or_else(|| format!("request failed ({})", status)),
            ),
        }
    }

    /// Whether this error invalidates the session (the 401 class).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

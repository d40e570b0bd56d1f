use serde::Serialize;
use thiserror::Error;

/// Error raised by the remote movie API: a message plus the HTTP status when
/// the server answered at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<u16>,
}

impl ApiError {
    pub const NETWORK_MESSAGE: &'static str =
        "Network error occurred. Please check your connection.";

    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }

    /// Transport failure: no response was received.
    pub fn network() -> Self {
        Self::new(Self::NETWORK_MESSAGE, None)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

/// Unified error type for the JSON API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(ApiError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Upstream(_) => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Upstream(_) => 502,
            Self::Internal(_) => 500,
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(e: ApiError) -> Self {
        if e.is_not_found() {
            Self::NotFound(e.message)
        } else {
            Self::Upstream(e)
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ServiceError> for ErrorEnvelope {
    fn from(e: &ServiceError) -> Self {
        let details = match e {
            ServiceError::Upstream(api) => match api.status_code {
                Some(status) => serde_json::json!({ "upstream_status": status }),
                None => serde_json::Value::Object(serde_json::Map::new()),
            },
            _ => serde_json::Value::Object(serde_json::Map::new()),
        };
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_api_error_maps_to_not_found() {
        let err = ServiceError::from(ApiError::new("Not found", Some(404)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn other_api_errors_map_to_upstream() {
        let err = ServiceError::from(ApiError::new("Invalid API key", Some(401)));
        assert_eq!(err.status_code(), 502);

        let envelope = ErrorEnvelope::from(&err);
        assert_eq!(envelope.error.code, "upstream_error");
        assert_eq!(envelope.error.message, "Invalid API key");
        assert_eq!(envelope.error.details["upstream_status"], 401);
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::network();
        assert_eq!(err.status_code, None);
        assert_eq!(err.to_string(), ApiError::NETWORK_MESSAGE);
    }
}

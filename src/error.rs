//! Unified client-side error model for backend API calls.
//! One enum covers every way a call can fail (transport, status, body shape,
//! credentials) so pages map outcomes into notices uniformly.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiError {
    /// Transport-level failure: DNS, refused connection, dropped socket.
    Network { message: String },
    /// Backend answered with a non-2xx status other than 401.
    Status { status: u16, message: String },
    /// Backend answered 401: the bearer credential was rejected.
    Auth { message: String },
    /// 2xx body that did not match the expected shape.
    Decode { message: String },
}

impl ApiError {
    pub fn network<S: Into<String>>(msg: S) -> Self { ApiError::Network { message: msg.into() } }
    pub fn status<S: Into<String>>(status: u16, msg: S) -> Self {
        if status == 401 { ApiError::Auth { message: msg.into() } }
        else { ApiError::Status { status, message: msg.into() } }
    }
    pub fn auth<S: Into<String>>(msg: S) -> Self { ApiError::Auth { message: msg.into() } }
    pub fn decode<S: Into<String>>(msg: S) -> Self { ApiError::Decode { message: msg.into() } }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message }
            | ApiError::Status { message, .. }
            | ApiError::Auth { message }
            | ApiError::Decode { message } => message.as_str(),
        }
    }

    /// HTTP status carried by the failure, if the backend answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Network { .. } | ApiError::Decode { .. } => None,
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Auth { .. } => Some(401),
        }
    }

    pub fn is_auth(&self) -> bool { matches!(self, ApiError::Auth { .. }) }

    /// True for a 404 read, which some pages treat as "not created yet"
    /// rather than a failure (e.g. a tender with no stored analysis).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network { message } => write!(f, "network error: {}", message),
            ApiError::Status { status, message } => write!(f, "http {}: {}", status, message),
            ApiError::Auth { message } => write!(f, "unauthorized: {}", message),
            ApiError::Decode { message } => write!(f, "decode error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Decode failures from .json() also surface here; classify them apart
        // from transport failures so pages can log the distinction.
        if err.is_decode() {
            ApiError::Decode { message: err.to_string() }
        } else {
            ApiError::Network { message: err.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_constructor_classifies_401_as_auth() {
        assert!(ApiError::status(401, "expired").is_auth());
        assert!(!ApiError::status(500, "boom").is_auth());
        assert_eq!(ApiError::status(500, "boom").http_status(), Some(500));
        assert_eq!(ApiError::status(401, "expired").http_status(), Some(401));
    }

    #[test]
    fn not_found_detection() {
        assert!(ApiError::status(404, "missing").is_not_found());
        assert!(!ApiError::status(410, "gone").is_not_found());
        assert!(!ApiError::network("down").is_not_found());
    }

    #[test]
    fn display_shapes() {
        assert_eq!(ApiError::network("refused").to_string(), "network error: refused");
        assert_eq!(ApiError::status(503, "busy").to_string(), "http 503: busy");
        assert_eq!(ApiError::auth("no").to_string(), "unauthorized: no");
    }

    #[test]
    fn network_has_no_status() {
        assert_eq!(ApiError::network("x").http_status(), None);
        assert_eq!(ApiError::decode("bad json").http_status(), None);
    }
}

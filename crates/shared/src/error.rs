use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INVALID_JSON_MESSAGE: &str = "The server's response was invalid json";

/// Application level status codes carried in API error bodies. These do not
/// match HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum StatusCode {
    /// Produced locally when the error body itself could not be decoded.
    JsonDecodeError,
    Unauthenticated,
    InternalServerError,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        match self {
            Self::JsonDecodeError => -1,
            Self::Unauthenticated => 1000,
            Self::InternalServerError => 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown api status code {0}")]
pub struct UnknownStatusCode(pub i32);

impl TryFrom<i32> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::JsonDecodeError),
            1000 => Ok(Self::Unauthenticated),
            2000 => Ok(Self::InternalServerError),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

impl From<StatusCode> for i32 {
    fn from(value: StatusCode) -> Self {
        value.code()
    }
}

/// The outer error body the API returns. Most of the time the frontend cannot
/// deal with it beyond showing the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status_code == StatusCode::Unauthenticated
    }
}

/// Decodes an error response body, falling back to a
/// [`StatusCode::JsonDecodeError`] when the body is not a valid [`ApiError`].
pub fn parse_error(body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(err) => err,
        Err(err) => {
            tracing::error!(
                error = %err,
                body = %String::from_utf8_lossy(body),
                "got invalid json in api error response"
            );
            ApiError::new(StatusCode::JsonDecodeError, INVALID_JSON_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unauthenticated_body() {
        let err = parse_error(br#"{"status_code":1000,"message":"Unauthenticated"}"#);
        assert_eq!(err.status_code, StatusCode::Unauthenticated);
        assert_eq!(err.message, "Unauthenticated");
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn falls_back_on_garbage_body() {
        let err = parse_error(b"<html>502 Bad Gateway</html>");
        assert_eq!(err.status_code, StatusCode::JsonDecodeError);
        assert_eq!(err.message, INVALID_JSON_MESSAGE);
    }

    #[test]
    fn falls_back_on_unknown_status_code() {
        let err = parse_error(br#"{"status_code":4242,"message":"teapot"}"#);
        assert_eq!(err.status_code, StatusCode::JsonDecodeError);
    }

    #[test]
    fn status_codes_serialize_as_integers() {
        let body = serde_json::to_string(&ApiError::new(
            StatusCode::InternalServerError,
            "Internal server error occurred",
        ))
        .expect("serialize");
        assert_eq!(
            body,
            r#"{"status_code":2000,"message":"Internal server error occurred"}"#
        );
        assert_eq!(StatusCode::JsonDecodeError.code(), -1);
    }
}

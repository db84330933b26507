use shared::error::ApiError;
use thiserror::Error;

/// What flows through the [`ErrorStore`](crate::error_store::ErrorStore) to
/// the error boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportedError {
    /// Sentinel that sends the user back to the login screen.
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("{0}")]
    Message(String),
}

impl ReportedError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

impl From<ApiError> for ReportedError {
    fn from(value: ApiError) -> Self {
        if value.is_unauthenticated() {
            Self::Unauthenticated
        } else {
            Self::Message(value.message)
        }
    }
}

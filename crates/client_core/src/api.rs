//! Translation of transport failures into reported errors.
//!
//! Every request future goes through [`handle_error`], which turns a failure
//! into an [`Outcome::Err`] for the caller and reports it to the error store
//! so the boundary can react (login screen or crash screen).

use std::future::Future;

use shared::{error::parse_error, outcome::Outcome};
use thiserror::Error;
use tracing::error;

use crate::{error::ReportedError, error_store::ErrorStore};

pub const SCHEMA_MISMATCH_MESSAGE: &str = "The server's response didn't match the spec";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status and an error body.
    #[error("server responded with http status {status}")]
    Response { status: u16, body: Vec<u8> },
    /// A required field was missing from an otherwise successful response.
    #[error("response did not match the api schema: {0}")]
    Required(String),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

pub fn translate_transport_error(err: TransportError) -> ReportedError {
    match err {
        TransportError::Response { status, body } => {
            let api_error = parse_error(&body);
            tracing::debug!(status, status_code = ?api_error.status_code, "api error response");
            ReportedError::from(api_error)
        }
        TransportError::Required(detail) => {
            error!(%detail, "api response did not match the schema");
            ReportedError::message(SCHEMA_MISMATCH_MESSAGE)
        }
        TransportError::Unknown(err) => {
            error!(error = %err, "unknown error occurred");
            ReportedError::message(UNKNOWN_ERROR_MESSAGE)
        }
    }
}

/// Awaits `request`; a failure is reported to `errors` and returned as `Err`.
pub async fn handle_error<T, F>(
    errors: &ErrorStore<ReportedError>,
    request: F,
) -> Outcome<T, ReportedError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match request.await {
        Ok(value) => Outcome::Ok(value),
        Err(err) => {
            let reported = translate_transport_error(err);
            errors.report(reported.clone());
            Outcome::Err(reported)
        }
    }
}

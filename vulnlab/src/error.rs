//! Bank error taxonomy, rendered as `{ok:false, error}` JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::respond::PrettyJson;

/// Everything the bank can refuse a request for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    /// Request carried no cookie mapping to a live session.
    #[error("Not logged in")]
    NotLoggedIn,
    /// Missing recipient, or amount that is not a finite positive number.
    #[error("Invalid transfer")]
    InvalidTransfer,
    /// Supplied CSRF token did not match the session's token.
    #[error("CSRF blocked")]
    CsrfBlocked,
}

impl BankError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
            Self::InvalidTransfer => StatusCode::BAD_REQUEST,
            Self::CsrfBlocked => StatusCode::FORBIDDEN,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for BankError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
        };
        (self.status(), PrettyJson(body)).into_response()
    }
}

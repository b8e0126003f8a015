//! Error types.
//!
//! [`ApiError`] is what a stage or handler answers with; it converts straight
//! into a [`Response`]. [`Error`] covers infrastructure failures only: binding
//! the listener, accepting connections.

use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The error type returned by [`Server::serve`](crate::Server::serve).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-scoped failures. None of them outlive the request that caused it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No record with this id. Carries the id as the client sent it.
    #[error("There is no user with id: {0}")]
    NotFound(String),

    /// Credential missing or wrong.
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but not with the required role.
    #[error("Forbidden")]
    Forbidden,

    /// The request body did not decode into the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::Unauthorized => Status::Unauthorized,
            Self::Forbidden => Status::Forbidden,
            Self::InvalidBody(_) => Status::BadRequest,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidBody(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Response::builder().status(self.status()).text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let res = ApiError::NotFound("99".into()).into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), b"There is no user with id: 99");
    }

    #[test]
    fn auth_failures_carry_only_the_status_phrase() {
        assert_eq!(ApiError::Unauthorized.into_response().body(), b"Unauthorized");
        assert_eq!(ApiError::Forbidden.into_response().status_code(), 403);
    }
}

//! Bearer-token authentication and role authorization.

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Stage;
use crate::error::ApiError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Privilege level carried by a [`Principal`] and by user records.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User  => "user",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role `{0}` (expected `admin` or `user`)")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user"  => Ok(Self::User),
            other   => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity attached to a request.
///
/// Only [`Authenticate`] inserts one; later stages and handlers read it with
/// `req.extensions().get::<Principal>()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Principal {
    pub id: u64,
    pub username: String,
    pub role: Role,
}

/// Credentials accepted by [`Authenticate`].
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Request header holding `Bearer <token>`.
    pub header: String,
    /// The shared secret.
    pub token: String,
    /// Identity attached when the token matches.
    pub principal: Principal,
}

impl AuthConfig {
    /// Accepts `token` in the `authenticate` header and attaches an admin
    /// principal named `authenticatedUser`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            header: "authenticate".to_owned(),
            token: token.into(),
            principal: Principal {
                id: 1,
                username: "authenticatedUser".to_owned(),
                role: Role::Admin,
            },
        }
    }

    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header = name.into();
        self
    }

    pub fn principal(mut self, principal: Principal) -> Self {
        self.principal = principal;
        self
    }
}

/// Halts with `401 Unauthorized` unless the configured header is exactly
/// `Bearer <token>`.
pub struct Authenticate {
    header: String,
    expected: String,
    principal: Principal,
}

impl Authenticate {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            header: config.header.to_ascii_lowercase(),
            expected: format!("Bearer {}", config.token),
            principal: config.principal,
        }
    }
}

impl Stage for Authenticate {
    fn intercept(&self, req: &mut Request) -> ControlFlow<Response> {
        let credential = match req.header(&self.header) {
            Some(value) if value == self.expected => None,
            Some(_) => Some("invalid"),
            None => Some("missing"),
        };

        match credential {
            None => {
                debug!(user = %self.principal.username, role = %self.principal.role, "authenticated");
                req.extensions_mut().insert(self.principal.clone());
                ControlFlow::Continue(())
            }
            Some(problem) => {
                warn!(path = %req.path(), credential = problem, "rejecting unauthenticated request");
                ControlFlow::Break(ApiError::Unauthorized.into_response())
            }
        }
    }
}

/// Halts with `403 Forbidden` unless the request carries a [`Principal`]
/// with the required role. A request that never passed [`Authenticate`] has
/// no principal and is refused.
pub struct Authorize {
    role: Role,
}

impl Authorize {
    pub fn role(role: Role) -> Self {
        Self { role }
    }
}

impl Stage for Authorize {
    fn intercept(&self, req: &mut Request) -> ControlFlow<Response> {
        match req.extensions().get::<Principal>() {
            Some(p) if p.role == self.role => ControlFlow::Continue(()),
            other => {
                let actual = other.map(|p| p.role.as_str()).unwrap_or("none");
                warn!(path = %req.path(), required = %self.role, actual, "rejecting request without required role");
                ControlFlow::Break(ApiError::Forbidden.into_response())
            }
        }
    }
}

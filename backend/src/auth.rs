//! Caller identity, as supplied by the upstream authentication layer.
//!
//! Passwords and tokens are checked before requests reach this server; the
//! authenticated identity arrives as two headers. Handlers take a `Caller`
//! argument, so a request without identity is rejected before its body is read.

use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: String,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Fails with `Forbidden` unless the caller holds the admin role.
    pub fn require_admin(&self, message: &str) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(message.to_string()))
        }
    }
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRequest for Caller {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let caller = match (
            header_value(req, USER_ID_HEADER),
            header_value(req, USER_ROLE_HEADER),
        ) {
            (Some(user_id), Some(role)) => Ok(Caller { user_id, role }),
            _ => Err(ApiError::Unauthorized),
        };
        ready(caller)
    }
}

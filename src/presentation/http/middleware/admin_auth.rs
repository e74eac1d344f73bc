// src/presentation/http/middleware/admin_auth.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::error::HttpError;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// The bearer token admin callers must present. Only its SHA-256 digest is
/// kept. Without a configured token every admin request is refused.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    token_digest: Option<Vec<u8>>,
}

fn digest(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}

impl AdminCredentials {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token_digest: token.map(str::trim).filter(|t| !t.is_empty()).map(digest),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token_digest.is_some()
    }

    /// Compares SHA-256 digests in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        match &self.token_digest {
            Some(expected) => digest(presented).as_slice().ct_eq(expected.as_slice()).into(),
            None => false,
        }
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// 401 without a bearer token, 403 with the wrong one.
pub async fn require_admin_token(
    State(credentials): State<Arc<AdminCredentials>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(header) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return HttpError::from_error(ApplicationError::unauthorized(
            "missing Authorization header",
        ))
        .into_response();
    };

    if !credentials.verify(header.token()) {
        tracing::warn!(path = %req.uri().path(), "admin token rejected");
        return HttpError::from_error(ApplicationError::forbidden("invalid admin token"))
            .into_response();
    }

    next.run(req).await
}

//! HTTP Basic authentication for the guarded routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use sha2::{Digest, Sha256};

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthGuard {
    Enforced {
        username: String,
        password: String,
        realm: String
    },
    Disabled
}

impl AuthGuard {
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.enabled {
            AuthGuard::Enforced {
                username: config.username.clone(),
                password: config.password.clone(),
                realm: config.realm.clone()
            }
        } else {
            AuthGuard::Disabled
        }
    }

    pub fn is_enforced(&self) -> bool {
        matches!(self, AuthGuard::Enforced { .. })
    }

    /// `credentials` is `None` when the header is absent or not valid Basic.
    pub fn check(&self, credentials: Option<&Basic>) -> Result<(), ApiError> {
        match self {
            AuthGuard::Disabled => Ok(()),
            AuthGuard::Enforced {
                username,
                password,
                realm
            } => match credentials {
                Some(basic)
                    if secrets_match(basic.username(), username)
                        & secrets_match(basic.password(), password) =>
                {
                    Ok(())
                }
                _ => Err(ApiError::Unauthorized {
                    realm: realm.clone()
                })
            }
        }
    }
}

/// Compares SHA-256 digests byte by byte without short-circuiting, so the
/// time taken does not depend on where the inputs first differ.
fn secrets_match(given: &str, expected: &str) -> bool {
    let given = Sha256::digest(given.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    given
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next
) -> Result<Response, ApiError> {
    let credentials = request
        .headers()
        .typed_get::<Authorization<Basic>>()
        .map(|Authorization(basic)| basic);

    state.auth.check(credentials.as_ref())?;

    Ok(next.run(request).await)
}

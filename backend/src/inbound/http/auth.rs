//! Bearer credential extraction.
//!
//! Owner-restricted handlers take an [`AuthenticatedUser`] argument. The
//! extractor reads `Authorization: Bearer <token>`, then asks the identity
//! port to verify it and reload the user. A missing or unusable credential is
//! always `401`, never `403`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, User};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// The user behind a verified bearer credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// Borrow the authenticated user.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Consume the extractor, returning the user.
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Pull the raw token out of an `Authorization` header value.
pub(crate) fn bearer_token(header: Option<&str>) -> Result<&str, Error> {
    let header = header.ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized("unsupported authorization scheme"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let header = match header {
                Some(Ok(value)) => Some(value),
                Some(Err(_)) => {
                    return Err(Error::unauthorized("malformed authorization header"));
                }
                None => None,
            };
            let token = bearer_token(header.as_deref()).inspect_err(|err| {
                debug!(reason = err.message(), "bearer credential rejected");
            })?;
            let user = state.identity.authenticate(token).await?;
            Ok(Self(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer abc", "abc")]
    #[case("  BEARER   abc  ", "abc")]
    fn accepts_bearer_headers(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(bearer_token(Some(header)).expect("token"), expected);
    }

    #[rstest]
    #[case(None, "missing bearer token")]
    #[case(Some("Bearer"), "malformed authorization header")]
    #[case(Some("Bearer    "), "malformed authorization header")]
    #[case(Some("Basic dXNlcjpwYXNz"), "unsupported authorization scheme")]
    fn rejects_other_headers(#[case] header: Option<&str>, #[case] message: &str) {
        let err = bearer_token(header).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), message);
    }
}

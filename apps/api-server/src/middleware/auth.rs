//! Caller identity extraction.
//!
//! Tokens are issued elsewhere; this module only verifies them. A request
//! without a valid token is still served, just anonymously. Routes that need
//! a caller check for one with the guards in `crate::guards`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use blog_core::domain::Author;
use blog_core::ports::{AuthError, TokenClaims};

use crate::state::AppState;

/// Cookie the front end stores the access token in.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl Identity {
    /// The caller as recorded on posts they write.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Read the raw token from `Authorization: Bearer` or the access token cookie.
fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        return auth_str
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()));
    }

    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AuthError::MissingAuth)
}

fn verify(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let token = bearer_token(req)?;
    state.tokens.validate_token(&token).map(Identity::from)
}

/// Identity extractor that never fails: `None` when the caller is anonymous
/// or presented a token that does not verify.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match verify(req) {
            Ok(identity) => ready(Ok(OptionalIdentity(Some(identity)))),
            Err(AuthError::MissingAuth) => ready(Ok(OptionalIdentity(None))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unverifiable access token");
                ready(Ok(OptionalIdentity(None)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    use crate::state::tests::test_state;

    async fn extract(req: TestRequest, state: AppState) -> Option<Identity> {
        let (req, mut payload) = req.app_data(web::Data::new(state)).to_http_parts();
        OptionalIdentity::from_request(&req, &mut payload)
            .await
            .unwrap()
            .0
    }

    #[actix_web::test]
    async fn test_bearer_header() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let token = state.tokens.generate_token(user_id, "alice").unwrap();

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        let identity = extract(req, state).await.unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.username, "alice");
    }

    #[actix_web::test]
    async fn test_cookie_fallback() {
        let state = test_state();
        let token = state.tokens.generate_token(Uuid::new_v4(), "bob").unwrap();

        let req = TestRequest::default().cookie(Cookie::new(ACCESS_TOKEN_COOKIE, token));
        let identity = extract(req, state).await.unwrap();

        assert_eq!(identity.username, "bob");
    }

    #[actix_web::test]
    async fn test_bad_or_missing_token_is_anonymous() {
        assert!(extract(TestRequest::default(), test_state()).await.is_none());

        let req =
            TestRequest::default().insert_header((header::AUTHORIZATION, "Bearer not-a-token"));
        assert!(extract(req, test_state()).await.is_none());

        let req = TestRequest::default().insert_header((header::AUTHORIZATION, "Basic abc"));
        assert!(extract(req, test_state()).await.is_none());
    }
}

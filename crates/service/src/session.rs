//! Caller identity resolution.
//!
//! Sessions are issued elsewhere as HS256 JWTs carrying the user id in `uid`.
//! The token is read from `Authorization: Bearer <token>` or, failing that,
//! from the `auth_token` cookie.

use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{CallerIdentity, UserId};
use crate::errors::ServiceError;

pub const AUTH_COOKIE: &str = "auth_token";

pub trait SessionResolver: Send + Sync {
    /// `None` means the request carries no usable session.
    fn resolve(&self, headers: &HeaderMap) -> Option<CallerIdentity>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    uid: String,
    exp: usize,
}

#[derive(Clone)]
pub struct JwtSessionResolver {
    secret: String,
}

impl JwtSessionResolver {
    pub fn new(secret: impl Into<String>) -> Self { Self { secret: secret.into() } }

    /// Mint a token for `user_id` valid for `ttl`. Used by tooling and tests;
    /// production tokens come from the users service with the same secret.
    pub fn issue(&self, user_id: UserId, ttl: chrono::Duration) -> Result<String, ServiceError> {
        let exp = (chrono::Utc::now() + ttl).timestamp().max(0) as usize;
        let claims = Claims { sub: None, uid: user_id.to_string(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| ServiceError::Internal(format!("token error: {e}")))
    }

    fn verify(&self, token: &str) -> Option<CallerIdentity> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => match data.claims.uid.parse::<UserId>() {
                Ok(user_id) => Some(CallerIdentity::new(user_id)),
                Err(_) => {
                    warn!(uid = %data.claims.uid, "session uid is not a user id");
                    None
                }
            },
            Err(e) => {
                warn!(err = %e, "session token rejected");
                None
            }
        }
    }
}

/// Bearer token if present, else the `auth_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|authz| authz.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }
    let cookie_header = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    cookie_header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("auth_token="))
        .map(|t| t.to_string())
        .find(|t| !t.is_empty())
}

impl SessionResolver for JwtSessionResolver {
    fn resolve(&self, headers: &HeaderMap) -> Option<CallerIdentity> {
        let token = extract_token(headers)?;
        self.verify(&token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(name, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn bearer_token_resolves_caller() {
        let resolver = JwtSessionResolver::new("test-secret");
        let token = resolver.issue(3, chrono::Duration::hours(1)).unwrap();
        let h = headers_with(header::AUTHORIZATION, &format!("Bearer {token}"));
        assert_eq!(resolver.resolve(&h), Some(CallerIdentity::new(3)));
    }

    #[test]
    fn cookie_is_fallback() {
        let resolver = JwtSessionResolver::new("test-secret");
        let token = resolver.issue(5, chrono::Duration::hours(1)).unwrap();
        let h = headers_with(header::COOKIE, &format!("theme=dark; {AUTH_COOKIE}={token}"));
        assert_eq!(resolver.resolve(&h), Some(CallerIdentity::new(5)));
    }

    #[test]
    fn missing_foreign_or_expired_tokens_resolve_to_none() {
        let resolver = JwtSessionResolver::new("test-secret");
        assert_eq!(resolver.resolve(&HeaderMap::new()), None);

        let other = JwtSessionResolver::new("other-secret").issue(3, chrono::Duration::hours(1)).unwrap();
        let h = headers_with(header::AUTHORIZATION, &format!("Bearer {other}"));
        assert_eq!(resolver.resolve(&h), None);

        let expired = resolver.issue(3, chrono::Duration::hours(-2)).unwrap();
        let h = headers_with(header::AUTHORIZATION, &format!("Bearer {expired}"));
        assert_eq!(resolver.resolve(&h), None);

        let h = headers_with(header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        assert_eq!(resolver.resolve(&h), None);
    }

    #[test]
    fn non_bearer_authorization_falls_back_to_cookie() {
        let resolver = JwtSessionResolver::new("test-secret");
        let token = resolver.issue(7, chrono::Duration::hours(1)).unwrap();
        let mut h = headers_with(header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        h.insert(header::COOKIE, HeaderValue::from_str(&format!("{AUTH_COOKIE}={token}")).unwrap());
        assert_eq!(resolver.resolve(&h), Some(CallerIdentity::new(7)));
    }
}

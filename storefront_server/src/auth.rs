//! JWT access token handling.
//!
//! Access tokens are HS256-signed JWTs carried in the `Authorization: Bearer` header. The token identifies the
//! consumer (`sub`), carries a display snapshot (`name`, `email`) and the roles granted to the caller. Tokens are
//! verified by the ACL middleware on every protected route; handlers receive the validated claims through the
//! [`JwtClaims`] extractor and never see the raw token.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storefront_engine::db_types::Roles;

use crate::{config::AuthConfig, errors::AuthError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The consumer id.
    pub sub: i64,
    pub name: String,
    pub email: String,
    pub roles: Roles,
    /// Expiry as a unix timestamp. Set by the issuer; validated on every request.
    pub exp: i64,
}

/// Extracts validated claims from the request extensions, where the ACL middleware put them.
impl FromRequest for JwtClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| crate::errors::ServerError::AuthenticationError(AuthError::MissingToken).into());
        ready(claims)
    }
}

/// Pulls the bearer token out of the `Authorization` header and verifies it.
pub fn validate_bearer_token(req: &HttpRequest, config: &AuthConfig) -> Result<JwtClaims, AuthError> {
    let header = req.headers().get("Authorization").ok_or(AuthError::MissingToken)?;
    let value = header
        .to_str()
        .map_err(|e| AuthError::PoorlyFormattedToken(format!("Authorization header is not valid UTF-8. {e}")))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::PoorlyFormattedToken("Expected a Bearer token.".to_string()))?;
    decode_token(token, config)
}

pub fn decode_token(token: &str, config: &AuthConfig) -> Result<JwtClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    let data =
        decode::<JwtClaims>(token, &key, &validation).map_err(|e| AuthError::ValidationError(e.to_string()))?;
    Ok(data.claims)
}

pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { key }
    }

    /// Issues a signed access token. The expiry in `claims` is overwritten with `now + duration`.
    pub fn issue_token(&self, mut claims: JwtClaims, duration: Option<Duration>) -> Result<String, AuthError> {
        let duration = duration.unwrap_or_else(|| Duration::hours(24));
        claims.exp = (Utc::now() + duration).timestamp();
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::ValidationError(format!("{e}")))
    }
}

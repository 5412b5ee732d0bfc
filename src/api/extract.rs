//! Authenticated-user extractor.

use crate::api::{error::ApiError, state::ApiState, token::Claims};
use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

/// A request's verified session, pulled from the `auth_token` cookie or an
/// `Authorization: Bearer` header. Handlers taking this parameter only run
/// for authenticated requests.
pub struct AuthUser {
    /// Platform user id from the verified token
    pub user_id: String,
    /// Full token claims
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<ApiState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get("auth_token")
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(ToString::to_string)
            })
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let claims = state
            .signer
            .verify(&token)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(Self {
            user_id: claims.user_id.clone(),
            claims,
        })
    }
}

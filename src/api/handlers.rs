//! Auth API route handlers.

use crate::api::{codes::CodeCheck, error::ApiError, extract::AuthUser, state::ApiState};
use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use poise::serenity_prelude as serenity;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;
use serde_json::{Value, json};
use std::num::NonZeroU64;
use std::time::Instant;
use tracing::warn;

/// Name of the session cookie.
const SESSION_COOKIE: &str = "auth_token";

fn parse_user_id(raw: &str) -> Result<serenity::UserId, ApiError> {
    raw.parse::<NonZeroU64>()
        .map(|id| serenity::UserId::new(id.get()))
        .map_err(|_| ApiError::not_found("User not found"))
}

/// Body of `POST /generate-code`.
#[derive(Debug, Deserialize)]
pub struct GenerateCodeRequest {
    /// Platform user id to send the code to
    pub user_id: String,
}

/// `POST /generate-code` - DMs the user a fresh one-time login code.
pub async fn generate_code(
    State(state): State<ApiState>,
    Json(request): Json<GenerateCodeRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = parse_user_id(&request.user_id)?;
    let user = state
        .http
        .get_user(user_id)
        .await
        .map_err(|_| ApiError::not_found("User not found"))?;

    let code = {
        let mut rng = StdRng::from_entropy();
        state.codes.issue(&mut rng, &request.user_id, Instant::now())
    };

    let dm = user.create_dm_channel(&state.http).await.map_err(|e| {
        warn!("Failed to open DM channel for {}: {e}", request.user_id);
        ApiError::internal("Failed to deliver verification code")
    })?;
    dm.say(
        &state.http,
        format!("🔐 Your coinlog login code is **{code}**. It expires in 10 minutes."),
    )
    .await
    .map_err(|e| {
        warn!("Failed to DM verification code to {}: {e}", request.user_id);
        ApiError::internal("Failed to deliver verification code")
    })?;

    Ok(Json(json!({ "message": "Verification code sent via DM" })))
}

/// Body of `POST /verify-code`.
#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    /// Platform user id the code was issued to
    pub user_id: String,
    /// The six-digit code from the DM
    pub code: String,
}

/// `POST /verify-code` - exchanges a valid code for a session cookie.
pub async fn verify_code(
    State(state): State<ApiState>,
    jar: CookieJar,
    Json(request): Json<VerifyCodeRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let code_hash = match state
        .codes
        .verify(&request.user_id, &request.code, Instant::now())
    {
        CodeCheck::Missing => {
            return Err(ApiError::not_found("No pending verification code"));
        }
        CodeCheck::Mismatch => {
            return Err(ApiError::unauthorized("Incorrect verification code"));
        }
        CodeCheck::Valid { code_hash } => code_hash,
    };

    let (token, claims) = state.signer.issue(&request.user_id, &code_hash)?;
    let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
        .map_or_else(String::new, |t| t.to_rfc3339());

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(time::Duration::days(7))
        .build();

    Ok((
        jar.add(cookie),
        Json(json!({
            "user_id": request.user_id,
            "created_at": claims.created_at,
            "expires_at": expires_at,
        })),
    ))
}

/// `GET /auth/verify` - reports whether the request carries a valid session.
pub async fn auth_verify(user: AuthUser) -> Json<Value> {
    Json(json!({ "user_id": user.user_id, "authenticated": true }))
}

/// `POST /auth/logout` - clears the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Json(json!({ "message": "Logged out" })))
}

/// `GET /me/info` - profile of the authenticated user.
pub async fn me_info(
    State(state): State<ApiState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let user_id = parse_user_id(&user.user_id)?;
    let profile = state
        .http
        .get_user(user_id)
        .await
        .map_err(|_| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "user_id": user.user_id,
        "username": profile.name,
        "avatar_url": profile.avatar_url(),
    })))
}

/// `GET /me/servers` - servers shared between the user and the bot.
pub async fn me_servers(
    State(state): State<ApiState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let user_id = parse_user_id(&user.user_id)?;

    // Snapshot names and icons first; cache references must not be held
    // across the membership lookups below.
    let known: Vec<(serenity::GuildId, String, Option<String>)> = state
        .cache
        .guilds()
        .into_iter()
        .filter_map(|guild_id| {
            state
                .cache
                .guild(guild_id)
                .map(|guild| (guild_id, guild.name.clone(), guild.icon_url()))
        })
        .collect();

    let mut servers = Vec::new();
    for (guild_id, name, icon_url) in known {
        if state.http.get_member(guild_id, user_id).await.is_ok() {
            servers.push(json!({
                "server_id": guild_id.to_string(),
                "server_name": name,
                "avatar_url": icon_url,
            }));
        }
    }

    Ok(Json(json!({ "servers": servers })))
}

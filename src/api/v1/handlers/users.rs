/*
 * Responsibility
 * - /user 系 handler (signup / signin / logout / verify)
 * - 入力形式は schema gate で検証済み。ここでは存在確認と副作用のみ
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use url::Url;

use crate::{
    api::v1::{
        dto::users::{AuthResponse, SignInRequest, SignUpRequest, UserResponse},
        extractors::{CurrentCredential, ValidJson},
    },
    error::{AppError, Envelope},
    messages,
    repos::user_repo::{NewUser, UserRow},
    services::auth::{Role, TokenPurpose, password},
    state::AppState,
};

pub async fn sign_up(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SignUpRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthResponse>>), AppError> {
    let email = normalize_email(&req.email);
    let phone_no = req
        .phone_no
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(messages::EMAIL_EXISTS));
    }
    if let Some(phone_no) = phone_no.as_deref()
        && state.users.phone_exists(phone_no).await?
    {
        return Err(AppError::Conflict(messages::PHONE_EXISTS));
    }

    let password_hash = password::hash(req.password).await?;
    let user = state
        .users
        .create(NewUser {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email,
            phone_no,
            password_hash,
            role: Role::DEFAULT,
        })
        .await?;

    send_verification(&state, &user).await?;

    let access = state
        .tokens
        .issue(user.id, &user.email, &user.role, TokenPurpose::Access)?;
    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(AuthResponse {
            user: user.into(),
            token: access.token,
        })),
    ))
}

pub async fn sign_in(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SignInRequest>,
) -> Result<Json<Envelope<AuthResponse>>, AppError> {
    let user = state
        .users
        .find_by_email(&normalize_email(&req.email))
        .await?
        .ok_or(AppError::NotFound(messages::USER_NOT_FOUND))?;

    if !password::verify(req.password, user.password_hash.clone()).await? {
        tracing::info!(user_id = %user.id, "sign in with wrong password");
        return Err(AppError::Unauthorized(messages::INCORRECT_PASSWORD));
    }

    let access = state
        .tokens
        .issue(user.id, &user.email, &user.role, TokenPurpose::Access)?;

    Ok(Json(Envelope::success(AuthResponse {
        user: UserResponse::from(user),
        token: access.token,
    })))
}

/// Revokes the presented credential until it would have expired anyway.
pub async fn logout(
    State(state): State<AppState>,
    CurrentCredential(credential): CurrentCredential,
) -> Result<Json<Envelope<&'static str>>, AppError> {
    // expired / forged token: nothing left to revoke
    let verified = state
        .tokens
        .verify(credential.as_str(), TokenPurpose::Access)
        .map_err(|err| {
            tracing::debug!(error = %err, "logout with unusable token");
            AppError::Unauthorized(messages::INVALID_TOKEN)
        })?;

    let ttl_secs = revocation_ttl(
        verified.expires_at,
        chrono::Utc::now().timestamp(),
        state.tokens.leeway_seconds(),
    );

    state.blacklist.revoke(credential.as_str(), ttl_secs).await?;
    tracing::info!(user_id = %verified.user_id, ttl_secs, "credential revoked");

    Ok(Json(Envelope::success(messages::LOGGED_OUT)))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Envelope<&'static str>>, AppError> {
    let verified = state
        .tokens
        .verify(&token, TokenPurpose::Verify)
        .map_err(|err| {
            tracing::debug!(error = %err, "verification token rejected");
            AppError::Forbidden(messages::INVALID_TOKEN)
        })?;

    if !state.users.mark_verified(verified.user_id).await? {
        return Err(AppError::NotFound(messages::USER_NOT_FOUND_ID));
    }

    Ok(Json(Envelope::success(messages::EMAIL_VERIFIED)))
}

// verify() accepts the token until exp + leeway, so the entry must outlive that
fn revocation_ttl(expires_at: i64, now: i64, leeway_seconds: u64) -> u64 {
    let remaining = u64::try_from(expires_at - now).unwrap_or(0);
    remaining.saturating_add(leeway_seconds).max(1)
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// メール送信失敗は signup 自体を失敗させない (ログのみ)
async fn send_verification(state: &AppState, user: &UserRow) -> Result<(), AppError> {
    let token = state
        .tokens
        .issue(user.id, &user.email, &user.role, TokenPurpose::Verify)?;
    let link = verification_link(&state.public_base_url, &token.token)?;

    if let Err(err) = state.mailer.send_verification(&user.email, &link).await {
        tracing::warn!(user_id = %user.id, error = %err, "verification email not sent");
    }
    Ok(())
}

fn verification_link(base: &Url, token: &str) -> Result<Url, AppError> {
    base.join(&format!("api/v1/user/verify/{token}"))
        .map_err(|err| {
            tracing::error!(error = %err, "could not build verification link");
            AppError::Internal
        })
}

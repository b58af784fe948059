//! Bearer token gate: `Authorization: Bearer <jwt>` を検証 → Identity / Credential を extensions に入れる

use axum::http::{HeaderMap, header};

use crate::api::v1::extractors::{Credential, Identity};
use crate::error::AppError;
use crate::messages;
use crate::middleware::pipeline::{Gate, RequestCtx};
use crate::services::auth::TokenPurpose;
use crate::state::AppState;

pub fn check_token() -> Gate {
    Gate::CheckToken
}

/// Bearer credential from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub(crate) fn check(state: &AppState, ctx: &mut RequestCtx) -> Result<(), AppError> {
    let token = bearer_token(ctx.headers())
        .ok_or(AppError::Unauthorized(messages::NO_TOKEN))?
        .to_string();

    let verified = match state.tokens.verify(&token, TokenPurpose::Access) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::Unauthorized(messages::INVALID_TOKEN));
        }
    };

    // gate → 後続 gate / extractor への受け渡し
    ctx.extensions_mut().insert(Identity::from(verified));
    ctx.extensions_mut().insert(Credential::new(token));

    Ok(())
}

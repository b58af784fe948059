//! Revocation gate.
//!
//! Runs before any role or schema check so a revoked credential learns
//! nothing about the route beyond "blacklisted".

use crate::api::v1::extractors::Credential;
use crate::error::AppError;
use crate::messages;
use crate::middleware::auth::token::bearer_token;
use crate::middleware::pipeline::{Gate, RequestCtx};
use crate::state::AppState;

pub fn check_blacklist() -> Gate {
    Gate::CheckBlacklist
}

pub(crate) async fn check(state: &AppState, ctx: &mut RequestCtx) -> Result<(), AppError> {
    // Without a preceding token gate (logout) the credential comes straight from the header.
    let credential = match ctx.extensions().get::<Credential>() {
        Some(credential) => credential.clone(),
        None => Credential::new(
            bearer_token(ctx.headers()).ok_or(AppError::Unauthorized(messages::NO_TOKEN))?,
        ),
    };

    let revoked = state
        .blacklist
        .is_revoked(credential.as_str())
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "blacklist lookup failed");
            AppError::Internal
        })?;

    if revoked {
        tracing::info!("blacklisted credential rejected");
        return Err(AppError::Unauthorized(messages::BLACKLISTED));
    }

    ctx.extensions_mut().insert(credential);
    Ok(())
}

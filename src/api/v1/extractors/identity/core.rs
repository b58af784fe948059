use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::messages;

use super::{Credential, Identity};

/// Handler で Identity を受け取るための extractor
/// token gate が Identity を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (gate 未設定)
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AppError::Unauthorized(messages::UNAUTHORIZED))
    }
}

/// Credential accepted by the token or blacklist gate.
pub struct CurrentCredential(pub Credential);

impl<S> FromRequestParts<S> for CurrentCredential
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credential>()
            .cloned()
            .map(CurrentCredential)
            .ok_or(AppError::Unauthorized(messages::NO_TOKEN))
    }
}

/*
 * Responsibility
 * - Path の String を UUID として受け、リソース種別付きの ID 型へ変換する
 * - 不正な形式は 400 (ValidationError) ― 404 とは区別する
 * 置くもの
 *  - ResourceId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for ResourceId<T>
 * 置かないもの
 *  - Accommodation などの具体リソース名 (types.rs)
 */
use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// Binds a resource type to its path parameter name and the message used
/// when the parameter is malformed.
pub trait ResourceTag: Send + Sync + 'static {
    const PARAM: &'static str;
    const INVALID: &'static str;
}

pub struct ResourceId<T> {
    pub id: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ResourceTag> ResourceId<T> {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = Uuid::parse_str(raw).map_err(|_| AppError::validation(T::INVALID))?;
        Ok(Self {
            id,
            _marker: PhantomData,
        })
    }

    /// Reads `T::PARAM` from the matched route's path parameters.
    pub async fn from_parts(parts: &mut Parts) -> Result<Self, AppError> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, &())
            .await
            .map_err(|_| AppError::validation(T::INVALID))?;
        let raw = params
            .get(T::PARAM)
            .ok_or_else(|| AppError::validation(T::INVALID))?;
        Self::parse(raw)
    }
}

impl<T, S> FromRequestParts<S> for ResourceId<T>
where
    T: ResourceTag,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts).await
    }
}

impl<T> Clone for ResourceId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceId<T> {}

impl<T> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId").field("id", &self.id).finish()
    }
}

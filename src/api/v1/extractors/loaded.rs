use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// A resource the existence gate already loaded for this request.
///
/// Missing means the route was wired without its existence gate, which is a
/// server-side mistake rather than a client error.
pub struct Loaded<T>(pub T);

impl<T, S> FromRequestParts<S> for Loaded<T>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<T>() {
            Some(value) => Ok(Loaded(value.clone())),
            None => {
                tracing::error!(
                    resource = std::any::type_name::<T>(),
                    "handler expected a loaded resource but none was attached"
                );
                Err(AppError::Internal)
            }
        }
    }
}

use std::{future::Future, pin::Pin};

use crate::services::cache::CacheError;

/// Revoked-credential store.
///
/// Only the membership predicate matters to request handling:
/// - `Ok(true)`:  credential is revoked
/// - `Ok(false)`: credential is not revoked
/// - `Err(_)`:    store failure (caller must surface a server error, not a denial)
pub trait BlacklistStore: Send + Sync {
    fn is_revoked<'a>(
        &'a self,
        credential: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BlacklistError>> + Send + 'a>>;

    // Revoke `credential` for `ttl_secs`. Returns `Ok(false)` when it was already revoked.
    fn revoke<'a>(
        &'a self,
        credential: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BlacklistError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlacklistError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use sha2::{Digest, Sha256};

use crate::services::{
    blacklist::store::{BlacklistError, BlacklistStore},
    cache::{CacheClient, ValkeyClient},
};

/// Cache-backed blacklist (Valkey in production).
///
/// Keys are `<prefix>:<sha256(credential)>` so raw bearer tokens never land in
/// the cache. Entries expire with the token, after which the token is rejected
/// by `exp` validation anyway.
#[derive(Clone)]
pub struct CacheBlacklistStore<C: CacheClient> {
    cache: Arc<C>,
    prefix: String,
}

impl CacheBlacklistStore<ValkeyClient> {
    pub async fn connect(redis_url: &str) -> Result<Self, BlacklistError> {
        let client = ValkeyClient::new(redis_url).await?;
        Ok(Self::new_with_cache(Arc::new(client), "blacklist"))
    }
}

impl<C: CacheClient> CacheBlacklistStore<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, credential: &str) -> String {
        let digest = Sha256::digest(credential.as_bytes());
        format!("{}:{}", self.prefix, hex::encode(digest))
    }
}

impl<C: CacheClient> BlacklistStore for CacheBlacklistStore<C> {
    fn is_revoked<'a>(
        &'a self,
        credential: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BlacklistError>> + Send + 'a>> {
        Box::pin(async move {
            let revoked = self.cache.exists(&self.key(credential)).await?;
            Ok(revoked)
        })
    }

    fn revoke<'a>(
        &'a self,
        credential: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, BlacklistError>> + Send + 'a>> {
        Box::pin(async move {
            let stored = self
                .cache
                .set_if_absent_with_ttl(&self.key(credential), "1", Duration::from_secs(ttl_secs))
                .await?;
            tracing::debug!(backend = self.cache.backend_name(), stored, "credential revoked");
            Ok(stored)
        })
    }
}

//! In-process cache clients for tests.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, (String, Instant)>>>,
}

impl MemoryCache {
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(key)
            .is_some_and(|(_, expires_at)| *expires_at > Instant::now()))
    }

    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> CacheResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        if entries.get(key).is_some_and(|(_, expires_at)| *expires_at > now) {
            return Ok(false);
        }
        entries.insert(key.to_string(), (value.to_string(), now + ttl.max(Duration::from_secs(1))));
        Ok(true)
    }
}

/// Every command fails, as if the backend were unreachable.
#[derive(Clone, Default)]
pub struct UnavailableCache;

#[async_trait]
impl CacheClient for UnavailableCache {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    async fn exists(&self, _key: &str) -> CacheResult<bool> {
        Err(CacheError::BackendConnection("connection refused".into()))
    }

    async fn set_if_absent_with_ttl(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> CacheResult<bool> {
        Err(CacheError::BackendConnection("connection refused".into()))
    }
}

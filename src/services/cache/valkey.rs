use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Valkey/Redis-backed cache client.
///
/// Only what the token blacklist needs: `EXISTS` and `SET NX EX`.
#[derive(Clone)]
pub struct ValkeyClient {
    manager: ConnectionManager,
}

impl ValkeyClient {
    /// `url` like `redis://localhost:6379`. Fails fast when the server is unreachable.
    pub async fn new(url: &str) -> Result<Self, CacheError> {
        let manager = redis::Client::open(url)
            .map_err(connection_error)?
            .get_connection_manager()
            .await
            .map_err(connection_error)?;

        Ok(Self { manager })
    }

    // ConnectionManager は clone しても同じ多重化接続を共有する
    fn conn(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

fn connection_error(e: redis::RedisError) -> CacheError {
    CacheError::BackendConnection(e.to_string())
}

fn command_error(e: redis::RedisError) -> CacheError {
    CacheError::BackendCommand(e.to_string())
}

#[async_trait]
impl CacheClient for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let found: u64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut self.conn())
            .await
            .map_err(command_error)?;

        Ok(found > 0)
    }

    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> CacheResult<bool> {
        // EX takes whole seconds; 0 would be rejected by the server
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut self.conn())
            .await
            .map_err(command_error)?;

        // OK when stored, nil when the key already existed
        Ok(reply.is_some())
    }
}

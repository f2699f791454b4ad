//! Credential storage implementation
//!
//! This module handles persistence of the session credential (the backend
//! JWT) across restarts, with a Redis backend for deployments and an
//! in-memory backend for tests and redis-less setups. The credential is the
//! only thing persisted; every derived state is refetched from the backend.

use std::sync::Arc;

use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::config::SessionConfig;
use crate::utils::errors::Result;

/// Credential storage backend
#[derive(Clone)]
pub enum CredentialStore {
    Redis(RedisCredentialStore),
    Memory(MemoryCredentialStore),
}

impl CredentialStore {
    /// Create a Redis-backed store from session configuration
    pub async fn redis(config: SessionConfig) -> Result<Self> {
        Ok(CredentialStore::Redis(RedisCredentialStore::new(config).await?))
    }

    /// Create an in-memory store (nothing survives the process)
    pub fn memory() -> Self {
        CredentialStore::Memory(MemoryCredentialStore::new())
    }

    /// Persist the session token
    pub async fn save(&self, token: &str) -> Result<()> {
        match self {
            CredentialStore::Redis(store) => store.save(token).await,
            CredentialStore::Memory(store) => store.save(token).await,
        }
    }

    /// Load the stored session token, if any
    pub async fn load(&self) -> Result<Option<String>> {
        match self {
            CredentialStore::Redis(store) => store.load().await,
            CredentialStore::Memory(store) => store.load().await,
        }
    }

    /// Discard the stored session token
    pub async fn clear(&self) -> Result<()> {
        match self {
            CredentialStore::Redis(store) => store.clear().await,
            CredentialStore::Memory(store) => store.clear().await,
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialStore::Redis(_) => f.write_str("CredentialStore::Redis"),
            CredentialStore::Memory(_) => f.write_str("CredentialStore::Memory"),
        }
    }
}

/// Redis-backed credential storage
#[derive(Clone)]
pub struct RedisCredentialStore {
    connection_manager: redis::aio::ConnectionManager,
    config: SessionConfig,
}

impl RedisCredentialStore {
    pub async fn new(config: SessionConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    fn token_key(&self) -> String {
        format!("{}session:token", self.config.prefix)
    }

    pub async fn save(&self, token: &str) -> Result<()> {
        let key = self.token_key();
        let mut conn = self.connection_manager.clone();

        match conn
            .set_ex::<_, _, ()>(&key, token, self.config.ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!(key = %key, ttl_seconds = self.config.ttl_seconds, "Session token saved");
                Ok(())
            }
            Err(e) => {
                error!(key = %key, error = %e, "Failed to save session token");
                Err(e.into())
            }
        }
    }

    pub async fn load(&self) -> Result<Option<String>> {
        let key = self.token_key();
        let mut conn = self.connection_manager.clone();

        let token: Option<String> = conn.get(&key).await?;
        debug!(key = %key, has_token = token.is_some(), "Session token loaded");
        Ok(token)
    }

    pub async fn clear(&self) -> Result<()> {
        let key = self.token_key();
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(key = %key, deleted = deleted, "Session token cleared");
        Ok(())
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// In-memory credential storage
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    pub async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().await.clone())
    }

    pub async fn clear(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = CredentialStore::memory();
        assert_eq!(store.load().await.unwrap(), None);

        store.save("token-abc").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("token-abc".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = CredentialStore::memory();
        store.save("first").await.unwrap();
        store.save("second").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("second".to_string()));
    }
}

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use cachify_core::{CachifyError, RemoteStore, Result};

const SCAN_COUNT: usize = 1000;

/// [`RemoteStore`] over a Redis connection manager
///
/// Holds a clone of the caller's `ConnectionManager`; clones share the same
/// multiplexed connection, which stays under the caller's control.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

fn backend_err(e: redis::RedisError) -> CachifyError {
    CachifyError::Backend(e.to_string())
}

#[async_trait]
impl RemoteStore for RedisStore {
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(backend_err)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(backend_err)
    }

    async fn del(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        conn.del(keys).await.map_err(backend_err)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let mut found = Vec::new();

        // Cursor-based scan of the keyspace
        let mut cursor = 0u64;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(backend_err)?;

            found.extend(keys);
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        // SCAN may return a key more than once
        found.sort_unstable();
        found.dedup();
        Ok(found)
    }
}

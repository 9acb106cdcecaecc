//! Redis-backed implementation
//!
//! One blocking connection, shared behind a mutex. Commands are issued one at
//! a time; the server provides per-command atomicity.

use parking_lot::Mutex;
use redis::{Client, Connection};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::Result;

/// Backend talking to a Redis server
pub struct RedisBackend {
    url: String,
    conn: Mutex<Connection>,
}

impl RedisBackend {
    /// Connect to the server at `url`
    ///
    /// # Arguments
    /// * `url` - Connection URL, e.g. `redis://127.0.0.1:6379/0`
    ///
    /// # Returns
    /// * `Result<RedisBackend>` - Connected backend, or `BackendUnavailable`
    pub fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = client.get_connection()?;
        info!("Connected to {}", url);

        Ok(Self {
            url: url.to_string(),
            conn: Mutex::new(conn),
        })
    }

    /// Get the URL this backend is connected to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend").field("url", &self.url).finish()
    }
}

impl Backend for RedisBackend {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.lock();
        redis::cmd("SET").arg(key).arg(value).query::<()>(&mut *conn)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.lock();
        Ok(redis::cmd("GET").arg(key).query(&mut *conn)?)
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.lock();
        Ok(redis::cmd("INCR").arg(key).query(&mut *conn)?)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut conn = self.conn.lock();
        Ok(redis::cmd("RPUSH").arg(key).arg(value).query(&mut *conn)?)
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.lock();
        Ok(redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query(&mut *conn)?)
    }

    fn flushdb(&self) -> Result<()> {
        debug!("FLUSHDB on {}", self.url);
        let mut conn = self.conn.lock();
        redis::cmd("FLUSHDB").query::<()>(&mut *conn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_connect_refused() {
        // Port 1 is reserved and nothing listens on it
        let result = RedisBackend::connect("redis://127.0.0.1:1/");
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }

    #[test]
    fn test_connect_bad_url() {
        let result = RedisBackend::connect("http://example.com");
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}

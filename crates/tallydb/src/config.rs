//! Backend selection

use tracing::info;

use crate::backend::Backend;
use crate::error::Result;
use crate::memory::MemoryBackend;
use crate::remote::RedisBackend;

/// Default Redis URL (local server, database 0)
pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379/";

/// Which backend to open and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Redis connection URL
    pub url: String,

    /// Use the in-process backend instead of Redis
    pub memory: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            memory: false,
        }
    }
}

impl BackendConfig {
    /// Configuration for a Redis server at `url`
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            memory: false,
        }
    }

    /// Configuration for the in-process backend
    pub fn memory() -> Self {
        Self {
            memory: true,
            ..Self::default()
        }
    }

    /// Open the configured backend
    pub fn open(&self) -> Result<Box<dyn Backend>> {
        if self.memory {
            info!("Using in-memory backend");
            Ok(Box::new(MemoryBackend::new()))
        } else {
            Ok(Box::new(RedisBackend::connect(&self.url)?))
        }
    }
}

//! Cache: instrumented store/get over a backend

use tallydb::{Backend, Result, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::instrument::Instrumented;
use crate::replay::Replay;
use crate::transform::{parse_int, parse_str, Transform};

/// Logical method name under which `store` calls are recorded
pub const STORE: &str = "store";

/// Key-value cache recording every `store` call in the backend
///
/// Opening a cache flushes the backend. Point it at a dedicated database:
/// anything else stored there is lost.
pub struct Cache<B: Backend> {
    /// Connected backend, owned for the lifetime of the cache
    backend: B,

    /// Instrumentation for `store`
    store_calls: Instrumented,
}

impl<B: Backend> Cache<B> {
    /// Create a cache over `backend`, wiping all existing data
    ///
    /// # Arguments
    /// * `backend` - Connected backend
    ///
    /// # Returns
    /// * `Result<Cache<B>>` - Empty cache, or the backend's error if the flush failed
    pub fn new(backend: B) -> Result<Self> {
        warn!("Flushing backend on cache initialization");
        backend.flushdb()?;

        Ok(Self {
            backend,
            store_calls: Instrumented::new(STORE),
        })
    }

    /// Store a value under a freshly generated key
    ///
    /// # Arguments
    /// * `value` - Text, integer, float or bytes
    ///
    /// # Returns
    /// * `Result<String>` - The generated key
    pub fn store(&self, value: impl Into<Value>) -> Result<String> {
        let raw = value.into().to_bytes();

        self.store_calls.call(&self.backend, &raw, |backend| {
            let key = Uuid::new_v4().to_string();
            backend.set(&key, &raw)?;
            debug!("stored {} bytes under {}", raw.len(), key);
            Ok(key)
        })
    }

    /// Get the raw value under `key`, `None` if absent
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.backend.get(key)
    }

    /// Get the value under `key` projected through `transform`
    ///
    /// A missing key yields `Ok(None)` without calling `transform`.
    pub fn get_with<T>(&self, key: &str, transform: &Transform<T>) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(raw) => transform.apply(raw).map(Some),
            None => {
                debug!("miss on {}, skipping {:?}", key, transform);
                Ok(None)
            }
        }
    }

    /// Get the value under `key` decoded as UTF-8
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key)?.map(parse_str).transpose()
    }

    /// Get the value under `key` parsed as an integer
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.backend.get(key)?.map(parse_int).transpose()
    }

    /// Number of recorded calls to `method`
    pub fn calls(&self, method: &str) -> Result<i64> {
        Instrumented::new(method).calls(&self.backend)
    }

    /// Recorded (input, output) lists of `method`
    pub fn history(&self, method: &str) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
        let inst = Instrumented::new(method);
        Ok((inst.inputs(&self.backend)?, inst.outputs(&self.backend)?))
    }

    /// Read back the call count and history of `method`
    pub fn replay(&self, method: &str) -> Result<Replay> {
        Replay::read(&self.backend, &Instrumented::new(method))
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Release the backend, closing the cache
    pub fn into_inner(self) -> B {
        self.backend
    }
}

//! The primitives every backend provides

use crate::error::Result;

/// Key-value primitives TallyStore is built on
///
/// Each call is a single blocking round-trip and atomic on its own.
/// Sequences of calls are not atomic as a unit.
pub trait Backend: Send + Sync {
    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Read the value under `key`, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increment the integer counter under `key` by one
    ///
    /// An absent key counts as zero. Returns the new value.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Append `value` to the list under `key`, returning the new length
    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Read list elements `start..=stop`
    ///
    /// Negative indices count from the end (`-1` is the last element) and
    /// out-of-range indices are clamped, as in Redis `LRANGE`.
    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// Delete every key
    fn flushdb(&self) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn incr(&self, key: &str) -> Result<i64> {
        (**self).incr(key)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        (**self).rpush(key, value)
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        (**self).lrange(key, start, stop)
    }

    fn flushdb(&self) -> Result<()> {
        (**self).flushdb()
    }
}

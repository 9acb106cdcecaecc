//! In-process backend
//!
//! Mirrors the Redis data model (string and list keys, type errors on
//! mismatched access) without a server. Every primitive holds the lock for its
//! whole duration, so each one is atomic like a Redis command.

use std::collections::HashMap;
use std::fmt;

use ahash::RandomState;
use parking_lot::RwLock;

use crate::backend::Backend;
use crate::error::{Error, Result};

/// A stored key: either a plain string or a list
#[derive(Debug, Clone)]
enum Slot {
    Str(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// Backend keeping all data in memory
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, Slot, RandomState>>,
}

impl fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("keys", &self.len())
            .finish()
    }
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if no keys are stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Backend for MemoryBackend {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.data
            .write()
            .insert(key.to_string(), Slot::Str(value.to_vec()));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.data.read().get(key) {
            Some(Slot::Str(v)) => Ok(Some(v.clone())),
            Some(Slot::List(_)) => Err(Error::WrongType),
            None => Ok(None),
        }
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut data = self.data.write();
        let current = match data.get(key) {
            Some(Slot::Str(v)) => std::str::from_utf8(v)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or(Error::NotInteger)?,
            Some(Slot::List(_)) => return Err(Error::WrongType),
            None => 0,
        };

        let next = current.checked_add(1).ok_or(Error::NotInteger)?;
        data.insert(key.to_string(), Slot::Str(next.to_string().into_bytes()));
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut data = self.data.write();
        let slot = data
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));

        match slot {
            Slot::List(list) => {
                list.push(value.to_vec());
                Ok(list.len())
            }
            Slot::Str(_) => Err(Error::WrongType),
        }
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let data = self.data.read();
        let list = match data.get(key) {
            Some(Slot::List(list)) => list,
            Some(Slot::Str(_)) => return Err(Error::WrongType),
            None => return Ok(Vec::new()),
        };

        match clamp_range(list.len(), start, stop) {
            Some((from, to)) => Ok(list[from..=to].to_vec()),
            None => Ok(Vec::new()),
        }
    }

    fn flushdb(&self) -> Result<()> {
        self.data.write().clear();
        Ok(())
    }
}

/// Resolve Redis-style inclusive indices against a list of `len` elements
fn clamp_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let db = MemoryBackend::new();
        db.set("k", b"v").unwrap();

        assert_eq!(db.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(db.get("missing").unwrap(), None);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_incr() {
        let db = MemoryBackend::new();

        assert_eq!(db.incr("n").unwrap(), 1);
        assert_eq!(db.incr("n").unwrap(), 2);
        assert_eq!(db.get("n").unwrap(), Some(b"2".to_vec()));

        db.set("n", b"41").unwrap();
        assert_eq!(db.incr("n").unwrap(), 42);
    }

    #[test]
    fn test_incr_not_integer() {
        let db = MemoryBackend::new();
        db.set("s", b"foo").unwrap();
        assert!(matches!(db.incr("s"), Err(Error::NotInteger)));

        db.set("max", i64::MAX.to_string().as_bytes()).unwrap();
        assert!(matches!(db.incr("max"), Err(Error::NotInteger)));
    }

    #[test]
    fn test_rpush_and_lrange() {
        let db = MemoryBackend::new();

        assert_eq!(db.rpush("l", b"a").unwrap(), 1);
        assert_eq!(db.rpush("l", b"b").unwrap(), 2);
        assert_eq!(db.rpush("l", b"c").unwrap(), 3);

        let all = db.lrange("l", 0, -1).unwrap();
        assert_eq!(all, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);

        assert_eq!(db.lrange("l", 1, 1).unwrap(), vec![b"b".to_vec()]);
        assert_eq!(db.lrange("l", -2, -1).unwrap().len(), 2);
        assert_eq!(db.lrange("l", 0, 100).unwrap().len(), 3);
        assert_eq!(db.lrange("l", -100, 0).unwrap(), vec![b"a".to_vec()]);
        assert!(db.lrange("l", 2, 1).unwrap().is_empty());
        assert!(db.lrange("l", 5, 10).unwrap().is_empty());
        assert!(db.lrange("missing", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_type() {
        let db = MemoryBackend::new();
        db.set("s", b"v").unwrap();
        db.rpush("l", b"a").unwrap();

        assert!(matches!(db.rpush("s", b"x"), Err(Error::WrongType)));
        assert!(matches!(db.lrange("s", 0, -1), Err(Error::WrongType)));
        assert!(matches!(db.get("l"), Err(Error::WrongType)));
        assert!(matches!(db.incr("l"), Err(Error::WrongType)));

        // SET replaces whatever was there
        db.set("l", b"now a string").unwrap();
        assert_eq!(db.get("l").unwrap(), Some(b"now a string".to_vec()));
    }

    #[test]
    fn test_flushdb() {
        let db = MemoryBackend::new();
        db.set("a", b"1").unwrap();
        db.rpush("b", b"2").unwrap();

        db.flushdb().unwrap();

        assert!(db.is_empty());
        assert_eq!(db.get("a").unwrap(), None);
    }

    #[test]
    fn test_clamp_range_empty_list() {
        assert_eq!(clamp_range(0, 0, -1), None);
        assert_eq!(clamp_range(3, 0, -1), Some((0, 2)));
        assert_eq!(clamp_range(3, -1, -1), Some((2, 2)));
    }
}

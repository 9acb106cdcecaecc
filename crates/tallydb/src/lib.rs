//! # tallydb
//!
//! Key-value backends for TallyStore.
//!
//! ## Primitives
//! - `SET` / `GET` on string keys
//! - `INCR` on integer counters
//! - `RPUSH` / `LRANGE` on lists
//! - `FLUSHDB` to wipe everything
//!
//! Two implementations share the [`Backend`] trait: [`RedisBackend`] talks to a
//! Redis server, [`MemoryBackend`] keeps the same data model in process.

#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod memory;
mod remote;
mod value;

pub use backend::Backend;
pub use config::{BackendConfig, DEFAULT_URL};
pub use error::{Error, Result};
pub use memory::MemoryBackend;
pub use remote::RedisBackend;
pub use value::Value;

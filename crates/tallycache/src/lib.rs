//! # tallycache
//!
//! Instrumented key-value cache on top of a [`tallydb::Backend`].
//!
//! ## Architecture
//! - **Cache**: stores values under generated UUID keys, reads them back
//! - **Instrumented**: counts calls and records input/output history in the backend
//! - **Transform**: optional projection applied to values that exist
//! - **Replay**: read-back of a method's call count and history
//!
//! ## Key layout
//! For a logical method name `store`:
//! - `store`: call counter
//! - `store:inputs`: list of recorded inputs
//! - `store:outputs`: list of recorded outputs

#![warn(missing_docs)]

mod cache;
mod instrument;
mod replay;
mod transform;

pub use cache::{Cache, STORE};
pub use instrument::Instrumented;
pub use replay::{Replay, ReplayEntry};
pub use tallydb::{Backend, Error, Result, Value};
pub use transform::Transform;

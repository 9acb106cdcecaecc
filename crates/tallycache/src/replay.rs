//! Read-back of recorded calls

use std::fmt;

use serde::Serialize;
use tallydb::{Backend, Result};

use crate::instrument::Instrumented;

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayEntry {
    /// Recorded input
    pub input: String,
    /// Recorded output
    pub output: String,
}

/// Call count and history of one logical method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// Logical method name
    pub method: String,
    /// Value of the call counter
    pub calls: i64,
    /// Input/output pairs in call order
    pub history: Vec<ReplayEntry>,
}

impl Replay {
    /// Read the counter and history recorded under `inst`
    ///
    /// Inputs and outputs are paired by position. If the lists have drifted
    /// apart the extra tail of the longer one is ignored.
    pub fn read<B: Backend + ?Sized>(backend: &B, inst: &Instrumented) -> Result<Self> {
        let calls = inst.calls(backend)?;
        let inputs = inst.inputs(backend)?;
        let outputs = inst.outputs(backend)?;

        let history = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| ReplayEntry {
                input: String::from_utf8_lossy(input).into_owned(),
                output: String::from_utf8_lossy(output).into_owned(),
            })
            .collect();

        Ok(Self {
            method: inst.name().to_string(),
            calls,
            history,
        })
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times", self.method, self.calls)?;
        for entry in &self.history {
            writeln!(f, "{}({}) -> {}", self.method, entry.input, entry.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallydb::MemoryBackend;

    #[test]
    fn test_empty_replay() {
        let db = MemoryBackend::new();
        let replay = Replay::read(&db, &Instrumented::new("store")).unwrap();

        assert_eq!(replay.calls, 0);
        assert!(replay.history.is_empty());
        assert_eq!(replay.to_string(), "store was called 0 times\n");
    }

    #[test]
    fn test_replay_lines() {
        let db = MemoryBackend::new();
        let inst = Instrumented::new("store");
        inst.call(&db, b"foo", |_| Ok("k1")).unwrap();
        inst.call(&db, b"42", |_| Ok("k2")).unwrap();

        let replay = Replay::read(&db, &inst).unwrap();
        assert_eq!(
            replay.to_string(),
            "store was called 2 times\nstore(foo) -> k1\nstore(42) -> k2\n"
        );
    }

    #[test]
    fn test_mismatched_lengths_zip_to_shorter() {
        let db = MemoryBackend::new();
        let inst = Instrumented::new("store");
        db.rpush(inst.inputs_key(), b"a").unwrap();
        db.rpush(inst.inputs_key(), b"b").unwrap();
        db.rpush(inst.inputs_key(), b"c").unwrap();
        db.rpush(inst.outputs_key(), b"A").unwrap();

        let replay = Replay::read(&db, &inst).unwrap();
        assert_eq!(
            replay.history,
            vec![ReplayEntry {
                input: "a".to_string(),
                output: "A".to_string()
            }]
        );
    }

    #[test]
    fn test_replay_is_read_only() {
        let db = MemoryBackend::new();
        let inst = Instrumented::new("store");
        inst.call(&db, b"x", |_| Ok("k")).unwrap();

        let first = Replay::read(&db, &inst).unwrap();
        let second = Replay::read(&db, &inst).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.calls, 1);
    }
}

//! Call counting and history recording
//!
//! State lives in the backend, not in the process, so any client pointed at the
//! same backend can replay it.

use tallydb::{Backend, Result};
use tracing::trace;

/// Instrumentation for one logical method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrumented {
    name: String,
    inputs_key: String,
    outputs_key: String,
}

impl Instrumented {
    /// Instrumentation keyed by `name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            inputs_key: format!("{}:inputs", name),
            outputs_key: format!("{}:outputs", name),
            name,
        }
    }

    /// Logical method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key of the call counter (the method name itself)
    pub fn counter_key(&self) -> &str {
        &self.name
    }

    /// Key of the input history list
    pub fn inputs_key(&self) -> &str {
        &self.inputs_key
    }

    /// Key of the output history list
    pub fn outputs_key(&self) -> &str {
        &self.outputs_key
    }

    /// Increment the call counter, returning the new count
    pub fn count_call<B: Backend + ?Sized>(&self, backend: &B) -> Result<i64> {
        backend.incr(&self.name)
    }

    /// Append one input/output pair to the history
    pub fn record_history<B: Backend + ?Sized>(
        &self,
        backend: &B,
        input: &[u8],
        output: &[u8],
    ) -> Result<()> {
        backend.rpush(&self.inputs_key, input)?;
        backend.rpush(&self.outputs_key, output)?;
        Ok(())
    }

    /// Run `op` with both counting and history recording
    ///
    /// The counter is incremented before `op` runs, so failed calls are
    /// counted. History is appended only once `op` has returned, which keeps
    /// the input and output lists the same length.
    ///
    /// # Arguments
    /// * `backend` - Where the counter and history live
    /// * `input` - Raw input recorded in `<name>:inputs`
    /// * `op` - The wrapped operation
    ///
    /// # Returns
    /// * `Result<O>` - Whatever `op` returned
    pub fn call<B, O, F>(&self, backend: &B, input: &[u8], op: F) -> Result<O>
    where
        B: Backend + ?Sized,
        O: AsRef<[u8]>,
        F: FnOnce(&B) -> Result<O>,
    {
        let count = self.count_call(backend)?;
        trace!("{} call #{}", self.name, count);

        let output = op(backend)?;
        self.record_history(backend, input, output.as_ref())?;

        Ok(output)
    }

    /// Read the call counter, zero when it was never incremented
    pub fn calls<B: Backend + ?Sized>(&self, backend: &B) -> Result<i64> {
        match backend.get(&self.name)? {
            Some(raw) => crate::transform::parse_int(raw),
            None => Ok(0),
        }
    }

    /// Read the full input history in call order
    pub fn inputs<B: Backend + ?Sized>(&self, backend: &B) -> Result<Vec<Vec<u8>>> {
        backend.lrange(&self.inputs_key, 0, -1)
    }

    /// Read the full output history in call order
    pub fn outputs<B: Backend + ?Sized>(&self, backend: &B) -> Result<Vec<Vec<u8>>> {
        backend.lrange(&self.outputs_key, 0, -1)
    }
}

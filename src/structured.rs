use crate::accumulator::{JsonAccumulator, Progress};
use crate::engine::RepairLogEntry;
use crate::error::{SchemaMismatch, StructuredError};
use crate::options::Options;
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Streams fragments into a schema-validated value.
///
/// The target schema is relaxed once at construction so validation can
/// succeed against a document that is still growing; the strict schema is
/// kept around for callers that want an exact check once their stream ends.
pub struct StructuredAccumulator {
    json: JsonAccumulator,
    schema: Arc<Schema>,
    relaxed: Arc<Schema>,
}

impl StructuredAccumulator {
    pub fn new(schema: Schema, opts: Options) -> Self {
        let relaxed = Arc::new(schema.relax());
        Self {
            json: JsonAccumulator::new(opts),
            schema: Arc::new(schema),
            relaxed,
        }
    }

    /// Reuse an already-relaxed schema pair, e.g. across many documents
    /// sharing one target schema. `relaxed` must be `schema.relax()`.
    pub fn with_shared(schema: Arc<Schema>, relaxed: Arc<Schema>, opts: Options) -> Self {
        Self {
            json: JsonAccumulator::new(opts),
            schema,
            relaxed,
        }
    }

    /// Feed one fragment.
    ///
    /// An incomplete buffer propagates as [`Progress::Incomplete`] without
    /// any validation. A complete candidate is validated against the relaxed
    /// schema; each [`Progress::Complete`] return is the latest snapshot and
    /// supersedes earlier ones. A mismatch against even the relaxed shape
    /// means the document structurally conflicts with the schema; more
    /// fragments cannot fix that, so the error is surfaced rather than
    /// swallowed.
    pub fn push(&mut self, chunk: &str) -> Result<Progress, SchemaMismatch> {
        match self.json.push(chunk) {
            Progress::Incomplete => Ok(Progress::Incomplete),
            Progress::Complete(candidate) => {
                self.relaxed.validate(&candidate).map(Progress::Complete)
            }
        }
    }

    /// Like [`Self::push`], deserializing the validated snapshot into `T`.
    pub fn push_as<T: DeserializeOwned>(
        &mut self,
        chunk: &str,
    ) -> Result<Progress<T>, StructuredError> {
        match self.push(chunk)? {
            Progress::Incomplete => Ok(Progress::Incomplete),
            Progress::Complete(value) => Ok(Progress::Complete(serde_json::from_value(value)?)),
        }
    }

    /// The strict target schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The relaxed schema candidates are validated against.
    pub fn relaxed_schema(&self) -> &Schema {
        &self.relaxed
    }

    /// The text accumulated so far.
    pub fn buffer(&self) -> &str {
        self.json.buffer()
    }

    /// Drain the repair attempt log. Empty unless `Options::logging` is
    /// enabled.
    pub fn take_log(&mut self) -> Vec<RepairLogEntry> {
        self.json.take_log()
    }
}

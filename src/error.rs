use serde_json::Value;
use thiserror::Error;

/// Terminal outcome of the bounded repair loop: the text could not be turned
/// into valid JSON within the attempt budget.
///
/// At the accumulator boundary this is reinterpreted as "incomplete" rather
/// than surfaced, because a failed repair is indistinguishable from a merely
/// truncated document until the fragment stream ends.
#[derive(Debug, Clone, Error)]
#[error("could not repair text into valid JSON: {source}")]
pub struct UnrepairableError {
    /// The text as it was handed to the engine, before any heuristic pass.
    pub text: String,
    /// The failure reported by the final repair attempt.
    #[source]
    pub source: jsonrepair::RepairError,
}

/// A parsed value structurally conflicts with the expected schema.
///
/// More fragments cannot fix a type mismatch that has already concretely
/// occurred, so this is always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("schema mismatch at {path}: expected {expected}, found {found}")]
pub struct SchemaMismatch {
    /// Path of the offending value, `$[key][index]` style.
    pub path: String,
    /// Human-readable name of the expected schema kind.
    pub expected: &'static str,
    /// The value that failed to validate or coerce.
    pub found: Value,
}

/// Errors from the stream-driving helpers ([`parse_chunks`] and
/// [`parse_chunks_with_schema`]).
///
/// [`parse_chunks`]: crate::parse_chunks
/// [`parse_chunks_with_schema`]: crate::parse_chunks_with_schema
#[derive(Debug, Error)]
pub enum StreamError {
    /// The fragment iterator ran out while the accumulator still reported an
    /// incomplete buffer. The core never raises this on its own; only the
    /// layer that knows the stream has ended can declare the document
    /// permanently malformed.
    #[error("fragment stream ended while the JSON document was still incomplete")]
    Exhausted {
        /// Everything accumulated before the stream ran dry.
        buffer: String,
    },
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
}

/// Errors from the typed structured path
/// ([`StructuredAccumulator::push_as`](crate::StructuredAccumulator::push_as)).
#[derive(Debug, Error)]
pub enum StructuredError {
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
    /// The validated value did not deserialize into the requested type.
    #[error("validated value failed to deserialize: {0}")]
    Deserialize(#[from] serde_json::Error),
}

mod accumulator;
mod engine;
pub mod error;
mod heuristics;
pub mod options;
mod scan;
pub mod schema;
mod structured;

pub use accumulator::{JsonAccumulator, Progress};
pub use engine::{RepairEngine, RepairLogEntry};
pub use error::{SchemaMismatch, StreamError, StructuredError, UnrepairableError};
pub use heuristics::{close_unbalanced_quote, extract_fenced_block};
pub use options::Options;
pub use schema::{Field, Schema, SchemaKind};
pub use structured::StructuredAccumulator;

use serde_json::Value;

/// One-shot: run `text` through the repair engine and return a valid JSON
/// string. Input that is already valid JSON is returned unchanged.
pub fn repair_text(text: &str, opts: &Options) -> Result<String, UnrepairableError> {
    RepairEngine::new(opts.clone()).repair(text)
}

/// Drive a whole fragment stream through a fresh accumulator and return the
/// final assembled value.
///
/// The stream signals its end by running out. If the accumulator still
/// reports an incomplete buffer at that point, the document is permanently
/// malformed and `StreamError::Exhausted` carries the accumulated text.
pub fn parse_chunks<'a, I>(chunks: I, opts: &Options) -> Result<Value, StreamError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut acc = JsonAccumulator::new(opts.clone());
    let mut latest = Progress::Incomplete;
    for chunk in chunks {
        latest = acc.push(chunk);
    }
    match latest {
        Progress::Complete(value) => Ok(value),
        Progress::Incomplete => Err(StreamError::Exhausted {
            buffer: acc.buffer().to_string(),
        }),
    }
}

/// Structured variant of [`parse_chunks`]: the assembled value is validated
/// against `schema`'s relaxed form. A schema mismatch aborts immediately;
/// exhaustion reports the accumulated text like the unstructured variant.
pub fn parse_chunks_with_schema<'a, I>(
    chunks: I,
    schema: &Schema,
    opts: &Options,
) -> Result<Value, StreamError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut acc = StructuredAccumulator::new(schema.clone(), opts.clone());
    let mut latest = Progress::Incomplete;
    for chunk in chunks {
        latest = acc.push(chunk)?;
    }
    match latest {
        Progress::Complete(value) => Ok(value),
        Progress::Incomplete => Err(StreamError::Exhausted {
            buffer: acc.buffer().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;

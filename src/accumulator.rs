use crate::engine::{AttemptLog, RepairEngine, RepairLogEntry};
use crate::options::Options;
use serde_json::Value;

/// Outcome of feeding one fragment to an accumulator.
///
/// `Incomplete` is a value, not an error: the buffer does not yet assemble
/// into a complete document and the caller should supply the next fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress<T = Value> {
    /// The buffer currently assembles into a complete value. A later
    /// fragment may supersede this with a more complete snapshot.
    Complete(T),
    /// Not enough text yet.
    Incomplete,
}

impl<T> Progress<T> {
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Progress::Incomplete)
    }

    /// The assembled value, if there is one.
    pub fn complete(self) -> Option<T> {
        match self {
            Progress::Complete(v) => Some(v),
            Progress::Incomplete => None,
        }
    }
}

/// Accumulates streamed text fragments into one JSON document.
///
/// The buffer only ever grows; one accumulator instance covers the lifetime
/// of one document. Construct a new instance for the next document.
pub struct JsonAccumulator {
    buf: String,
    engine: RepairEngine,
    log: AttemptLog,
}

impl JsonAccumulator {
    pub fn new(opts: Options) -> Self {
        let logging = opts.logging;
        Self {
            buf: String::new(),
            engine: RepairEngine::new(opts),
            log: AttemptLog::new(logging),
        }
    }

    /// Append `chunk` and try to assemble the whole buffer into a value.
    ///
    /// A strict parse of the buffer is tried first; the repair engine only
    /// runs when that fails. Repair failure is reported as
    /// [`Progress::Incomplete`], never as an error: at this layer "could not
    /// repair" is indistinguishable from "still truncated". Only a caller
    /// that knows the stream has ended can declare the document permanently
    /// malformed.
    pub fn push(&mut self, chunk: &str) -> Progress {
        self.buf.push_str(chunk);
        match serde_json::from_str(&self.buf) {
            Ok(value) => return Progress::Complete(value),
            Err(err) => self.log.note(0, "strict parse failed", err.to_string()),
        }
        match self.engine.repair_logged(&self.buf, &mut self.log) {
            Ok(repaired) => match serde_json::from_str(&repaired) {
                Ok(value) => Progress::Complete(value),
                // repair output is verified, never trusted
                Err(err) => {
                    self.log.note(0, "repaired text failed to parse", err.to_string());
                    Progress::Incomplete
                }
            },
            Err(_) => Progress::Incomplete,
        }
    }

    /// The text accumulated so far.
    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// Drain the attempt log collected since the last call. Empty unless
    /// `Options::logging` is enabled.
    pub fn take_log(&mut self) -> Vec<RepairLogEntry> {
        self.log.take()
    }
}

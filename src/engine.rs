use crate::error::UnrepairableError;
use crate::heuristics::{close_unbalanced_quote, extract_fenced_block};
use crate::options::Options;
use crate::scan::{self, BufferState};
use jsonrepair::{RepairError, RepairErrorKind};
use std::borrow::Cow;

/// One recorded parse/repair step. Collected only when `Options::logging`
/// is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairLogEntry {
    /// Attempt number within a single ingest; 0 is the strict parse pass,
    /// repair attempts count from 1.
    pub attempt: u32,
    pub message: &'static str,
    pub detail: String,
}

#[derive(Debug, Default)]
pub(crate) struct AttemptLog {
    enable: bool,
    entries: Vec<RepairLogEntry>,
}

impl AttemptLog {
    pub(crate) fn new(enable: bool) -> Self {
        Self {
            enable,
            entries: Vec::new(),
        }
    }

    pub(crate) fn disabled() -> Self {
        Self::new(false)
    }

    pub(crate) fn note(&mut self, attempt: u32, message: &'static str, detail: String) {
        if self.enable {
            self.entries.push(RepairLogEntry {
                attempt,
                message,
                detail,
            });
        }
    }

    pub(crate) fn take(&mut self) -> Vec<RepairLogEntry> {
        std::mem::take(&mut self.entries)
    }
}

/// Bounded parse-or-repair loop: a syntax-level fixer does the heavy
/// lifting, with text heuristics applied between attempts.
///
/// Each attempt operates on a freshly derived string; a failed attempt
/// never mutates caller state.
#[derive(Clone, Debug)]
pub struct RepairEngine {
    opts: Options,
    fixer: jsonrepair::Options,
}

impl RepairEngine {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            fixer: jsonrepair::Options::default(),
        }
    }

    /// Turn `text` into a valid JSON string, or report why it cannot be
    /// done. Input that is already valid JSON comes back unchanged on the
    /// first attempt.
    pub fn repair(&self, text: &str) -> Result<String, UnrepairableError> {
        self.repair_logged(text, &mut AttemptLog::disabled())
    }

    pub(crate) fn repair_logged(
        &self,
        text: &str,
        log: &mut AttemptLog,
    ) -> Result<String, UnrepairableError> {
        if serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok() {
            log.note(1, "input already valid", String::new());
            return Ok(text.to_string());
        }

        let mut candidate: Cow<'_, str> = Cow::Borrowed(text);
        let mut remaining = self.opts.max_repair_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            match self.attempt(&candidate) {
                Ok(repaired) => {
                    log.note(attempt, "repair succeeded", String::new());
                    return Ok(repaired);
                }
                Err(err) if remaining > 1 => {
                    log.note(attempt, "repair failed, deriving new candidate", err.to_string());
                    candidate = Cow::Owned(self.derive_candidate(&candidate));
                    remaining -= 1;
                    attempt += 1;
                }
                Err(err) => {
                    log.note(attempt, "repair attempts exhausted", err.to_string());
                    return Err(UnrepairableError {
                        text: text.to_string(),
                        source: err,
                    });
                }
            }
        }
    }

    /// The fixer force-closes open containers, so a structurally open
    /// buffer must be rejected here rather than handed down.
    fn attempt(&self, text: &str) -> Result<String, RepairError> {
        match scan::buffer_state(text) {
            BufferState::Closed => jsonrepair::repair_to_string(text, &self.fixer),
            BufferState::Empty | BufferState::Open => Err(RepairError::new(
                RepairErrorKind::UnexpectedEnd,
                text.chars().count(),
            )),
        }
    }

    // Extraction runs before quote balancing: a quote count taken across
    // fence markers is meaningless.
    fn derive_candidate(&self, text: &str) -> String {
        let inner = if self.opts.fenced_code_blocks {
            extract_fenced_block(text)
        } else {
            text
        };
        if self.opts.balance_quotes {
            close_unbalanced_quote(inner).into_owned()
        } else {
            inner.to_string()
        }
    }
}

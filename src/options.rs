#[derive(Clone, Debug)]
pub struct Options {
    /// Repair attempts per ingested fragment before the buffer is reported
    /// as incomplete. Values below 1 are treated as 1.
    pub max_repair_attempts: u32,
    /// Extract the interior of a markdown fenced code block (``` ... ```)
    /// when retrying a failed repair.
    pub fenced_code_blocks: bool,
    /// Append a closing `"` when the text contains an odd number of
    /// unescaped double quotes when retrying a failed repair.
    pub balance_quotes: bool,
    /// Record a log entry per parse/repair attempt. Retrieve entries with
    /// `JsonAccumulator::take_log`.
    pub logging: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_repair_attempts: 3,
            fenced_code_blocks: true,
            balance_quotes: true,
            logging: false,
        }
    }
}

//! Console trait definition
//!
//! Terminal interaction as the commands see it: lines, tables, prompts and
//! the transfer progress loop. The CLI provides the real terminal
//! implementation; tests record what was written.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::progress::ProgressCounter;

/// Interface to the terminal
#[async_trait]
pub trait Console: Send + Sync {
    /// Write a single line of output
    fn write_line(&self, line: &str);

    /// Render rows as an aligned table; the first row is the header
    fn write_table(&self, rows: &[Vec<String>]);

    /// Ask a yes/no question
    fn confirm(&self, prompt: &str) -> bool;

    /// Prompt for a line of input
    fn ask(&self, prompt: &str) -> String;

    /// Run a progress indicator for an in-flight transfer
    ///
    /// Samples `position` at a fixed interval until it reaches `total` or
    /// `stop` fires. Polling is best-effort telemetry; the position is
    /// monotonically non-decreasing but intermediate values may be skipped.
    async fn transfer_progress(
        &self,
        label: &str,
        total: u64,
        position: ProgressCounter,
        stop: CancellationToken,
    );
}

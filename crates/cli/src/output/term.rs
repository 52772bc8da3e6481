//! Terminal console
//!
//! Tables render through comfy-table with bare alignment, prompts go
//! through the console crate, and transfer progress is an indicatif bar
//! fed by polling the shared byte position.

use std::time::Duration;

use async_trait::async_trait;
use console::Term;
use tokio_util::sync::CancellationToken;

use bsh_core::{Console, ProgressCounter};

/// Interval between samples of an in-flight transfer's byte position
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for TermConsole {
    fn write_line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    fn write_table(&self, rows: &[Vec<String>]) {
        let mut table = comfy_table::Table::new();
        table.load_preset(comfy_table::presets::NOTHING);
        for row in rows {
            table.add_row(row.clone());
        }
        let _ = self.term.write_line(&table.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        let answer = self.ask(&format!("{prompt} [y/n]"));
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn ask(&self, prompt: &str) -> String {
        let _ = self.term.write_str(prompt);
        if !prompt.ends_with(' ') {
            let _ = self.term.write_str(" ");
        }
        self.term.read_line().unwrap_or_default()
    }

    async fn transfer_progress(
        &self,
        label: &str,
        total: u64,
        position: ProgressCounter,
        stop: CancellationToken,
    ) {
        let bar = indicatif::ProgressBar::new(total);
        bar.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{msg} {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        bar.set_message(label.to_string());
        bar.set_position(position.get());

        loop {
            bar.set_position(position.get());
            if position.get() >= total || stop.is_cancelled() {
                break;
            }
            tokio::select! {
                _ = stop.cancelled() => {}
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }

        bar.set_position(position.get());
        bar.finish();
    }
}

//! Shared pieces of the transfer engine
//!
//! A transfer runs as a spawned copy task plus the console progress loop,
//! coupled by a shared byte-position counter and a pair of cancellation
//! tokens: `cancel` is flipped by the operator interrupt, and its child
//! `stop` fires on either interrupt or copy completion so the progress
//! loop always terminates.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Tokens scoping one transfer: (`cancel`, `stop`)
///
/// `stop` is a child of `cancel`: an interrupt fires both, while copy
/// completion fires only `stop`.
pub(crate) fn transfer_tokens() -> (CancellationToken, CancellationToken) {
    let cancel = CancellationToken::new();
    let stop = cancel.child_token();
    (cancel, stop)
}

/// Watches for the operator interrupt for the duration of one transfer
///
/// Dropping the guard removes the watcher, so an interrupt outside a
/// transfer never affects later commands.
pub(crate) struct InterruptGuard {
    watcher: JoinHandle<()>,
}

impl InterruptGuard {
    pub fn new(cancel: &CancellationToken) -> Self {
        let cancel = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
        Self { watcher }
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

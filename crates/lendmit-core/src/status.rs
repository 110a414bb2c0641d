// ── Observable operation status ──
//
// Each synchronizer publishes a `SyncStatus` through a `watch` channel.
// The fields are last-writer-wins: overlapping calls on one synchronizer
// can interleave their updates.

use tokio::sync::watch;

/// Loading flag plus the last error / informational message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

pub(crate) struct StatusCell {
    tx: watch::Sender<SyncStatus>,
}

impl StatusCell {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(SyncStatus::default());
        Self { tx }
    }

    pub(crate) fn snapshot(&self) -> SyncStatus {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.tx.subscribe()
    }

    /// Enter an operation: clear prior messages and raise `loading`
    /// until the returned guard drops.
    pub(crate) fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.info = None;
        });
        LoadingGuard { cell: self }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| s.error = Some(message));
    }

    pub(crate) fn set_info(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| s.info = Some(message));
    }

    pub(crate) fn clear_error(&self) {
        self.tx.send_modify(|s| s.error = None);
    }

    /// Replace both messages without touching `loading`.
    pub(crate) fn set_messages(&self, error: Option<String>, info: Option<String>) {
        self.tx.send_modify(|s| {
            s.error = error;
            s.info = info;
        });
    }
}

/// Lowers the loading flag on every exit path, `?` included.
pub(crate) struct LoadingGuard<'a> {
    cell: &'a StatusCell,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.cell.tx.send_modify(|s| s.loading = false);
    }
}

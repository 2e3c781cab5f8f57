//! Terminal bindings for the refresh gesture's side effects.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::gesture::{Haptics, ReloadTrigger};

/// Reload requests are queued to the event loop, which owns the fetch.
#[derive(Clone)]
pub struct ChannelReload {
    tx: UnboundedSender<()>,
}

impl ChannelReload {
    pub fn new(tx: UnboundedSender<()>) -> Self {
        Self { tx }
    }
}

impl ReloadTrigger for ChannelReload {
    fn request_reload(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Reload requested after the event loop stopped");
        }
    }
}

/// The terminal bell is the closest thing a terminal has to a vibration motor.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Haptics for TerminalBell {
    fn is_supported(&self) -> bool {
        self.enabled
    }

    /// A bell has no length, so `duration` is only logged.
    fn pulse(&self, duration: Duration) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!("Bell failed: {}", e);
            return;
        }
        tracing::trace!("Bell for {:?}", duration);
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_reload_is_queued() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reload = ChannelReload::new(tx);

        reload.request_reload();
        reload.request_reload();

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reload_after_receiver_dropped_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelReload::new(tx).request_reload();
    }

    #[test]
    fn test_disabled_bell_is_unsupported() {
        assert!(!TerminalBell::new(false).is_supported());
        assert!(TerminalBell::new(true).is_supported());
    }
}

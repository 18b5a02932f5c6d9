use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Pause before a question appears.
pub const TYPING_DELAY: Duration = Duration::from_millis(1000);
/// Pause between "Section complete" and closing the chat.
pub const CLOSE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    Elapsed,
    Cancelled,
}

/// Cosmetic pause; `Headless` never waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingDelay {
    Interactive(Duration),
    Headless,
}

impl TypingDelay {
    /// Sleep for the configured duration unless `canceller` fires first.
    pub async fn wait(self, canceller: &DelayCanceller) -> DelayOutcome {
        let mut rx = canceller.subscribe();
        if *rx.borrow_and_update() {
            return DelayOutcome::Cancelled;
        }
        match self {
            Self::Headless => DelayOutcome::Elapsed,
            Self::Interactive(duration) => {
                tokio::select! {
                    () = tokio::time::sleep(duration) => DelayOutcome::Elapsed,
                    _ = rx.wait_for(|cancelled| *cancelled) => DelayOutcome::Cancelled,
                }
            }
        }
    }
}

/// Cancels one pending delay. Cloning shares the same signal.
#[derive(Debug, Clone)]
pub struct DelayCanceller {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for DelayCanceller {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayCanceller {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

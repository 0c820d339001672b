use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};

/// Lifecycle of the engine's most recent render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
    Complete,
    Cancelled,
}

/// Published to every [`subscribe`](super::FractalEngine::subscribe)r.
///
/// Within one pass, `Progress` values never decrease. A new pass or a cancel
/// publishes `Progress` with `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderEvent {
    Progress { generation: u64, progress: f64 },
    Complete { generation: u64 },
    Cancelled { generation: u64 },
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Progress { generation, .. } | Self::Complete { generation } | Self::Cancelled { generation } => {
                *generation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every chunk settled; failed chunks count as settled.
    Complete,
    /// A cancel, a newer render or a preview superseded the pass.
    Cancelled,
    /// The surface had no size, so nothing was dispatched.
    Skipped,
}

/// Settles once with the outcome of one render pass.
#[derive(Debug)]
pub struct RenderHandle {
    generation: u64,
    receiver: Receiver<RenderOutcome>,
}

impl RenderHandle {
    pub(crate) fn new(generation: u64, receiver: Receiver<RenderOutcome>) -> Self {
        Self { generation, receiver }
    }

    pub(crate) fn settled(generation: u64, outcome: RenderOutcome) -> Self {
        let (sender, receiver) = channel::bounded(1);
        let _ = sender.send(outcome);
        Self { generation, receiver }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Blocks until the pass settles. An engine dropped mid-pass reads as
    /// cancelled.
    pub fn wait(self) -> RenderOutcome {
        self.receiver.recv().unwrap_or(RenderOutcome::Cancelled)
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<RenderOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(RenderOutcome::Cancelled),
        }
    }

    pub fn try_outcome(&self) -> Option<RenderOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(RenderOutcome::Cancelled),
        }
    }
}

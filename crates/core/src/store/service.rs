//! State store - owns the authoritative snapshot

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::state::{reduce, AppState, Command};

/// Message-passing state container
///
/// Owns the authoritative `AppState` and publishes every new snapshot over
/// a watch channel. Snapshots are immutable; observers share the `Arc`
/// rather than cloning state.
pub struct Store {
    snapshots: watch::Sender<Arc<AppState>>,
}

impl Store {
    /// Create a store seeded with an initial state
    pub fn new(initial: AppState) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(initial));
        Self { snapshots }
    }

    /// Apply a command using the current wall clock
    pub fn dispatch(&self, command: Command) -> Arc<AppState> {
        self.dispatch_at(command, Utc::now())
    }

    /// Apply a command with an explicit mutation timestamp
    ///
    /// The reduction runs under the channel's write lock, so concurrent
    /// dispatches serialize instead of losing updates. Returns the snapshot
    /// current once the command has been applied.
    pub fn dispatch_at(&self, command: Command, now: DateTime<Utc>) -> Arc<AppState> {
        debug!("dispatching {:?}", command);
        self.snapshots.send_modify(|state| *state = Arc::new(reduce(state, command, now)));
        self.snapshots.borrow().clone()
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> Arc<AppState> {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to state snapshots
    ///
    /// The receiver starts at the snapshot current at subscription time and
    /// observes every later one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.snapshots.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

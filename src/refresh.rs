//! Background data refresh system
//!
//! Station fetches run as tokio tasks and report back over a channel that the
//! event loop drains, so the UI keeps handling input while a fetch is in
//! flight. Fetches are never cancelled; results are applied in the order they
//! complete.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::{StationProvider, StationSnapshot};

/// Messages sent from background fetches to the main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A fetch finished with this station list
    StationsLoaded {
        /// Sequence number of the request that produced the list
        request: u64,
        stations: Vec<StationSnapshot>,
    },
}

/// Handle owning the result channel for background fetches
pub struct RefreshHandle {
    sender: mpsc::Sender<RefreshMessage>,
    receiver: mpsc::Receiver<RefreshMessage>,
    next_request: u64,
}

impl Default for RefreshHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshHandle {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            sender,
            receiver,
            next_request: 0,
        }
    }

    /// Starts one provider call in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetch(&mut self, provider: Arc<dyn StationProvider>) -> JoinHandle<()> {
        let request = self.next_request;
        self.next_request += 1;
        let tx = self.sender.clone();

        tokio::spawn(async move {
            let stations = provider.get_stations().await;
            tracing::debug!(request, count = stations.len(), "Station fetch finished");
            let _ = tx
                .send(RefreshMessage::StationsLoaded { request, stations })
                .await;
        })
    }

    /// Number of fetches started so far
    pub fn requests_started(&self) -> u64 {
        self.next_request
    }

    /// Returns a completed result without blocking, if one is pending
    pub fn try_recv(&mut self) -> Option<RefreshMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next completed result
    pub async fn recv(&mut self) -> Option<RefreshMessage> {
        self.receiver.recv().await
    }
}

/// Interval-based trigger for automatic refreshes
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Option<Duration>,
    last: Instant,
}

impl RefreshSchedule {
    /// Creates a schedule; `None` disables automatic refresh
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Restarts the interval from `now`
    pub fn mark(&mut self, now: Instant) {
        self.last = now;
    }

    /// Returns true once the interval has elapsed since the last mark
    pub fn is_due(&self, now: Instant) -> bool {
        match self.interval {
            Some(interval) => now.saturating_duration_since(self.last) >= interval,
            None => false,
        }
    }
}

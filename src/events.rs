//! In-process pub/sub for data refreshes.
//!
//! One [`EventBus`] is created per application lifetime and handed to
//! whatever produces or consumes refreshes; there is no module-level
//! listener state.

use tokio::sync::broadcast;

/// Events emitted as sources are re-read and summaries recomputed.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// A source was (re-)loaded; `entries` is the normalized entry count.
    JourneysRefreshed { source: String, entries: usize },
    /// A summary was recomputed over the latest entries.
    SummaryUpdated {
        source: String,
        total_revenue: f64,
        average_delay: f64,
    },
    /// A refresh attempt failed; the previous data remains current.
    RefreshFailed { source: String, error: String },
}

/// Broadcast bus for [`DashboardEvent`]s. Cloning is cheap; all clones
/// publish into the same channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Creates a bus retaining up to `capacity` undelivered events per
    /// subscriber; slow subscribers skip lagged events rather than block
    /// publishers.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event, returning how many subscribers received it.
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

//! Dashboard counters.

use std::cell::Cell;

use crate::{
    entities::Stats,
    gateways::{GatewayError, StatsGateway, StatsRefresh},
};

/// Caches the last known counters.
///
/// A refresh signal only marks them outdated,
/// the owner decides when to [`reload`](Self::reload).
#[derive(Debug)]
pub struct StatsTracker {
    current: Cell<Stats>,
    stale: Cell<bool>,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self {
            current: Cell::new(Stats::default()),
            stale: Cell::new(true),
        }
    }
}

impl StatsTracker {
    pub fn current(&self) -> Stats {
        self.current.get()
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Fetches the counters and keeps the previous ones on failure.
    pub async fn reload<G: StatsGateway>(&self, gateway: &G) -> Result<Stats, GatewayError> {
        match gateway.fetch_stats().await {
            Ok(stats) => {
                log::debug!("Reloaded stats: {stats:?}");
                self.current.set(stats);
                self.stale.set(false);
                Ok(stats)
            }
            Err(err) => {
                log::warn!("Unable to load stats: {err}");
                Err(err)
            }
        }
    }

    /// Reloads only if the counters are outdated.
    pub async fn reload_if_stale<G: StatsGateway>(&self, gateway: &G) -> Result<Stats, GatewayError> {
        if !self.is_stale() {
            return Ok(self.current());
        }
        self.reload(gateway).await
    }
}

impl StatsRefresh for StatsTracker {
    fn refresh(&self) {
        self.stale.set(true);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::gateways::Result as GatewayResult;

    #[derive(Default)]
    struct MockStats {
        calls: Cell<usize>,
        down: Cell<bool>,
    }

    impl StatsGateway for MockStats {
        async fn fetch_stats(&self) -> GatewayResult<Stats> {
            let calls = self.calls.get() + 1;
            self.calls.set(calls);
            if self.down.get() {
                return Err(GatewayError::Transport("timeout".into()));
            }
            Ok(Stats {
                users: 3,
                transports: calls as u64,
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn refresh_marks_stale() {
        let tracker = StatsTracker::default();
        let api = MockStats::default();
        assert!(tracker.is_stale());
        tracker.reload_if_stale(&api).await.unwrap();
        assert!(!tracker.is_stale());
        tracker.reload_if_stale(&api).await.unwrap();
        assert_eq!(api.calls.get(), 1);

        tracker.refresh();
        assert!(tracker.is_stale());
        let stats = tracker.reload_if_stale(&api).await.unwrap();
        assert_eq!(stats.transports, 2);
        assert_eq!(tracker.current(), stats);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_counters() {
        let tracker = StatsTracker::default();
        let api = MockStats::default();
        let before = tracker.reload(&api).await.unwrap();
        tracker.refresh();
        api.down.set(true);
        assert!(tracker.reload(&api).await.is_err());
        assert_eq!(tracker.current(), before);
        assert!(tracker.is_stale());
    }
}

//! Scan progress notifications

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
    pub symbol: String,
    pub produced_candidate: bool,
}

impl ScanProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Receives one update after each ticker. Cannot influence the result.
pub trait ScanObserver: Send + Sync {
    fn on_progress(&self, progress: &ScanProgress);
}

pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn on_progress(&self, _progress: &ScanProgress) {}
}

/// Logs each update at info level
pub struct LoggingObserver;

impl ScanObserver for LoggingObserver {
    fn on_progress(&self, progress: &ScanProgress) {
        info!(
            symbol = %progress.symbol,
            completed = progress.completed,
            total = progress.total,
            candidate = progress.produced_candidate,
            "scan progress {:.0}%",
            progress.fraction() * 100.0
        );
    }
}

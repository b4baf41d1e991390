use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedStatus = Arc<RwLock<MonitorStatus>>;

/// Snapshot published by the monitor after every cycle, read by `/status`
#[derive(Debug, Clone)]
pub struct MonitorStatus {
    pub last_check: Option<DateTime<Local>>,
    pub known_boosts: usize,
    pub check_interval_seconds: u64,
    pub last_fetch_failed: bool,
}

impl MonitorStatus {
    pub fn new(check_interval_seconds: u64) -> Self {
        Self {
            last_check: None,
            known_boosts: 0,
            check_interval_seconds,
            last_fetch_failed: false,
        }
    }

    pub fn shared(check_interval_seconds: u64) -> SharedStatus {
        Arc::new(RwLock::new(Self::new(check_interval_seconds)))
    }

    pub fn summary(&self) -> String {
        let last_check = self
            .last_check
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        let mut summary = format!(
            "📊 Monitor Status:\nLast check: {}\nKnown boosts: {}\nCheck interval: {} seconds",
            last_check, self.known_boosts, self.check_interval_seconds
        );
        if self.last_fetch_failed {
            summary.push_str("\nLast fetch failed, retrying next cycle");
        }
        summary
    }
}

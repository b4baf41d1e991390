use chrono::Local;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::time::Duration;

use crate::config::Config;
use crate::models::{MonitorStatus, SeenSet, SharedStatus, TokenBoost};
use crate::services::dexscreener::BoostSource;
use crate::services::formatter::format_boost_message;
use crate::services::notification_handler::Notifier;
use crate::services::sleeper::{Sleeper, TokioSleeper};

/// Outcome of a single fetch → diff → notify pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub fetch_failed: bool,
}

/// Polls the boost feed and announces every token not seen before.
///
/// Delivery is at-least-once within a run: an address enters the seen set
/// only after its notification was accepted, so a failed send is retried on
/// the next cycle that still lists the token. Nothing survives a restart.
pub struct BoostMonitor<S, N, Z = TokioSleeper> {
    source: S,
    notifier: N,
    sleeper: Z,
    seen: SeenSet,
    check_interval: Duration,
    enrich_token_info: bool,
    status: SharedStatus,
}

impl<S, N> BoostMonitor<S, N, TokioSleeper>
where
    S: BoostSource,
    N: Notifier,
{
    pub fn from_config(source: S, notifier: N, config: &Config) -> Self {
        Self::new(source, notifier, TokioSleeper, config.monitor.check_interval())
            .with_enrichment(config.dexscreener.enrich_token_info)
    }
}

impl<S, N, Z> BoostMonitor<S, N, Z>
where
    S: BoostSource,
    N: Notifier,
    Z: Sleeper,
{
    pub fn new(source: S, notifier: N, sleeper: Z, check_interval: Duration) -> Self {
        Self {
            source,
            notifier,
            sleeper,
            seen: SeenSet::new(),
            check_interval,
            enrich_token_info: true,
            status: MonitorStatus::shared(check_interval.as_secs()),
        }
    }

    pub fn with_enrichment(mut self, enabled: bool) -> Self {
        self.enrich_token_info = enabled;
        self
    }

    pub fn status(&self) -> SharedStatus {
        self.status.clone()
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Runs cycles back to back, sleeping `check_interval` after each one.
    /// Only returns if the surrounding task is dropped.
    pub async fn run_forever(&mut self) {
        info!(
            "Starting boost monitor, checking every {} seconds",
            self.check_interval.as_secs()
        );

        loop {
            let report = self.run_cycle().await;
            if !report.fetch_failed {
                info!(
                    "Cycle done: {} fetched, {} sent, {} failed, {} skipped, {} known",
                    report.fetched,
                    report.sent,
                    report.failed,
                    report.skipped,
                    self.seen.len()
                );
            }
            self.sleeper.sleep(self.check_interval).await;
        }
    }

    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        let boosts = match self.source.fetch_boosted_tokens().await {
            Ok(boosts) => boosts,
            Err(e) => {
                error!("Failed to fetch boosted tokens: {}", e);
                report.fetch_failed = true;
                self.publish_status(&report).await;
                return report;
            }
        };
        report.fetched = boosts.len();

        // one attempt per address per snapshot, even when the send fails
        let mut attempted: HashSet<&str> = HashSet::new();

        for boost in &boosts {
            let address = boost.token_address.trim();
            if address.is_empty() {
                warn!("Skipping boost on {} without a token address", boost.chain_id);
                report.skipped += 1;
                continue;
            }
            if self.seen.contains(address) || !attempted.insert(address) {
                debug!("Boost for {} already announced, skipping", address);
                report.skipped += 1;
                continue;
            }

            let message = self.build_message(boost).await;
            match self.notifier.send_message(&message).await {
                Ok(()) => {
                    self.seen.insert(address);
                    report.sent += 1;
                    info!("Announced boost for {} on {}", address, boost.chain_id);
                }
                Err(e) => {
                    error!(
                        "Failed to send notification for {} on {}: {}",
                        address, boost.chain_id, e
                    );
                    report.failed += 1;
                }
            }
        }

        self.publish_status(&report).await;
        report
    }

    async fn build_message(&self, boost: &TokenBoost) -> String {
        if !self.enrich_token_info {
            return format_boost_message(boost, None);
        }

        match self
            .source
            .fetch_token_info(&boost.chain_id, &boost.token_address)
            .await
        {
            Ok(Some(info)) => format_boost_message(boost, Some(&info)),
            Ok(None) => {
                debug!("No pairs listed yet for {}", boost.token_address);
                format_boost_message(boost, None)
            }
            Err(e) => {
                warn!(
                    "Failed to fetch token info for {}, sending without market data: {}",
                    boost.token_address, e
                );
                format_boost_message(boost, None)
            }
        }
    }

    async fn publish_status(&self, report: &CycleReport) {
        let mut status = self.status.write().await;
        status.last_check = Some(Local::now());
        status.known_boosts = self.seen.len();
        status.last_fetch_failed = report.fetch_failed;
    }
}

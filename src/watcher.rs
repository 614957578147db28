//! Polling loop and cooldown state machine
//!
//! Strictly sequential: one location fetched and evaluated at a time. A
//! fetch failure aborts the remainder of the cycle; a page puts the loop
//! into cooldown for exactly one sleep.

use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::availability::{select_available, AvailabilityClient, FetchError};
use crate::pager::{PagerClient, ALERT_SUMMARY};

/// Loop timing knobs
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Sleep before a cycle under normal conditions
    pub poll_interval: Duration,
    /// Sleep before the cycle that follows a page
    pub cooldown_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            cooldown_interval: Duration::from_secs(30 * 60),
        }
    }
}

/// Sleep regime for the next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Normal,
    Cooldown,
}

impl LoopState {
    /// Sleep applied before the next cycle under this state
    pub fn sleep_duration(&self, config: &WatcherConfig) -> Duration {
        match self {
            LoopState::Normal => config.poll_interval,
            LoopState::Cooldown => config.cooldown_interval,
        }
    }
}

/// Result of one full pass over the configured location codes
#[derive(Debug)]
pub enum CycleOutcome {
    /// Every location was fetched and evaluated
    Completed { alerted: bool },
    /// A fetch failed; the remaining locations were not evaluated
    Aborted {
        location: String,
        error: FetchError,
        alerted: bool,
    },
}

impl CycleOutcome {
    /// True when at least one page went out during the cycle
    pub fn alerted(&self) -> bool {
        match self {
            CycleOutcome::Completed { alerted } | CycleOutcome::Aborted { alerted, .. } => *alerted,
        }
    }

    /// State governing the sleep before the next cycle.
    ///
    /// A cycle that paged cools down even if a later location aborted it.
    pub fn next_state(&self) -> LoopState {
        if self.alerted() {
            LoopState::Cooldown
        } else {
            LoopState::Normal
        }
    }
}

/// The sequential poll-evaluate-alert loop
pub struct Watcher {
    client: AvailabilityClient,
    pager: PagerClient,
    center_codes: Vec<String>,
    routing_key: String,
    config: WatcherConfig,
}

impl Watcher {
    pub fn new(
        client: AvailabilityClient,
        pager: PagerClient,
        center_codes: Vec<String>,
        routing_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            pager,
            center_codes,
            routing_key: routing_key.into(),
            config: WatcherConfig::default(),
        }
    }

    /// Override the default timing
    pub fn with_config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the loop until the process is killed. Nothing inside a cycle is
    /// fatal; every failure is logged and the loop sleeps and goes again.
    pub async fn run(self) {
        let mut state = LoopState::Normal;
        loop {
            tokio::time::sleep(state.sleep_duration(&self.config)).await;

            let outcome = self.run_cycle(Local::now().date_naive()).await;
            match &outcome {
                CycleOutcome::Completed { alerted: false } => {
                    tracing::info!("No bookable slots at any monitored location");
                }
                CycleOutcome::Completed { alerted: true } => {}
                CycleOutcome::Aborted { location, error, .. } => {
                    tracing::error!(
                        location = %location,
                        error = %error,
                        "Cycle aborted, remaining locations skipped until next cycle"
                    );
                }
            }
            state = outcome.next_state();
        }
    }

    /// One pass over all location codes, in configured order, for `date`.
    ///
    /// A match pages and keeps going, so several locations in the same
    /// cycle can each page independently.
    pub async fn run_cycle(&self, date: NaiveDate) -> CycleOutcome {
        let mut alerted = false;

        for code in &self.center_codes {
            let report = match self.client.fetch(code, date).await {
                Ok(report) => report,
                Err(error) => {
                    return CycleOutcome::Aborted {
                        location: code.clone(),
                        error,
                        alerted,
                    };
                }
            };

            let available = select_available(&report);
            if available.is_empty() {
                continue;
            }

            tracing::info!(
                location = %code,
                centers = available.len(),
                "Bookable slots found, paging"
            );
            // Delivery failure is not fatal; the hit is already logged and
            // the next cycle will page again if slots are still open.
            match self.pager.trigger(&self.routing_key, ALERT_SUMMARY).await {
                Ok(ack) => {
                    tracing::info!(response = %ack, "Paging endpoint acknowledged trigger");
                }
                Err(error) => {
                    tracing::error!(error = %error, "Failed to deliver page");
                }
            }
            alerted = true;
        }

        CycleOutcome::Completed { alerted }
    }
}

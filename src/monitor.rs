//! Polling loop driving the tracker on a fixed schedule

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::StampError;
use crate::front_matter::FrontMatterFormat;
use crate::scanner::DocumentWalker;
use crate::stamper::DateUpdater;
use crate::tracker::Tracker;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Fixed delay between cycles, cut short by a shutdown request
#[derive(Debug, Clone)]
pub struct Schedule {
    interval: Duration,
    shutdown: CancellationToken,
}

impl Schedule {
    pub fn new(interval: Duration, shutdown: CancellationToken) -> Self {
        Self { interval, shutdown }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Sleep one interval. Returns `false` if shutdown was requested first.
    pub async fn wait(&self) -> bool {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            _ = tokio::time::sleep(self.interval) => true,
        }
    }
}

pub struct Monitor<C = SystemClock> {
    tracker: Tracker,
    updater: DateUpdater<C>,
}

impl Monitor<SystemClock> {
    /// Build a monitor using the wall clock
    pub fn from_config(config: &Config) -> Result<Self, StampError> {
        let walker = DocumentWalker::new(&config.watch.root)
            .with_extensions(config.watch.extensions.clone());
        let format =
            FrontMatterFormat::new(&config.front_matter.marker, &config.front_matter.date_key)?;
        Ok(Self::new(Tracker::new(walker), DateUpdater::new(format)))
    }
}

impl<C: Clock> Monitor<C> {
    pub fn new(tracker: Tracker, updater: DateUpdater<C>) -> Self {
        Self { tracker, updater }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Check the root and record the documents already present
    pub fn start(&mut self) -> Result<usize, StampError> {
        self.tracker.walker().ensure_root()?;
        let count = self.tracker.initialize()?;
        tracing::info!("Tracking {} documents, dates update only when content changes", count);
        Ok(count)
    }

    /// Initialize, then scan once per interval until shutdown.
    ///
    /// Returns the number of completed scan cycles. A cycle in progress always
    /// runs to completion before shutdown is honoured.
    pub async fn run(&mut self, schedule: &Schedule) -> Result<u64, StampError> {
        self.start()?;

        let mut cycles = 0u64;
        while !schedule.shutdown_requested() {
            let report = self.tracker.scan_cycle(&self.updater);
            cycles += 1;
            if !report.is_quiet() {
                tracing::debug!("Cycle {}: {:?}", cycles, report);
            }

            if !schedule.wait().await {
                break;
            }
        }

        tracing::debug!("Stopped after {} cycles", cycles);
        Ok(cycles)
    }
}

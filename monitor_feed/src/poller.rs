//! Periodic polling loop.
//!
//! A `Poller` owns one control thread. The thread runs a cycle immediately, then
//! once per interval, and publishes each `CycleReport` on a crossbeam channel.
//! Crossbeam `select!` multiplexes three inputs:
//!
//! - the interval `tick` channel;
//! - manual refresh requests from the UI;
//! - shutdown (explicit signal or the handle being dropped).
//!
//! Cycles never overlap. The tick channel holds at most one pending tick, so ticks
//! that fire while a slow cycle is running collapse into a single follow-up cycle.
//! Refresh requests are kept until the running cycle ends, whatever started it, and
//! all requests queued by then are served by one follow-up cycle.

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, select, tick, unbounded};
use log::{debug, error, info};
use monitor_common::{MonitorError, QuoteRow, Result};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::aggregator::BatchAggregator;
use crate::clock::{ClockSnapshot, WorldClock};

/// Successful cycle output.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Instant the cycle started.
    pub captured_at: DateTime<Utc>,
    /// Clock panels for `captured_at`.
    pub clocks: ClockSnapshot,
    /// Sorted table, one row per configured symbol.
    pub rows: Vec<QuoteRow>,
}

/// Outcome of one cycle as seen by the renderer.
#[derive(Debug, Clone)]
pub enum CycleReport {
    /// Fresh table; replaces the displayed rows.
    Updated(Snapshot),
    /// The cycle as a whole failed; clocks still advance, rows stay as they were.
    Failed {
        /// Clock panels for the failed cycle.
        clocks: ClockSnapshot,
        /// Error text for the status line.
        reason: String,
    },
}

/// One fetch-all → sort pass plus the clock panels.
pub struct Cycle {
    aggregator: BatchAggregator,
    clock: WorldClock,
}

impl Cycle {
    /// Combine an aggregator and a clock.
    pub fn new(aggregator: BatchAggregator, clock: WorldClock) -> Self {
        Self { aggregator, clock }
    }

    /// Underlying aggregator.
    pub fn aggregator(&self) -> &BatchAggregator {
        &self.aggregator
    }

    /// Run a single cycle for `now`.
    pub fn run(&self, now: DateTime<Utc>) -> CycleReport {
        let clocks = self.clock.snapshot(now);
        match self.aggregator.collect(now) {
            Ok(rows) => CycleReport::Updated(Snapshot {
                captured_at: now,
                clocks,
                rows,
            }),
            Err(e) => {
                error!("Update cycle failed: {}", e);
                CycleReport::Failed {
                    clocks,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Handle to a running poller thread.
pub struct PollerHandle {
    reports: Receiver<CycleReport>,
    refresh_tx: Sender<()>,
    shutdown_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Channel carrying one report per completed cycle.
    pub fn reports(&self) -> &Receiver<CycleReport> {
        &self.reports
    }

    /// Ask for an extra cycle as soon as the current one finishes.
    ///
    /// Requests made while a cycle is running are merged into one extra cycle.
    pub fn refresh(&self) -> Result<()> {
        self.refresh_tx
            .send(())
            .map_err(|e| MonitorError::ChannelSend(format!("refresh request: {e}")))
    }

    /// Stop the poller and wait for the in-flight cycle to finish.
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| MonitorError::Worker("poller thread panicked".into()))?;
        }
        Ok(())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Periodic trigger for update cycles.
pub struct Poller;

impl Poller {
    /// Spawn the control thread and run the first cycle right away.
    pub fn start(cycle: Cycle, interval: Duration) -> Result<PollerHandle> {
        let (report_tx, report_rx) = unbounded::<CycleReport>();
        let (refresh_tx, refresh_rx) = unbounded::<()>();
        let (shutdown_tx, shutdown_rx) = unbounded::<()>();
        let symbol_count = cycle.aggregator().symbols().len();

        let thread = thread::Builder::new()
            .name("poller".into())
            .spawn(move || {
                Self::run_loop(cycle, interval, report_tx, refresh_rx, shutdown_rx)
            })?;

        info!("Poller started: {} symbols every {:?}", symbol_count, interval);

        Ok(PollerHandle {
            reports: report_rx,
            refresh_tx,
            shutdown_tx,
            thread: Some(thread),
        })
    }

    fn run_loop(
        cycle: Cycle,
        interval: Duration,
        report_tx: Sender<CycleReport>,
        refresh_rx: Receiver<()>,
        shutdown_rx: Receiver<()>,
    ) {
        let ticker = tick(interval);

        if !Self::publish(&cycle, &report_tx) {
            return;
        }

        loop {
            select! {
                recv(shutdown_rx) -> _ => break,
                recv(ticker) -> _ => {
                    if !Self::publish(&cycle, &report_tx) {
                        break;
                    }
                },
                recv(refresh_rx) -> msg => match msg {
                    Ok(()) => {
                        let merged = refresh_rx.try_iter().count();
                        debug!("Manual refresh requested ({} merged)", merged);
                        if !Self::publish(&cycle, &report_tx) {
                            break;
                        }
                    }
                    Err(_) => break,
                },
            }
        }
        info!("Poller stopping...");
    }

    /// Run one cycle and send its report; `false` once nobody is listening.
    fn publish(cycle: &Cycle, report_tx: &Sender<CycleReport>) -> bool {
        let started = Instant::now();
        let report = cycle.run(Utc::now());
        debug!("Cycle finished in {:?}", started.elapsed());

        if report_tx.send(report).is_err() {
            info!("Report consumer gone");
            return false;
        }
        true
    }
}

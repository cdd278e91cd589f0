//! Quote acquisition engine for the stock monitor.
//!
//! This crate wires together the building blocks of one polling cycle:
//!
//! - `source` — the `QuoteSource` trait every data provider implements.
//! - `yahoo` — blocking client for the Yahoo Finance chart API.
//! - `fetcher` — turns one symbol into exactly one `QuoteRow`, placeholder on failure.
//! - `aggregator` — fans fetches out over a worker pool, joins and sorts the rows.
//! - `clock` — world clock panels shown next to the table.
//! - `poller` — periodic trigger that runs cycles and publishes `CycleReport`s.
#![warn(missing_docs)]
pub mod aggregator;
pub mod clock;
pub mod fetcher;
pub mod poller;
pub mod source;
pub mod yahoo;

pub use aggregator::BatchAggregator;
pub use clock::{ClockPanel, ClockSnapshot, WorldClock};
pub use poller::{Cycle, CycleReport, Poller, PollerHandle, Snapshot};
pub use source::QuoteSource;
pub use yahoo::YahooSource;

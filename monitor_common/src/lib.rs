//!
//! Common types and utilities shared by the feed engine and the dashboard.
//!
//! This crate aggregates:
//! - `error` — unified error type `MonitorError` used across the workspace.
//! - `result` — handy `Result<T, MonitorError>` alias.
//! - `symbols` — configured symbols, categories and the symbol file parser.
//! - `quote` — per-cycle quote rows, trend flags and display formatting.
//! - `net` — data provider endpoints and polling constants.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod quote;
pub mod result;
pub mod symbols;

pub use error::MonitorError;
pub use quote::{DailyBar, QuoteRow, Trend};
pub use result::Result;
pub use symbols::{Category, SymbolSpec};

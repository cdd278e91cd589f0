//! Quote row model and display formatting.
//!
//! A `QuoteRow` is one symbol's computed snapshot for a polling cycle. Rows are
//! rebuilt wholesale every cycle: a fetch either produces a populated row via
//! [`QuoteRow::from_bars`] or the neutral placeholder from [`QuoteRow::unavailable`],
//! so the table always carries exactly one row per configured symbol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::MonitorError;
use crate::symbols::{Category, SymbolSpec};

/// Text shown for any value that could not be fetched.
pub const UNAVAILABLE: &str = "N/A";

/// One daily bar as returned by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Bar start as a Unix timestamp in seconds.
    pub timestamp: i64,
    /// Session open price.
    pub open: f64,
    /// Last or closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
}

/// Direction of a row's price change; drives the row color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Positive change.
    Up,
    /// Negative change.
    Down,
    /// Zero change, including unavailable rows.
    Neutral,
}

/// One symbol's snapshot for a single polling cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Display grouping.
    pub category: Category,
    /// Display name.
    pub name: String,
    /// Provider ticker the row was fetched for.
    pub symbol: String,
    /// Last price, `None` when unavailable.
    pub price: Option<f64>,
    /// Last price minus session open.
    pub change: Option<f64>,
    /// Change relative to the session open, in percent.
    pub change_percent: Option<f64>,
    /// Volume of the latest bar.
    pub volume: Option<u64>,
    /// Wall-clock time of the cycle that produced the row.
    pub captured_at: DateTime<Utc>,
}

impl QuoteRow {
    /// Build a populated row from the provider's bars for `spec`.
    ///
    /// The last price and volume come from the last bar, the session open from the
    /// first one. Fails with `NoData` on an empty bar list and with `Format` when the
    /// open cannot serve as a divisor.
    pub fn from_bars(
        spec: &SymbolSpec,
        bars: &[DailyBar],
        captured_at: DateTime<Utc>,
    ) -> Result<QuoteRow, MonitorError> {
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            return Err(MonitorError::NoData {
                symbol: spec.symbol.clone(),
            });
        };

        let open = first.open;
        if !open.is_finite() || open <= 0.0 {
            return Err(MonitorError::Format(format!(
                "invalid session open {open} for {}",
                spec.symbol
            )));
        }
        if !last.close.is_finite() {
            return Err(MonitorError::Format(format!(
                "invalid last price for {}",
                spec.symbol
            )));
        }

        let change = last.close - open;
        Ok(QuoteRow {
            category: spec.category,
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            price: Some(last.close),
            change: Some(change),
            change_percent: Some(change / open * 100.0),
            volume: Some(last.volume),
            captured_at,
        })
    }

    /// Placeholder row for a symbol whose fetch failed.
    pub fn unavailable(spec: &SymbolSpec, captured_at: DateTime<Utc>) -> QuoteRow {
        QuoteRow {
            category: spec.category,
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            price: None,
            change: None,
            change_percent: None,
            volume: None,
            captured_at,
        }
    }

    /// Whether the row holds fetched data.
    pub fn is_available(&self) -> bool {
        self.price.is_some()
    }

    /// Numeric change used for coloring; unavailable rows count as zero.
    pub fn change_value(&self) -> f64 {
        self.change.unwrap_or(0.0)
    }

    /// Sign of the change.
    pub fn trend(&self) -> Trend {
        let change = self.change_value();
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }

    /// Last price with two decimals.
    pub fn price_text(&self) -> String {
        self.price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// Signed change with two decimals, e.g. `+5.00`.
    pub fn change_text(&self) -> String {
        self.change
            .map(|c| format!("{c:+.2}"))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// Signed percent change, e.g. `-5.00%`.
    pub fn change_percent_text(&self) -> String {
        self.change_percent
            .map(|c| format!("{c:+.2}%"))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// Volume with thousands separators.
    pub fn volume_text(&self) -> String {
        self.volume
            .map(format_thousands)
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }
}

/// Format an integer with `,` between groups of three digits.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Table ordering: category label, then display name, both ascending.
pub fn compare_rows(a: &QuoteRow, b: &QuoteRow) -> Ordering {
    a.category
        .label()
        .cmp(b.category.label())
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort rows into table order.
pub fn sort_rows(rows: &mut [QuoteRow]) {
    rows.sort_by(compare_rows);
}

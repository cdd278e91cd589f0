//! Configured symbols, their categories and the optional symbol file parser.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::BufRead;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::error::MonitorError;

/// Display grouping assigned to each symbol.
///
/// The string form is the label shown in the table and used as the primary sort key,
/// so ordering follows the label text rather than the declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Foreign market indices.
    #[strum(serialize = "International Index")]
    #[serde(rename = "International Index")]
    InternationalIndex,
    /// Taiwan market indices.
    #[strum(serialize = "Taiwan Index")]
    #[serde(rename = "Taiwan Index")]
    TaiwanIndex,
    /// American depositary receipts.
    #[strum(serialize = "ADR")]
    #[serde(rename = "ADR")]
    Adr,
    /// Stocks listed on the Taiwan exchange.
    #[strum(serialize = "Taiwan Stock")]
    #[serde(rename = "Taiwan Stock")]
    TaiwanStock,
}

impl Category {
    /// Display label, also the primary sort key.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// One configured symbol: provider ticker, display name and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Ticker as understood by the data provider (e.g. `^GSPC`, `2330.TW`).
    pub symbol: String,
    /// Human-readable name shown in the table.
    pub name: String,
    /// Display grouping.
    pub category: Category,
}

impl SymbolSpec {
    /// Creates a new symbol entry.
    pub fn new(symbol: &str, name: &str, category: Category) -> Self {
        SymbolSpec {
            symbol: String::from(symbol),
            name: String::from(name),
            category,
        }
    }
}

/// Compiled-in symbol table used when no symbol file is given.
pub fn default_symbols() -> Vec<SymbolSpec> {
    use Category::*;
    vec![
        SymbolSpec::new("^GSPC", "S&P 500", InternationalIndex),
        SymbolSpec::new("^DJI", "Dow Jones", InternationalIndex),
        SymbolSpec::new("^IXIC", "NASDAQ", InternationalIndex),
        SymbolSpec::new("^N225", "Nikkei 225", InternationalIndex),
        SymbolSpec::new("^HSI", "Hang Seng", InternationalIndex),
        SymbolSpec::new("000001.SS", "SSE Composite", InternationalIndex),
        SymbolSpec::new("^FTSE", "FTSE 100", InternationalIndex),
        SymbolSpec::new("^GDAXI", "DAX", InternationalIndex),
        SymbolSpec::new("^TWII", "TAIEX", TaiwanIndex),
        SymbolSpec::new("TSM", "TSMC ADR", Adr),
        SymbolSpec::new("HNHPF", "Hon Hai ADR", Adr),
        SymbolSpec::new("2330.TW", "TSMC", TaiwanStock),
        SymbolSpec::new("2317.TW", "Hon Hai", TaiwanStock),
        SymbolSpec::new("2357.TW", "ASUS", TaiwanStock),
    ]
}

/// Trait providing file parsing for symbol tables.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Each non-empty, non-comment line must read `SYMBOL,Name,Category`.
    /// Returns an error if any line cannot be parsed or a symbol repeats.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<SymbolSpec>, MonitorError>;
}

impl SymbolParser for SymbolSpec {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, MonitorError> {
        let mut symbols = Vec::new();
        let mut seen = HashSet::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(MonitorError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let line_no = index + 1;
            let fields: Vec<&str> = trimmed_line.split(',').map(str::trim).collect();
            let [symbol, name, category] = fields.as_slice() else {
                return Err(MonitorError::ParseSymbolsFile(format!(
                    "line {line_no}: expected `SYMBOL,Name,Category`, got `{trimmed_line}`"
                )));
            };
            if symbol.is_empty() || name.is_empty() {
                return Err(MonitorError::ParseSymbolsFile(format!(
                    "line {line_no}: symbol and name must not be empty"
                )));
            }
            let category = category.parse::<Category>().map_err(|_| {
                MonitorError::ParseSymbolsFile(format!(
                    "line {line_no}: unknown category `{category}`"
                ))
            })?;
            if !seen.insert(symbol.to_string()) {
                return Err(MonitorError::ParseSymbolsFile(format!(
                    "line {line_no}: duplicate symbol `{symbol}`"
                )));
            }

            symbols.push(SymbolSpec::new(symbol, name, category));
        }
        Ok(symbols)
    }
}

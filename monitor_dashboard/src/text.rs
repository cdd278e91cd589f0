//! Plain-text and JSON rendering for the `once` and `stream` modes.

use crossterm::style::{Color, Stylize};
use monitor_common::{QuoteRow, Result};
use monitor_feed::Snapshot;
use serde_json::json;

use crate::app::trend_rgb;

/// Column headers shared with the full-screen table.
pub const HEADERS: [&str; 7] = [
    "Category", "Name", "Price", "Change", "Change%", "Volume", "Updated",
];

/// Cell texts of one row, in `HEADERS` order.
pub fn row_cells(row: &QuoteRow, updated_at: &str) -> [String; 7] {
    [
        row.category.label().to_string(),
        row.name.clone(),
        row.price_text(),
        row.change_text(),
        row.change_percent_text(),
        row.volume_text(),
        updated_at.to_string(),
    ]
}

/// Render the clock line and the table as aligned text.
///
/// Category and name are left-aligned, numbers right-aligned. With `color` set each
/// row is painted with its trend color.
pub fn render_table(snapshot: &Snapshot, color: bool) -> String {
    let updated_at = snapshot.clocks.update_time.as_str();
    let cells: Vec<[String; 7]> = snapshot
        .rows
        .iter()
        .map(|row| row_cells(row, updated_at))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let clocks: Vec<String> = snapshot
        .clocks
        .panels
        .iter()
        .map(|p| {
            if p.caption.is_empty() {
                format!("{}: {}", p.title, p.time)
            } else {
                format!("{} ({}): {}", p.title, p.caption, p.time)
            }
        })
        .collect();

    let mut out = String::new();
    out.push_str(&clocks.join(" | "));
    out.push('\n');
    out.push_str(&format_line(&HEADERS.map(String::from), &widths));
    out.push('\n');

    for (row, cell) in snapshot.rows.iter().zip(&cells) {
        let line = format_line(cell, &widths);
        if color {
            let (r, g, b) = trend_rgb(row.trend());
            out.push_str(&line.with(Color::Rgb { r, g, b }).to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

fn format_line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let pad = width.saturating_sub(cell.chars().count());
            if i < 2 {
                format!("{cell}{}", " ".repeat(pad))
            } else {
                format!("{}{cell}", " ".repeat(pad))
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render the snapshot as one JSON document.
pub fn render_json(snapshot: &Snapshot) -> Result<String> {
    let doc = json!({
        "captured_at": snapshot.captured_at,
        "clocks": snapshot.clocks,
        "rows": snapshot.rows,
    });
    Ok(serde_json::to_string(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use monitor_common::{Category, DailyBar, SymbolSpec};
    use monitor_feed::WorldClock;

    fn snapshot() -> Snapshot {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 2, 3, 4).unwrap();
        let bar = |close| DailyBar {
            timestamp: 0,
            open: 100.0,
            close,
            volume: 1_234_567,
        };
        let rows = vec![
            QuoteRow::from_bars(
                &SymbolSpec::new("TSM", "TSMC ADR", Category::Adr),
                &[bar(105.0)],
                at,
            )
            .unwrap(),
            QuoteRow::unavailable(
                &SymbolSpec::new("^DJI", "Dow Jones", Category::InternationalIndex),
                at,
            ),
        ];
        Snapshot {
            captured_at: at,
            clocks: WorldClock::markets(WorldClock::parse_zone("Asia/Taipei").unwrap())
                .snapshot(at),
            rows,
        }
    }

    #[test]
    fn plain_table_has_header_and_one_line_per_row() {
        let text = render_table(&snapshot(), false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("System Time: 2024-03-01 10:03:04"));
        assert!(lines[1].starts_with("Category"));
        assert!(lines[2].starts_with("ADR"));
        assert!(lines[2].contains("+5.00%"));
        assert!(lines[2].contains("1,234,567"));
        assert!(lines[2].ends_with("10:03:04"));
        assert!(lines[3].contains("N/A"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn colored_table_uses_escape_codes() {
        let text = render_table(&snapshot(), true);
        assert!(text.contains("\u{1b}["));
    }

    #[test]
    fn json_carries_rows_and_clocks() {
        let json = render_json(&snapshot()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["rows"].as_array().unwrap().len(), 2);
        assert_eq!(doc["rows"][0]["category"], "ADR");
        assert_eq!(doc["rows"][0]["change"], 5.0);
        assert_eq!(doc["clocks"]["update_time"], "10:03:04");
    }
}

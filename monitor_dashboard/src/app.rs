//! Dashboard state: the displayed table, clock panels and status line.
//!
//! `App::apply` is the single place where a `CycleReport` changes what is on
//! screen. A successful cycle replaces the whole row set; a failed one only moves
//! the clocks and the status line, leaving the previous table in place.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use monitor_common::{QuoteRow, Trend};
use monitor_feed::{ClockSnapshot, CycleReport};

/// Status line text after a successful cycle.
pub const STATUS_OK: &str = "Data updated successfully";

/// Foreground color of a row by its trend, as RGB.
///
/// Taiwan market convention: gains are red, losses green.
pub fn trend_rgb(trend: Trend) -> (u8, u8, u8) {
    match trend {
        Trend::Up => (0xff, 0x4d, 0x4d),
        Trend::Down => (0x00, 0xff, 0x00),
        Trend::Neutral => (0xe0, 0xe0, 0xe0),
    }
}

/// Outcome of the latest cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No cycle has completed yet.
    Waiting,
    /// Last cycle succeeded.
    Updated,
    /// Last cycle failed with the given reason.
    Failed(String),
}

/// What the main loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do.
    None,
    /// Leave the dashboard.
    Quit,
    /// Run a cycle now.
    Refresh,
}

/// Everything the renderer draws.
#[derive(Debug)]
pub struct App {
    /// Current table in display order.
    pub rows: Vec<QuoteRow>,
    /// Home-zone time at which `rows` were captured.
    pub rows_updated_at: String,
    /// Latest clock panels.
    pub clocks: Option<ClockSnapshot>,
    /// Latest cycle outcome.
    pub status: Status,
    /// Completed cycles, successful or not.
    pub cycles: u64,
    /// Cleared when the user quits.
    pub running: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Empty dashboard waiting for its first cycle.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            rows_updated_at: String::new(),
            clocks: None,
            status: Status::Waiting,
            cycles: 0,
            running: true,
        }
    }

    /// Fold a cycle report into the displayed state.
    pub fn apply(&mut self, report: CycleReport) {
        self.cycles += 1;
        match report {
            CycleReport::Updated(snapshot) => {
                self.rows_updated_at = snapshot.clocks.update_time.clone();
                self.rows = snapshot.rows;
                self.clocks = Some(snapshot.clocks);
                self.status = Status::Updated;
            }
            CycleReport::Failed { clocks, reason } => {
                self.clocks = Some(clocks);
                self.status = Status::Failed(reason);
            }
        }
    }

    /// Status line text.
    pub fn status_text(&self) -> String {
        match &self.status {
            Status::Waiting => String::from("Fetching quotes..."),
            Status::Updated => String::from(STATUS_OK),
            Status::Failed(reason) => format!("Update failed: {reason}"),
        }
    }

    /// Map a key press to a command; `q`, `Esc` and Ctrl+C quit.
    pub fn on_key(&mut self, key: KeyEvent) -> Command {
        let command = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('r') => Command::Refresh,
            _ => Command::None,
        };
        if command == Command::Quit {
            self.running = false;
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use monitor_common::{Category, DailyBar, SymbolSpec};
    use monitor_feed::{Snapshot, WorldClock};

    fn snapshot(close: f64) -> Snapshot {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 2, 3, 4).unwrap();
        let spec = SymbolSpec::new("TSM", "TSMC ADR", Category::Adr);
        let bar = DailyBar {
            timestamp: 0,
            open: 100.0,
            close,
            volume: 9,
        };
        Snapshot {
            captured_at: at,
            clocks: WorldClock::markets(WorldClock::parse_zone("Asia/Taipei").unwrap())
                .snapshot(at),
            rows: vec![
                QuoteRow::from_bars(&spec, &[bar], at).unwrap(),
                QuoteRow::unavailable(&SymbolSpec::new("HNHPF", "Hon Hai ADR", Category::Adr), at),
            ],
        }
    }

    #[test]
    fn update_replaces_rows_and_status() {
        let mut app = App::new();
        assert_eq!(app.status_text(), "Fetching quotes...");

        app.apply(CycleReport::Updated(snapshot(105.0)));
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.rows_updated_at, "10:03:04");
        assert_eq!(app.status_text(), STATUS_OK);
        assert_eq!(app.cycles, 1);
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut app = App::new();
        app.apply(CycleReport::Updated(snapshot(105.0)));
        let before = app.rows.clone();

        let later = Utc.with_ymd_and_hms(2024, 3, 1, 2, 3, 5).unwrap();
        app.apply(CycleReport::Failed {
            clocks: WorldClock::markets(WorldClock::parse_zone("Asia/Taipei").unwrap())
                .snapshot(later),
            reason: "Worker failure: out of threads".into(),
        });

        assert_eq!(app.rows, before);
        assert_eq!(app.rows_updated_at, "10:03:04");
        assert_eq!(
            app.clocks.as_ref().unwrap().update_time,
            "10:03:05"
        );
        assert_eq!(app.status_text(), "Update failed: Worker failure: out of threads");
        assert!(app.running);
    }

    #[test]
    fn row_colors_follow_trend() {
        assert_eq!(trend_rgb(Trend::Up), (0xff, 0x4d, 0x4d));
        assert_eq!(trend_rgb(Trend::Down), (0x00, 0xff, 0x00));
        assert_eq!(trend_rgb(Trend::Neutral), (0xe0, 0xe0, 0xe0));

        let snapshot = snapshot(95.0);
        assert_eq!(snapshot.rows[0].trend(), Trend::Down);
        assert_eq!(snapshot.rows[1].trend(), Trend::Neutral);
    }

    #[test]
    fn keys_map_to_commands() {
        let mut app = App::new();
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            Command::Refresh
        );
        assert!(app.running);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            Command::None
        );
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
        assert!(!app.running);
    }
}

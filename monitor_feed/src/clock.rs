//! World clock panels.
//!
//! The dashboard shows the full system time in the home zone plus one short
//! clock per market zone. `WorldClock::snapshot` renders all of them from a single
//! captured instant so the panels and the table's update column always agree.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use monitor_common::{MonitorError, Result};
use serde::Serialize;

/// One rendered clock panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockPanel {
    /// Panel title, e.g. `US Market`.
    pub title: String,
    /// Zone caption shown above the time, empty for the system panel.
    pub caption: String,
    /// Formatted time.
    pub time: String,
}

/// All clock panels for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockSnapshot {
    /// System panel first, then one panel per configured zone.
    pub panels: Vec<ClockPanel>,
    /// `%H:%M:%S` in the home zone, used for the table's update column.
    pub update_time: String,
}

#[derive(Debug, Clone)]
struct Zone {
    title: String,
    caption: String,
    tz: Tz,
}

/// Home zone plus market zones.
#[derive(Debug, Clone)]
pub struct WorldClock {
    home: Tz,
    zones: Vec<Zone>,
}

impl WorldClock {
    /// Clock with `home` as the system zone and no market zones.
    pub fn new(home: Tz) -> Self {
        Self {
            home,
            zones: Vec::new(),
        }
    }

    /// Add a market zone panel.
    pub fn with_zone(mut self, title: &str, caption: &str, tz: Tz) -> Self {
        self.zones.push(Zone {
            title: title.to_string(),
            caption: caption.to_string(),
            tz,
        });
        self
    }

    /// Default layout: New York, Taipei and London next to the system time.
    pub fn markets(home: Tz) -> Self {
        Self::new(home)
            .with_zone("US Market", "New York", chrono_tz::America::New_York)
            .with_zone("Asia Market", "Taipei", chrono_tz::Asia::Taipei)
            .with_zone("Europe Market", "London", chrono_tz::Europe::London)
    }

    /// Parse an IANA zone name such as `Asia/Taipei`.
    pub fn parse_zone(name: &str) -> Result<Tz> {
        name.trim()
            .parse::<Tz>()
            .map_err(|_| MonitorError::Timezone(name.to_string()))
    }

    /// Home zone.
    pub fn home(&self) -> Tz {
        self.home
    }

    /// Render every panel for `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ClockSnapshot {
        let home_now = now.with_timezone(&self.home);

        let mut panels = Vec::with_capacity(self.zones.len() + 1);
        panels.push(ClockPanel {
            title: String::from("System Time"),
            caption: String::new(),
            time: home_now.format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        panels.extend(self.zones.iter().map(|zone| ClockPanel {
            title: zone.title.clone(),
            caption: zone.caption.clone(),
            time: now.with_timezone(&zone.tz).format("%H:%M:%S").to_string(),
        }));

        ClockSnapshot {
            panels,
            update_time: home_now.format("%H:%M:%S").to_string(),
        }
    }
}

//! Date-less reservation windows and their resolution to tomorrow.

use std::fmt;

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use seatwarden_core::error::AppError;

/// Wire format of resolved reservation times.
const PORTAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock formats accepted for stored window bounds.
const CLOCK_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A wall-clock window without a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Create a window. The end must be strictly after the start.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, AppError> {
        if end <= start {
            return Err(AppError::validation(format!(
                "Reservation window end {end} is not after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a window from stored `HH:MM` or `HH:MM:SS` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    /// Start of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the window.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Resolve the window onto the day after `today`.
    pub fn resolve_after(&self, today: NaiveDate) -> Result<ResolvedWindow, AppError> {
        let day = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::validation(format!("No calendar day after {today}")))?;

        Ok(ResolvedWindow {
            begin: day.and_time(self.start),
            end: day.and_time(self.end),
        })
    }

    /// Resolve the window onto tomorrow in local time.
    pub fn resolve_tomorrow(&self) -> Result<ResolvedWindow, AppError> {
        self.resolve_after(Local::now().date_naive())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A window pinned to a concrete calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    /// Reservation start.
    pub begin: NaiveDateTime,
    /// Reservation end.
    pub end: NaiveDateTime,
}

impl ResolvedWindow {
    /// Start time in the portal's wire format.
    pub fn begin_text(&self) -> String {
        self.begin.format(PORTAL_DATETIME_FORMAT).to_string()
    }

    /// End time in the portal's wire format.
    pub fn end_text(&self) -> String {
        self.end.format(PORTAL_DATETIME_FORMAT).to_string()
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, AppError> {
    let trimmed = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| AppError::validation(format!("Invalid clock time '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_clock_formats() {
        let window = TimeWindow::parse("10:30", "22:00:00").expect("parse");
        assert_eq!(window.start(), NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(window.end(), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(window.to_string(), "10:30-22:00");
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        assert!(TimeWindow::parse("22:00", "10:30").is_err());
        assert!(TimeWindow::parse("10:30", "10:30").is_err());
    }

    #[test]
    fn test_garbage_clock_is_rejected() {
        let err = TimeWindow::parse("half past ten", "22:00").unwrap_err();
        assert!(err.message.contains("half past ten"));
    }

    #[test]
    fn test_resolves_to_next_day() {
        let window = TimeWindow::parse("10:30", "22:00").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let resolved = window.resolve_after(today).expect("resolve");
        assert_eq!(resolved.begin_text(), "2025-01-01 10:30:00");
        assert_eq!(resolved.end_text(), "2025-01-01 22:00:00");
    }

    #[test]
    fn test_never_resolves_to_today() {
        let window = TimeWindow::parse("08:00", "09:00").unwrap();
        let resolved = window.resolve_tomorrow().expect("resolve");
        assert!(resolved.begin.date() > Local::now().date_naive());
    }
}

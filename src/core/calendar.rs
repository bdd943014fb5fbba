use chrono::{DateTime, Timelike};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Default mainland-exchange sessions.
pub const DEFAULT_TRADE_SESSIONS: [&str; 2] = ["9:30~11:30", "13:00~15:00"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Session {
    start_minute: u16,
    end_minute: u16,
}

/// Valid minute-of-day offsets during which intraday data exists.
///
/// Session specs are `"HH:MM~HH:MM"` (a `-` separator is also accepted, and
/// a bare time is a one-minute session). The expansion is inclusive on both
/// ends and keeps the configured session order, matching the x-ordinal the
/// intraday chart spreads points over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingCalendar {
    minutes: Vec<u16>,
}

impl TradingCalendar {
    pub fn from_sessions<S: AsRef<str>>(sessions: &[S]) -> ChartResult<Self> {
        if sessions.is_empty() {
            return Err(ChartError::InvalidConfig(
                "trading calendar needs at least one session".to_owned(),
            ));
        }

        let mut parsed: SmallVec<[Session; 4]> = SmallVec::new();
        for session in sessions {
            parsed.push(parse_session(session.as_ref())?);
        }

        let mut minutes = Vec::new();
        for session in parsed {
            minutes.extend(session.start_minute..=session.end_minute);
        }

        Ok(Self { minutes })
    }

    #[must_use]
    pub fn default_sessions() -> Self {
        Self::from_sessions(&DEFAULT_TRADE_SESSIONS)
            .unwrap_or(Self { minutes: Vec::new() })
    }

    #[must_use]
    pub fn total_minutes(&self) -> usize {
        self.minutes.len()
    }

    /// Position of a timestamp's minute-of-day in the calendar.
    ///
    /// `None` means the timestamp falls outside every trading session.
    #[must_use]
    pub fn ordinal_of_timestamp(&self, timestamp_ms: i64) -> Option<usize> {
        let time = DateTime::from_timestamp_millis(timestamp_ms)?;
        let minute_of_day = (time.hour() * 60 + time.minute()) as u16;
        self.minutes.iter().position(|m| *m == minute_of_day)
    }

    /// Pixel width of one calendar minute.
    #[must_use]
    pub fn unit_width(&self, viewport_width: f64) -> Option<f64> {
        if self.minutes.is_empty() || !viewport_width.is_finite() || viewport_width <= 0.0 {
            return None;
        }

        Some(viewport_width / self.minutes.len() as f64)
    }

    /// X position of a calendar ordinal: `ordinal / total * width`.
    #[must_use]
    pub fn x_for_ordinal(&self, ordinal: usize, viewport_width: f64) -> Option<f64> {
        if self.minutes.is_empty() {
            return None;
        }

        Some(ordinal as f64 / self.minutes.len() as f64 * viewport_width)
    }

    /// Calendar ordinal under a pointer X: `floor(x/width * total)`.
    #[must_use]
    pub fn ordinal_at_x(&self, x: f64, viewport_width: f64) -> Option<usize> {
        if self.minutes.is_empty() || !viewport_width.is_finite() || viewport_width <= 0.0 {
            return None;
        }
        if !x.is_finite() || x < 0.0 {
            return None;
        }

        let percent = x / viewport_width;
        Some((percent * self.minutes.len() as f64).floor() as usize)
    }
}

fn parse_session(raw: &str) -> ChartResult<Session> {
    let (start, end) = if let Some((start, end)) = raw.split_once('~') {
        (start, end)
    } else if let Some((start, end)) = raw.split_once('-') {
        (start, end)
    } else {
        (raw, raw)
    };

    let start_minute = parse_minute(start.trim())?;
    let end_minute = parse_minute(end.trim())?;
    if end_minute < start_minute {
        return Err(ChartError::InvalidConfig(format!(
            "session '{raw}' ends before it starts"
        )));
    }

    Ok(Session {
        start_minute,
        end_minute,
    })
}

fn parse_minute(time: &str) -> ChartResult<u16> {
    let (hours, minutes) = time.split_once(':').ok_or_else(|| {
        ChartError::InvalidConfig(format!("session time '{time}' is not HH:MM"))
    })?;

    let hours: u16 = hours
        .parse()
        .map_err(|_| ChartError::InvalidConfig(format!("bad session hour in '{time}'")))?;
    let minutes: u16 = minutes
        .parse()
        .map_err(|_| ChartError::InvalidConfig(format!("bad session minute in '{time}'")))?;
    if hours > 23 || minutes > 59 {
        return Err(ChartError::InvalidConfig(format!(
            "session time '{time}' out of range"
        )));
    }

    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::TradingCalendar;

    #[test]
    fn default_sessions_span_both_halves_inclusively() {
        let calendar = TradingCalendar::default_sessions();
        // 09:30..=11:30 is 121 minutes, 13:00..=15:00 is another 121.
        assert_eq!(calendar.total_minutes(), 242);
    }

    #[test]
    fn dash_and_single_time_specs_parse() {
        let calendar =
            TradingCalendar::from_sessions(&["9:30-9:32", "10:00"]).expect("calendar");
        assert_eq!(calendar.total_minutes(), 4);
    }

    #[test]
    fn malformed_specs_are_rejected() {
        assert!(TradingCalendar::from_sessions(&["930~1130"]).is_err());
        assert!(TradingCalendar::from_sessions(&["25:00~26:00"]).is_err());
        assert!(TradingCalendar::from_sessions(&["11:00~9:00"]).is_err());
        assert!(TradingCalendar::from_sessions::<&str>(&[]).is_err());
    }

    #[test]
    fn timestamps_resolve_to_session_ordinals() {
        let calendar = TradingCalendar::default_sessions();
        // 2024-01-02 09:30 and 13:00, exchange-local epoch millis.
        let open_ms = 1_704_187_800_000;
        assert_eq!(calendar.ordinal_of_timestamp(open_ms), Some(0));
        let afternoon_ms = open_ms + (3 * 60 + 30) * 60_000;
        assert_eq!(calendar.ordinal_of_timestamp(afternoon_ms), Some(121));
        let lunch_ms = open_ms + 150 * 60_000;
        assert_eq!(calendar.ordinal_of_timestamp(lunch_ms), None);
    }

    #[test]
    fn pointer_x_maps_through_the_minute_grid() {
        let calendar = TradingCalendar::default_sessions();
        let width = 968.0;
        let unit = calendar.unit_width(width).expect("unit");
        assert_eq!(calendar.ordinal_at_x(0.0, width), Some(0));
        assert_eq!(calendar.ordinal_at_x(unit * 10.5, width), Some(10));
        let x = calendar.x_for_ordinal(121, width).expect("x");
        assert!((x - 121.0 * unit).abs() < 1e-9);
    }
}

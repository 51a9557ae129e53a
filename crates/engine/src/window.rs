//! Named dashboard time ranges and their resolution to concrete instants.
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveTime, TimeZone,
};
use chrono_tz::Tz;

use crate::EngineError;

/// A dashboard analysis window.
///
/// Windows are named, not parameterized: the set matches what the dashboard
/// offers. Resolution happens in the user's timezone, so "today" is the
/// user's calendar day and weeks run Monday through Sunday.
///
/// # Examples
///
/// ```rust
/// use engine::AnalysisWindow;
///
/// let window: AnalysisWindow = "this_week".parse().unwrap();
/// assert_eq!(window.as_str(), "this_week");
/// assert!("last_week".parse::<AnalysisWindow>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisWindow {
    AllTime,
    Today,
    ThisWeek,
    ThisMonth,
}

impl AnalysisWindow {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllTime => "all_time",
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
        }
    }

    /// Bucket granularity used for this window's time series.
    #[must_use]
    pub fn granularity(self) -> Granularity {
        match self {
            Self::AllTime => Granularity::Month,
            Self::Today | Self::ThisWeek | Self::ThisMonth => Granularity::Day,
        }
    }

    /// Resolves the window against `now`, producing a half-open
    /// `[start, end)` range in `now`'s timezone. All-time has no start.
    #[must_use]
    pub fn resolve(self, now: DateTime<Tz>) -> ResolvedWindow {
        let tz = now.timezone();
        let today = now.date_naive();
        let start = match self {
            Self::AllTime => None,
            Self::Today => Some(today),
            Self::ThisWeek => {
                let days_back = today.weekday().num_days_from_monday();
                Some(today.checked_sub_days(Days::new(days_back.into())).unwrap_or(today))
            }
            Self::ThisMonth => Some(today.with_day(1).unwrap_or(today)),
        };
        ResolvedWindow {
            window: self,
            start: start.map(|date| local_midnight(tz, date)),
            end: now,
        }
    }
}

impl FromStr for AnalysisWindow {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all_time" => Ok(Self::AllTime),
            "today" => Ok(Self::Today),
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            other => Err(EngineError::UnknownWindow(other.to_string())),
        }
    }
}

/// Width of one slice in the emitted time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

/// An [`AnalysisWindow`] pinned to a concrete instant and timezone.
#[derive(Clone, Debug)]
pub struct ResolvedWindow {
    pub window: AnalysisWindow,
    /// Local midnight opening the range; `None` for all-time.
    pub start: Option<DateTime<Tz>>,
    /// Exclusive upper bound, normally "now".
    pub end: DateTime<Tz>,
}

impl ResolvedWindow {
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.window.granularity()
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.end.timezone()
    }

    /// The equal-length range immediately before this one: the prior day,
    /// the previous Monday-aligned week or the previous calendar month.
    /// All-time has no predecessor.
    #[must_use]
    pub fn previous(&self) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let start = self.start?;
        let start_date = start.date_naive();
        let previous_start = match self.window {
            AnalysisWindow::AllTime => return None,
            AnalysisWindow::Today => start_date.checked_sub_days(Days::new(1))?,
            AnalysisWindow::ThisWeek => start_date.checked_sub_days(Days::new(7))?,
            AnalysisWindow::ThisMonth => start_date.checked_sub_months(Months::new(1))?,
        };
        Some((local_midnight(self.timezone(), previous_start), start))
    }
}

/// First valid instant of `date` in `tz`. Midnight usually exists, but DST
/// jumps can skip it or run it twice.
fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(first, _) => first,
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}

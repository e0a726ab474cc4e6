use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Canonical calendar-day identifier: whole days since 1970-01-01.
///
/// This is the only key type accepted by the day index. Two instants on the
/// same calendar day always produce the same key, whatever their time of day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct DayKey(pub i64);

impl DayKey {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE)
    }

    #[must_use]
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self::from_date(time.date())
    }

    /// Returns `None` when the key lies outside chrono's representable range.
    #[must_use]
    pub fn to_date(self) -> Option<NaiveDate> {
        let days_from_ce = i32::try_from(self.0 + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days_from_ce)
    }

    #[must_use]
    pub fn offset(self, days: i64) -> Self {
        Self(self.0 + days)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day#{}", self.0)
    }
}

/// Returns `date` at 00:00:00.
#[must_use]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns `date` at the given minute of the day. Minutes past 1440 roll over.
#[must_use]
pub fn at_minute(date: NaiveDate, minute: u32) -> NaiveDateTime {
    midnight(date) + Duration::minutes(i64::from(minute))
}

#[must_use]
pub fn minute_of_day(time: NaiveDateTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Half-open time range `[start, end)`.
///
/// A period with `end <= start` is malformed but still representable; the
/// interval algebra skips such values instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.start < self.end
    }

    /// Length of the period; zero for malformed periods.
    #[must_use]
    pub fn duration(self) -> Duration {
        if self.is_valid() {
            self.end - self.start
        } else {
            Duration::zero()
        }
    }

    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Day on which the period starts; used as its day index key.
    #[must_use]
    pub fn day_key(self) -> DayKey {
        DayKey::from_datetime(self.start)
    }
}

/// A regular calendar event overlaid on the working-time grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Event {
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            uid: None,
            summary: None,
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Accepts categories as a comma separated list, e.g. `"meeting,remote"`.
    #[must_use]
    pub fn with_categories_csv(self, categories: &str) -> Self {
        self.with_categories(
            categories
                .split(',')
                .map(str::trim)
                .filter(|category| !category.is_empty()),
        )
    }

    #[must_use]
    pub fn period(&self) -> Period {
        Period::new(self.start, self.end)
    }

    /// Same identity and bounds: a re-inserted copy rather than a conflict.
    #[must_use]
    pub fn is_same_instance(&self, other: &Self) -> bool {
        match (&self.uid, &other.uid) {
            (Some(uid), Some(other_uid)) => {
                uid == other_uid && self.start == other.start && self.end == other.end
            }
            _ => false,
        }
    }
}

/// Requested `[from, to)` day range handed to the data collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadInterval {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl LoadInterval {
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn start(self) -> NaiveDateTime {
        midnight(self.from)
    }

    #[must_use]
    pub fn end(self) -> NaiveDateTime {
        midnight(self.to)
    }

    #[must_use]
    pub fn day_count(self) -> i64 {
        (self.to - self.from).num_days().max(0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.from >= self.to
    }

    #[must_use]
    pub fn contains_day(self, day: NaiveDate) -> bool {
        self.from <= day && day < self.to
    }

    /// Calendar days covered by the interval, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.from.iter_days().take_while(move |day| *day < self.to)
    }
}

impl fmt::Display for LoadInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Configured vertical extent of a working day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub first_minute: u32,
    pub last_minute: u32,
}

impl WorkingHours {
    #[must_use]
    pub const fn new(first_minute: u32, last_minute: u32) -> Self {
        Self {
            first_minute,
            last_minute,
        }
    }

    #[must_use]
    pub fn day_begin(self, date: NaiveDate) -> NaiveDateTime {
        at_minute(date, self.first_minute)
    }

    #[must_use]
    pub fn day_end(self, date: NaiveDate) -> NaiveDateTime {
        at_minute(date, self.last_minute)
    }

    #[must_use]
    pub fn is_first_minute(self, time: NaiveDateTime) -> bool {
        minute_of_day(time) == self.first_minute
    }

    #[must_use]
    pub fn is_last_minute(self, time: NaiveDateTime) -> bool {
        minute_of_day(time) == self.last_minute
    }

    /// Whether `next` continues `last` across midnight.
    ///
    /// Only the minute-of-day boundaries are compared; an intervening day off
    /// does not break contiguity.
    #[must_use]
    pub fn is_contiguous(self, last: Period, next: Period) -> bool {
        self.is_last_minute(last.end) && self.is_first_minute(next.start)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::new(7 * 60, 20 * 60)
    }
}

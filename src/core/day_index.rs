use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use smallvec::{SmallVec, smallvec};

use crate::core::{DayKey, Event, LoadInterval, Period, WorkingHours, midnight};

pub type DayPeriods = SmallVec<[Period; 2]>;

/// Outcome of indexing one regular event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventInsert {
    Indexed,
    /// Same uid and bounds as an event already indexed on that day.
    Duplicate,
    /// Overlaps earlier events of the same day; the earlier ones win.
    Conflict { with: Vec<Event> },
}

/// Splits a multi-day period into one sub-period per calendar day.
///
/// The first day runs from the original start to that day's last working
/// minute, middle days span the full working hours, and the last day runs
/// from the first working minute to the original end. Single-day periods are
/// returned unchanged.
#[must_use]
pub fn split_into_day_periods(period: Period, hours: WorkingHours) -> DayPeriods {
    if period.start.date() == period.end.date() {
        return smallvec![period];
    }

    let mut days = DayPeriods::new();
    let mut day = period.start.date();
    while midnight(day) < period.end {
        let start = if midnight(day) < period.start {
            period.start
        } else {
            hours.day_begin(day)
        };
        let next_day = day + Duration::days(1);
        let end = if midnight(next_day) > period.end {
            period.end
        } else {
            hours.day_end(day)
        };
        days.push(Period::new(start, end));
        day = next_day;
    }
    days
}

/// Working-time periods and regular events, grouped by calendar day.
///
/// Working times are append-only: overlapping fetches may index the same
/// period twice. Events are indexed under the day they start on.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    working_times: IndexMap<DayKey, DayPeriods>,
    events: IndexMap<DayKey, Vec<Event>>,
}

impl DayIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `period` per day and appends the pieces. Returns them.
    pub fn add_working_time(&mut self, period: Period, hours: WorkingHours) -> DayPeriods {
        let pieces = split_into_day_periods(period, hours);
        for piece in &pieces {
            self.working_times
                .entry(piece.day_key())
                .or_default()
                .push(*piece);
        }
        pieces
    }

    #[must_use]
    pub fn working_times(&self, day: DayKey) -> &[Period] {
        self.working_times
            .get(&day)
            .map(|periods| periods.as_slice())
            .unwrap_or_default()
    }

    /// Indexes `event` on its start day unless it overlaps an indexed event
    /// on any day it spans.
    ///
    /// Periods are half-open: an event ending exactly when another starts
    /// does not conflict with it.
    pub fn insert_event(&mut self, event: Event) -> EventInsert {
        let period = event.period();
        let conflicts: Vec<Event> = self
            .events
            .values()
            .flatten()
            .filter(|indexed| indexed.period().overlaps(period))
            .cloned()
            .collect();

        if conflicts.is_empty() {
            self.events.entry(period.day_key()).or_default().push(event);
            return EventInsert::Indexed;
        }
        if conflicts.iter().any(|indexed| indexed.is_same_instance(&event)) {
            return EventInsert::Duplicate;
        }
        EventInsert::Conflict { with: conflicts }
    }

    /// Indexed events drawn on `day`: those starting on it and those started
    /// earlier that run past its midnight.
    pub fn events_covering(&self, day: NaiveDate) -> impl Iterator<Item = &Event> {
        let day_start = midnight(day);
        let next_day = midnight(day + Duration::days(1));
        self.events.values().flatten().filter(move |event| {
            event.start < next_day && (event.end > day_start || event.start >= day_start)
        })
    }

    #[must_use]
    pub fn events(&self, day: DayKey) -> &[Event] {
        self.events
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drops indexed events starting inside `interval`. Returns how many were removed.
    pub fn clear_events(&mut self, interval: LoadInterval) -> usize {
        let mut removed = 0;
        for day in interval.days() {
            if let Some(events) = self.events.get_mut(&DayKey::from_date(day)) {
                removed += events.len();
                events.clear();
            }
        }
        removed
    }

    #[must_use]
    pub fn working_time_count(&self) -> usize {
        self.working_times.values().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.working_times.clear();
        self.events.clear();
    }
}

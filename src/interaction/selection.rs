use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::{DayIndex, DayKey, Period, WorkingHours, midnight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    Empty,
    /// Start picked, waiting for an end after it.
    Picking,
    Valid,
}

/// What a single [`Selection::pick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickOutcome {
    /// The point became the new start; any previous end was dropped.
    Restarted,
    /// The point closed a valid range.
    Completed,
    /// The point equals the start; no range.
    Collapsed,
}

impl PickOutcome {
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Two-click range accumulator.
///
/// The selection knows nothing about drawing or pointers: callers translate
/// input into [`Selection::pick`] calls and query the interval algebra
/// (`crop_period`, `valid_periods`, `duration`) against a [`DayIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start < end)
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        if self.is_valid() {
            SelectionState::Valid
        } else if self.start.is_some() {
            SelectionState::Picking
        } else {
            SelectionState::Empty
        }
    }

    /// The selected range, when valid.
    #[must_use]
    pub fn range(&self) -> Option<Period> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start < end => Some(Period::new(start, end)),
            _ => None,
        }
    }

    /// Feeds one picked point (sub-second precision is dropped).
    ///
    /// A point before the current start, or any point once the selection is
    /// valid, restarts the selection there.
    pub fn pick(&mut self, point: NaiveDateTime) -> PickOutcome {
        let point = point.with_nanosecond(0).unwrap_or(point);

        match self.start {
            Some(start) if !self.is_valid() && point > start => {
                self.end = Some(point);
                PickOutcome::Completed
            }
            Some(start) if !self.is_valid() && point == start => PickOutcome::Collapsed,
            _ => {
                self.start = Some(point);
                self.end = None;
                PickOutcome::Restarted
            }
        }
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Clips `period` to the selection.
    ///
    /// Returns the period unchanged when fully inside, `None` when the two
    /// half-open ranges are disjoint (or the selection has no range).
    #[must_use]
    pub fn crop_period(&self, period: Period) -> Option<Period> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return None;
        };

        if period.start >= start && period.end <= end {
            return Some(period);
        }
        if period.start >= end || period.end <= start {
            return None;
        }
        Some(Period::new(period.start.max(start), period.end.min(end)))
    }

    /// Working-time periods inside the selection, in chronological order.
    ///
    /// Every day from the start's day up to the last day whose midnight
    /// precedes the end is visited. With `merge_contiguous`, a period ending
    /// on the last working minute followed by one starting on the first
    /// working minute collapse into a single entry.
    #[must_use]
    pub fn valid_periods(
        &self,
        index: &DayIndex,
        hours: WorkingHours,
        merge_contiguous: bool,
    ) -> Vec<Period> {
        let Some(range) = self.range() else {
            return Vec::new();
        };

        let mut periods: Vec<Period> = Vec::new();
        let mut day = range.start.date();
        while midnight(day) < range.end {
            for working_time in index.working_times(DayKey::from_date(day)) {
                let Some(cropped) = self.crop_period(*working_time) else {
                    continue;
                };
                match periods.last_mut() {
                    Some(last) if merge_contiguous && hours.is_contiguous(*last, cropped) => {
                        last.end = cropped.end;
                    }
                    _ => periods.push(cropped),
                }
            }
            day = day + Duration::days(1);
        }
        periods
    }

    /// Total working time covered by the selection; malformed pieces count as zero.
    #[must_use]
    pub fn duration(&self, index: &DayIndex, hours: WorkingHours) -> Duration {
        self.valid_periods(index, hours, false)
            .into_iter()
            .filter(|period| period.is_valid())
            .fold(Duration::zero(), |total, period| total + (period.end - period.start))
    }
}

/// Read-only view handed to selection observers.
#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a> {
    selection: &'a Selection,
    index: &'a DayIndex,
    hours: WorkingHours,
}

impl<'a> SelectionView<'a> {
    #[must_use]
    pub fn new(selection: &'a Selection, index: &'a DayIndex, hours: WorkingHours) -> Self {
        Self {
            selection,
            index,
            hours,
        }
    }

    #[must_use]
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.selection.start()
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.selection.end()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.selection.is_valid()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.selection.duration(self.index, self.hours)
    }

    #[must_use]
    pub fn valid_periods(&self, merge_contiguous: bool) -> Vec<Period> {
        self.selection
            .valid_periods(self.index, self.hours, merge_contiguous)
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        *self.selection
    }
}

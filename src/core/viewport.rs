use chrono::{Duration, NaiveDate};

use crate::core::{Boundary, LoadInterval, RangeExtension};

/// Visible day range of the sliding layer, plus the loaded range it slides in.
///
/// Offsets are days relative to the focus date both boundaries were anchored
/// on. `lower` and `upper` delimit the loaded range `[lower, upper)`; the
/// window may only leave it by extending one of them.
#[derive(Debug)]
pub struct ViewportWindow {
    from_offset: i64,
    to_offset: i64,
    step_days: i64,
    lower: Boundary,
    upper: Boundary,
}

impl ViewportWindow {
    /// Creates a window of `visible_days` starting at `focus`. Nothing is
    /// loaded until [`ViewportWindow::open`] is called.
    #[must_use]
    pub fn new(focus: NaiveDate, visible_days: i64, step_days: i64) -> Self {
        Self {
            from_offset: 0,
            to_offset: visible_days,
            step_days,
            lower: Boundary::new(focus),
            upper: Boundary::new(focus),
        }
    }

    /// Pushes the upper boundary to the window's right edge, covering the
    /// initially visible days.
    pub fn open(&mut self) -> RangeExtension {
        let width = self.to_offset - self.upper.day_offset();
        self.upper.extend(width)
    }

    #[must_use]
    pub fn from_offset(&self) -> i64 {
        self.from_offset
    }

    #[must_use]
    pub fn to_offset(&self) -> i64 {
        self.to_offset
    }

    #[must_use]
    pub fn visible_days(&self) -> i64 {
        self.to_offset - self.from_offset
    }

    #[must_use]
    pub fn step_days(&self) -> i64 {
        self.step_days
    }

    #[must_use]
    pub fn lower(&self) -> &Boundary {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &Boundary {
        &self.upper
    }

    pub fn lower_mut(&mut self) -> &mut Boundary {
        &mut self.lower
    }

    pub fn upper_mut(&mut self) -> &mut Boundary {
        &mut self.upper
    }

    #[must_use]
    pub fn loaded_interval(&self) -> LoadInterval {
        LoadInterval::new(self.lower.current_date(), self.upper.current_date())
    }

    /// First visible day.
    #[must_use]
    pub fn first_visible_day(&self) -> NaiveDate {
        self.lower.anchor_date() + Duration::days(self.from_offset)
    }

    /// Slides the window one step into the past.
    ///
    /// Returns the newly exposed range when the lower boundary had to be
    /// extended, `None` for a pure slide inside the loaded range.
    pub fn grow_backward(&mut self) -> Option<RangeExtension> {
        self.from_offset -= self.step_days;
        self.to_offset -= self.step_days;

        if self.from_offset < self.lower.day_offset() {
            let shortfall = self.from_offset - self.lower.day_offset();
            return Some(self.lower.extend(shortfall));
        }
        None
    }

    /// Slides the window one step into the future.
    pub fn grow_forward(&mut self) -> Option<RangeExtension> {
        self.from_offset += self.step_days;
        self.to_offset += self.step_days;

        if self.to_offset > self.upper.day_offset() {
            let shortfall = self.to_offset - self.upper.day_offset();
            return Some(self.upper.extend(shortfall));
        }
        None
    }
}

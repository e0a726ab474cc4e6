use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::{Boundary, DayKey, WorkingHours, midnight, minute_of_day};
use crate::error::{TeleperiodError, TeleperiodResult};

/// Geometry of one day column: width per day and height of the working hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayGrid {
    pub day_column_width: f64,
    pub day_column_height: f64,
    pub hours: WorkingHours,
}

impl Default for DayGrid {
    fn default() -> Self {
        Self {
            day_column_width: 30.0,
            day_column_height: 250.0,
            hours: WorkingHours::default(),
        }
    }
}

/// Two-way mapping between calendar time and the sliding layer's pixel space.
///
/// x is day-granular and measured from the lower boundary's current date.
/// y is the minute of day, scaled into the working-hours band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    origin: NaiveDate,
    grid: DayGrid,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(origin: NaiveDate, grid: DayGrid) -> Self {
        Self { origin, grid }
    }

    #[must_use]
    pub fn for_boundary(boundary: &Boundary, grid: DayGrid) -> Self {
        Self::new(boundary.current_date(), grid)
    }

    #[must_use]
    pub fn origin(self) -> NaiveDate {
        self.origin
    }

    #[must_use]
    pub fn grid(self) -> DayGrid {
        self.grid
    }

    #[must_use]
    pub fn date_to_x(self, date: NaiveDateTime) -> f64 {
        self.day_to_x(date.date())
    }

    #[must_use]
    pub fn day_to_x(self, day: NaiveDate) -> f64 {
        let days = DayKey::from_date(day).0 - DayKey::from_date(self.origin).0;
        days as f64 * self.grid.day_column_width
    }

    /// Midnight of the day column containing `x`.
    pub fn x_to_date(self, x: f64) -> TeleperiodResult<NaiveDateTime> {
        if !x.is_finite() {
            return Err(TeleperiodError::InvalidData(
                "x coordinate must be finite".to_owned(),
            ));
        }
        let days = (x / self.grid.day_column_width).ceil();
        if !days.is_finite() {
            return Err(TeleperiodError::InvalidData(
                "day column width must be non-zero".to_owned(),
            ));
        }
        let date = Duration::try_days(days as i64)
            .and_then(|delta| self.origin.checked_add_signed(delta))
            .ok_or_else(|| {
                TeleperiodError::InvalidData("x coordinate is out of calendar range".to_owned())
            })?;
        Ok(midnight(date))
    }

    /// Vertical position of `date` inside its day column.
    ///
    /// Times before the first working minute map to 0. Times after the last
    /// working minute map to the last-minute value itself, not to a pixel.
    #[must_use]
    pub fn time_to_y(self, date: NaiveDateTime) -> f64 {
        let minutes = minute_of_day(date);
        let first = self.grid.hours.first_minute;
        let last = self.grid.hours.last_minute;

        if minutes < first {
            return 0.0;
        }
        if minutes > last {
            return f64::from(last);
        }

        let total = f64::from(last) - f64::from(first);
        if total <= 0.0 {
            return 0.0;
        }
        let from_start = f64::from(minutes - first);
        (from_start * self.grid.day_column_height / total).round()
    }

    /// Minute of day at vertical position `y`, rounded to the nearest minute.
    ///
    /// Fails when the result does not fit a [`Duration`].
    pub fn y_to_minutes(self, y: f64) -> TeleperiodResult<i64> {
        if !y.is_finite() {
            return Err(TeleperiodError::InvalidData(
                "y coordinate must be finite".to_owned(),
            ));
        }
        let first = f64::from(self.grid.hours.first_minute);
        let total = f64::from(self.grid.hours.last_minute) - first;
        let y_per_minute = self.grid.day_column_height / total;
        let offset = (y / y_per_minute).round();
        let offset = if offset.is_finite() { offset } else { 0.0 };
        let minutes = (first + offset) as i64;
        if Duration::try_minutes(minutes).is_none() {
            return Err(TeleperiodError::InvalidData(
                "y coordinate is out of calendar range".to_owned(),
            ));
        }
        Ok(minutes)
    }
}

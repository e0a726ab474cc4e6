use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::CoordinateMapper;
use crate::error::{TeleperiodError, TeleperiodResult};

/// Minute granularity of picked points.
pub const PICK_ROUNDING_MINUTES: i64 = 10;

/// Vertical extent of the working-time item under the pointer, in the day
/// column's local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemBounds {
    pub top_y: f64,
    pub bottom_y: f64,
}

impl ItemBounds {
    #[must_use]
    pub const fn new(top_y: f64, bottom_y: f64) -> Self {
        Self { top_y, bottom_y }
    }
}

/// Pulls `y` onto the item's top or bottom edge when closer than `snap_distance`.
#[must_use]
pub fn snap_to_item_edges(y: f64, item: ItemBounds, snap_distance: f64) -> f64 {
    let mut snapped = y;
    if snapped - item.top_y < snap_distance {
        snapped = item.top_y;
    }
    if item.bottom_y - snapped < snap_distance {
        snapped = item.bottom_y;
    }
    snapped
}

/// Rounds a minute-of-day count to the nearest [`PICK_ROUNDING_MINUTES`]
/// inside its hour, halves rounding up.
#[must_use]
pub fn round_pick_minutes(minutes: i64) -> i64 {
    let hours = minutes.div_euclid(60);
    let within_hour = minutes.rem_euclid(60);
    let rounded = (within_hour + PICK_ROUNDING_MINUTES / 2) / PICK_ROUNDING_MINUTES
        * PICK_ROUNDING_MINUTES;
    hours.saturating_mul(60).saturating_add(rounded)
}

/// Translates a pointer position over a working-time item into a calendar
/// instant: day from the column x, time from the snapped and rounded y.
pub fn pointer_date(
    mapper: CoordinateMapper,
    column_x: f64,
    y: f64,
    item: ItemBounds,
    snap_distance: f64,
) -> TeleperiodResult<NaiveDateTime> {
    if !y.is_finite() || !item.top_y.is_finite() || !item.bottom_y.is_finite() {
        return Err(TeleperiodError::InvalidData(
            "pointer coordinates must be finite".to_owned(),
        ));
    }

    let day = mapper.x_to_date(column_x)?;
    let y = snap_to_item_edges(y, item, snap_distance);
    let minutes = round_pick_minutes(mapper.y_to_minutes(y)?);
    Duration::try_minutes(minutes)
        .and_then(|delta| day.checked_add_signed(delta))
        .ok_or_else(|| {
            TeleperiodError::InvalidData("pointer position is out of calendar range".to_owned())
        })
}

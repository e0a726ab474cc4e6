pub mod boundary;
pub mod coordinates;
pub mod day_index;
pub mod types;
pub mod viewport;

pub use boundary::{Boundary, RangeExtension, SubscriptionId};
pub use coordinates::{CoordinateMapper, DayGrid};
pub use day_index::{DayIndex, DayPeriods, EventInsert, split_into_day_periods};
pub use types::{
    DayKey, Event, LoadInterval, Period, Viewport, WorkingHours, at_minute, midnight,
    minute_of_day,
};
pub use viewport::ViewportWindow;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{DayGrid, Viewport, WorkingHours};
use crate::error::{TeleperiodError, TeleperiodResult};

/// Largest day count a single window or navigation step may span.
pub const MAX_SPAN_DAYS: i64 = 36_600;

/// Public engine bootstrap configuration.
///
/// Every field has a default so hosts can persist only what they change.
/// Values are not cross-checked: e.g. a `day_first_minute` after
/// `day_last_minute` is accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleperiodConfig {
    /// Pixel width of the visible area; decides the initial number of days.
    #[serde(default = "default_width_px")]
    pub width_px: f64,
    #[serde(default = "default_day_column_width")]
    pub day_column_width: f64,
    #[serde(default = "default_day_column_height")]
    pub day_column_height: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_graph_height")]
    pub graph_height: f64,
    #[serde(default = "default_timeline_row_height")]
    pub timeline_row_height: f64,
    #[serde(default = "default_timeline_row_gap")]
    pub timeline_row_gap: f64,
    #[serde(default = "default_button_width")]
    pub button_width: f64,
    /// Weekday indices, 0 = Sunday.
    #[serde(default = "default_days_off")]
    pub days_off: Vec<u32>,
    #[serde(default = "default_day_first_minute")]
    pub day_first_minute: u32,
    #[serde(default = "default_day_last_minute")]
    pub day_last_minute: u32,
    #[serde(default = "default_snap_distance_px")]
    pub snap_distance_px: f64,
    #[serde(default = "default_navigation_step_days")]
    pub navigation_step_days: i64,
    /// Day shown first; today when unset.
    #[serde(default)]
    pub focus_date: Option<NaiveDate>,
    /// Display locale, forwarded to label formatting backends only.
    #[serde(default)]
    pub locale: Option<String>,
}

impl Default for TeleperiodConfig {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            day_column_width: default_day_column_width(),
            day_column_height: default_day_column_height(),
            header_height: default_header_height(),
            graph_height: default_graph_height(),
            timeline_row_height: default_timeline_row_height(),
            timeline_row_gap: default_timeline_row_gap(),
            button_width: default_button_width(),
            days_off: default_days_off(),
            day_first_minute: default_day_first_minute(),
            day_last_minute: default_day_last_minute(),
            snap_distance_px: default_snap_distance_px(),
            navigation_step_days: default_navigation_step_days(),
            focus_date: None,
            locale: None,
        }
    }
}

impl TeleperiodConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_width_px(mut self, width_px: f64) -> Self {
        self.width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_day_column_width(mut self, width: f64) -> Self {
        self.day_column_width = width;
        self
    }

    #[must_use]
    pub fn with_day_column_height(mut self, height: f64) -> Self {
        self.day_column_height = height;
        self
    }

    /// Sets the working-hours band, in minutes since midnight.
    #[must_use]
    pub fn with_working_minutes(mut self, first_minute: u32, last_minute: u32) -> Self {
        self.day_first_minute = first_minute;
        self.day_last_minute = last_minute;
        self
    }

    #[must_use]
    pub fn with_days_off(mut self, days_off: Vec<u32>) -> Self {
        self.days_off = days_off;
        self
    }

    #[must_use]
    pub fn with_snap_distance_px(mut self, snap_distance_px: f64) -> Self {
        self.snap_distance_px = snap_distance_px;
        self
    }

    #[must_use]
    pub fn with_navigation_step_days(mut self, days: i64) -> Self {
        self.navigation_step_days = days;
        self
    }

    #[must_use]
    pub fn with_focus_date(mut self, focus_date: NaiveDate) -> Self {
        self.focus_date = Some(focus_date);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours::new(self.day_first_minute, self.day_last_minute)
    }

    #[must_use]
    pub fn day_grid(&self) -> DayGrid {
        DayGrid {
            day_column_width: self.day_column_width,
            day_column_height: self.day_column_height,
            hours: self.working_hours(),
        }
    }

    #[must_use]
    pub fn resolved_focus_date(&self) -> NaiveDate {
        self.focus_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Days covered by the first load: one more than fit in `width_px`.
    #[must_use]
    pub fn initial_visible_days(&self) -> i64 {
        ((self.width_px / self.day_column_width).round() as i64).saturating_add(1)
    }

    #[must_use]
    pub fn is_day_off(&self, date: NaiveDate) -> bool {
        self.days_off
            .contains(&date.weekday().num_days_from_sunday())
    }

    #[must_use]
    pub fn timelines_height(&self, timeline_count: usize) -> f64 {
        timeline_count as f64 * (self.timeline_row_height + self.timeline_row_gap)
    }

    #[must_use]
    pub fn height(&self, timeline_count: usize) -> f64 {
        self.header_height + self.graph_height + self.timelines_height(timeline_count)
    }

    #[must_use]
    pub fn viewport(&self, timeline_count: usize) -> Viewport {
        Viewport::new(
            self.width_px.max(0.0).round() as u32,
            self.height(timeline_count).max(0.0).round() as u32,
        )
    }

    /// Rejects values the engine cannot map at all, and day spans too wide
    /// for calendar arithmetic.
    pub fn validate(&self) -> TeleperiodResult<()> {
        if !self.day_column_width.is_finite() || self.day_column_width <= 0.0 {
            return Err(TeleperiodError::Config(
                "day_column_width must be finite and > 0".to_owned(),
            ));
        }
        if !self.width_px.is_finite() || !self.day_column_height.is_finite() {
            return Err(TeleperiodError::Config(
                "pixel sizes must be finite".to_owned(),
            ));
        }
        if !(0..=MAX_SPAN_DAYS).contains(&self.navigation_step_days) {
            return Err(TeleperiodError::Config(format!(
                "navigation_step_days must be within 0..={MAX_SPAN_DAYS}"
            )));
        }
        if !(1..=MAX_SPAN_DAYS).contains(&self.initial_visible_days()) {
            return Err(TeleperiodError::Config(format!(
                "width_px / day_column_width must cover at most {MAX_SPAN_DAYS} days"
            )));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> TeleperiodResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TeleperiodError::Config(format!("failed to parse config json: {e}")))
    }

    pub fn to_json_pretty(&self) -> TeleperiodResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TeleperiodError::Config(format!("failed to serialize config json: {e}")))
    }
}

fn default_width_px() -> f64 {
    870.0
}

fn default_day_column_width() -> f64 {
    30.0
}

fn default_day_column_height() -> f64 {
    250.0
}

fn default_header_height() -> f64 {
    50.0
}

fn default_graph_height() -> f64 {
    300.0
}

fn default_timeline_row_height() -> f64 {
    20.0
}

fn default_timeline_row_gap() -> f64 {
    10.0
}

fn default_button_width() -> f64 {
    30.0
}

fn default_days_off() -> Vec<u32> {
    vec![6, 0]
}

fn default_day_first_minute() -> u32 {
    7 * 60
}

fn default_day_last_minute() -> u32 {
    20 * 60
}

fn default_snap_distance_px() -> f64 {
    10.0
}

fn default_navigation_step_days() -> i64 {
    7
}

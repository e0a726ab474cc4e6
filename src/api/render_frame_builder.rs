use chrono::{Datelike, NaiveDate};

use crate::core::{CoordinateMapper, DayKey, Event, Period, WorkingHours};
use crate::render::{
    ClipRegion, Color, RectPrimitive, RectRole, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::Teleperiod;

const DAY_COLOR: Color = Color::rgb(0.96, 0.96, 0.96);
const DAY_OFF_COLOR: Color = Color::rgb(0.86, 0.86, 0.86);
const WORKING_TIME_COLOR: Color = Color::rgb(0.62, 0.80, 0.55);
const EVENT_COLOR: Color = Color::rgb(0.35, 0.55, 0.85);
const SELECTION_COLOR: Color = Color::rgba(0.95, 0.60, 0.10, 0.6);
const LABEL_COLOR: Color = Color::rgb(0.15, 0.15, 0.15);
const LABEL_FONT_SIZE_PX: f64 = 11.0;

/// Vertical band `[y_start, y_end]` of `period` inside `day`'s column, with
/// the period clamped to that day's working hours.
fn day_band(mapper: CoordinateMapper, hours: WorkingHours, day: NaiveDate, period: Period) -> (f64, f64) {
    let day_begin = hours.day_begin(day);
    let day_end = hours.day_end(day);
    let y_start = if period.start > day_begin {
        mapper.time_to_y(period.start)
    } else {
        mapper.time_to_y(day_begin)
    };
    let y_end = if period.end < day_end {
        mapper.time_to_y(period.end)
    } else {
        mapper.time_to_y(day_end)
    };
    (y_start, y_end.max(y_start))
}

fn event_classes(event: &Event) -> Vec<String> {
    std::iter::once("event".to_owned())
        .chain(
            event
                .categories
                .iter()
                .map(|category| format!("category-{category}")),
        )
        .collect()
}

impl<R: Renderer> Teleperiod<R> {
    /// Materializes the loaded range into draw commands.
    pub fn build_render_frame(&mut self) -> RenderFrame {
        let mapper = self.mapper();
        let hours = self.config.working_hours();
        let width = self.config.day_column_width;
        let header = self.config.header_height;
        let loaded = self.loaded_interval();

        let mut frame = RenderFrame::new(self.viewport());
        frame.layer_x = self.layer_x();
        frame.layer_width = self.layer_width();

        for day in loaded.days() {
            let x = mapper.day_to_x(day);
            let role = if self.config.is_day_off(day) {
                RectRole::DayOff
            } else {
                RectRole::Day
            };
            let color = if role == RectRole::DayOff {
                DAY_OFF_COLOR
            } else {
                DAY_COLOR
            };
            frame.rects.push(RectPrimitive::new(
                x,
                header,
                (width - 1.0).max(0.0),
                self.config.day_column_height,
                role,
                color,
            ));
            self.push_day_labels(&mut frame, day, x);

            for working_time in self.index.working_times(DayKey::from_date(day)) {
                let (y_start, y_end) = day_band(mapper, hours, day, *working_time);
                frame.rects.push(RectPrimitive::new(
                    x,
                    header + y_start,
                    (width - 1.0).max(0.0),
                    y_end - y_start,
                    RectRole::WorkingTime,
                    WORKING_TIME_COLOR,
                ));
            }
        }

        self.push_events(&mut frame, mapper, hours);

        for period in &self.highlighted {
            let day = period.start.date();
            if !loaded.contains_day(day) {
                continue;
            }
            let (y_start, y_end) = day_band(mapper, hours, day, *period);
            frame.rects.push(RectPrimitive::new(
                mapper.day_to_x(day),
                header + y_start,
                (width - 1.0).max(0.0),
                y_end - y_start,
                RectRole::Selection,
                SELECTION_COLOR,
            ));
        }

        self.push_timeline_names(&mut frame);
        frame
    }

    fn push_day_labels(&self, frame: &mut RenderFrame, day: NaiveDate, x: f64) {
        let header = self.config.header_height;
        frame.texts.push(
            TextPrimitive::new(
                day.format("%A").to_string(),
                x + 10.0,
                header + 5.0,
                LABEL_FONT_SIZE_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            )
            .rotated(90.0),
        );
        frame.texts.push(TextPrimitive::new(
            day.day().to_string(),
            x + self.config.day_column_width / 2.0,
            header - 10.0,
            LABEL_FONT_SIZE_PX,
            LABEL_COLOR,
            TextHAlign::Center,
        ));
        if day.day() == 1 {
            frame.texts.push(TextPrimitive::new(
                day.format("%B %Y").to_string(),
                x + 5.0,
                header - 35.0,
                LABEL_FONT_SIZE_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            ));
        }
    }

    fn push_events(&mut self, frame: &mut RenderFrame, mapper: CoordinateMapper, hours: WorkingHours) {
        let loaded = self.loaded_interval();
        let width = (self.config.day_column_width - 1.0).max(0.0);
        let header = self.config.header_height;

        for day in loaded.days() {
            let x = mapper.day_to_x(day);
            for event in self.index.events_covering(day) {
                let (y_start, y_end) = day_band(mapper, hours, day, event.period());
                frame.rects.push(
                    RectPrimitive::new(
                        x,
                        header + y_start,
                        width,
                        y_end - y_start,
                        RectRole::Event,
                        EVENT_COLOR,
                    )
                    .with_classes(event_classes(event)),
                );

                let Some(summary) = event.summary.as_deref().filter(|s| !s.is_empty()) else {
                    continue;
                };
                let clip = ClipRegion {
                    id: self.clip_ids.next_id(),
                    x,
                    y: header + y_start + 5.0,
                    width,
                    height: (y_end - y_start - 6.0).max(0.0),
                };
                frame.texts.push(
                    TextPrimitive::new(
                        summary,
                        x + 10.0,
                        header + y_start + 5.0,
                        LABEL_FONT_SIZE_PX,
                        LABEL_COLOR,
                        TextHAlign::Left,
                    )
                    .rotated(90.0)
                    .clipped_by(clip.id.clone()),
                );
                frame.clips.push(clip);
            }
        }
    }

    fn push_timeline_names(&self, frame: &mut RenderFrame) {
        let row = self.config.timeline_row_height;
        let gap = self.config.timeline_row_gap;
        let top = self.config.header_height + self.config.graph_height;
        for (i, timeline) in self.timelines.iter().enumerate() {
            if timeline.name().is_empty() {
                continue;
            }
            // Names stay fixed in the viewport while the layer slides.
            frame.texts.push(TextPrimitive::new(
                timeline.name(),
                20.0 - frame.layer_x,
                top + 5.0 + row + i as f64 * (gap + row),
                LABEL_FONT_SIZE_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            ));
        }
    }
}

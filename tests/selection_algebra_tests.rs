use chrono::{Duration, NaiveDate, NaiveDateTime};
use teleperiod::core::{DayIndex, Period, WorkingHours, at_minute};
use teleperiod::interaction::{PickOutcome, Selection, SelectionState};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    at_minute(day, hour * 60 + minute)
}

fn monday() -> NaiveDate {
    date(2024, 3, 4)
}

fn tuesday() -> NaiveDate {
    date(2024, 3, 5)
}

fn split_shift_index() -> DayIndex {
    let hours = WorkingHours::default();
    let mut index = DayIndex::new();
    for day in [monday(), tuesday()] {
        index.add_working_time(Period::new(at(day, 8, 0), at(day, 12, 0)), hours);
        index.add_working_time(Period::new(at(day, 13, 0), at(day, 17, 0)), hours);
    }
    index
}

fn selection(start: NaiveDateTime, end: NaiveDateTime) -> Selection {
    let mut selection = Selection::new();
    selection.pick(start);
    assert_eq!(selection.pick(end), PickOutcome::Completed);
    selection
}

#[test]
fn two_ordered_picks_make_a_valid_selection() {
    let mut selection = Selection::new();
    assert_eq!(selection.state(), SelectionState::Empty);

    assert_eq!(selection.pick(at(monday(), 9, 0)), PickOutcome::Restarted);
    assert_eq!(selection.state(), SelectionState::Picking);
    assert_eq!(selection.pick(at(monday(), 11, 0)), PickOutcome::Completed);

    assert!(selection.is_valid());
    assert_eq!(selection.start(), Some(at(monday(), 9, 0)));
    assert_eq!(selection.end(), Some(at(monday(), 11, 0)));
}

#[test]
fn earlier_second_pick_restarts_from_that_point() {
    let mut selection = Selection::new();
    selection.pick(at(monday(), 11, 0));
    assert_eq!(selection.pick(at(monday(), 9, 0)), PickOutcome::Restarted);
    assert_eq!(selection.start(), Some(at(monday(), 9, 0)));
    assert_eq!(selection.end(), None);
    assert!(!selection.is_valid());
}

#[test]
fn picking_the_start_again_collapses_without_range() {
    let mut selection = Selection::new();
    selection.pick(at(monday(), 9, 0));
    assert_eq!(selection.pick(at(monday(), 9, 0)), PickOutcome::Collapsed);
    assert_eq!(selection.start(), Some(at(monday(), 9, 0)));
    assert_eq!(selection.end(), None);
    assert!(!selection.is_valid());
}

#[test]
fn any_pick_after_a_valid_selection_restarts() {
    let mut selection = selection(at(monday(), 9, 0), at(monday(), 11, 0));
    assert_eq!(selection.pick(at(tuesday(), 10, 0)), PickOutcome::Restarted);
    assert_eq!(selection.start(), Some(at(tuesday(), 10, 0)));
    assert_eq!(selection.end(), None);
}

#[test]
fn picks_drop_sub_second_precision() {
    let mut selection = Selection::new();
    let point = at(monday(), 9, 0) + Duration::milliseconds(750);
    selection.pick(point);
    assert_eq!(selection.start(), Some(at(monday(), 9, 0)));
    assert_eq!(selection.pick(at(monday(), 9, 0)), PickOutcome::Collapsed);
}

#[test]
fn crop_period_handles_inside_outside_and_partial() {
    let selection = selection(at(monday(), 10, 0), at(monday(), 15, 0));

    let inside = Period::new(at(monday(), 11, 0), at(monday(), 12, 0));
    assert_eq!(selection.crop_period(inside), Some(inside));

    let touching_before = Period::new(at(monday(), 8, 0), at(monday(), 10, 0));
    assert_eq!(selection.crop_period(touching_before), None);
    let touching_after = Period::new(at(monday(), 15, 0), at(monday(), 17, 0));
    assert_eq!(selection.crop_period(touching_after), None);

    let straddling = Period::new(at(monday(), 8, 0), at(monday(), 17, 0));
    assert_eq!(
        selection.crop_period(straddling),
        Some(Period::new(at(monday(), 10, 0), at(monday(), 15, 0)))
    );
}

#[test]
fn crop_period_without_range_yields_nothing() {
    let mut selection = Selection::new();
    let period = Period::new(at(monday(), 8, 0), at(monday(), 12, 0));
    assert_eq!(selection.crop_period(period), None);
    selection.pick(at(monday(), 9, 0));
    assert_eq!(selection.crop_period(period), None);
}

#[test]
fn valid_periods_crop_working_times_across_days() {
    let index = split_shift_index();
    let hours = WorkingHours::default();
    let selection = selection(at(monday(), 10, 0), at(tuesday(), 14, 0));

    let periods = selection.valid_periods(&index, hours, false);
    assert_eq!(
        periods,
        vec![
            Period::new(at(monday(), 10, 0), at(monday(), 12, 0)),
            Period::new(at(monday(), 13, 0), at(monday(), 17, 0)),
            Period::new(at(tuesday(), 8, 0), at(tuesday(), 12, 0)),
            Period::new(at(tuesday(), 13, 0), at(tuesday(), 14, 0)),
        ]
    );
    assert_eq!(selection.duration(&index, hours), Duration::hours(11));
}

#[test]
fn invalid_selection_has_no_periods_and_zero_duration() {
    let index = split_shift_index();
    let hours = WorkingHours::default();
    let mut selection = Selection::new();
    assert!(selection.valid_periods(&index, hours, true).is_empty());
    selection.pick(at(monday(), 9, 0));
    assert!(selection.valid_periods(&index, hours, false).is_empty());
    assert_eq!(selection.duration(&index, hours), Duration::zero());
}

#[test]
fn two_hour_selection_inside_working_time_lasts_two_hours() {
    let index = split_shift_index();
    let selection = selection(at(monday(), 8, 0), at(monday(), 10, 0));
    let duration = selection.duration(&index, WorkingHours::default());
    assert_eq!(duration.num_milliseconds(), 7_200_000);
}

#[test]
fn selection_touching_working_time_only_at_edges_is_empty() {
    let index = split_shift_index();
    let selection = selection(at(monday(), 12, 0), at(monday(), 13, 0));
    assert!(
        selection
            .valid_periods(&index, WorkingHours::default(), false)
            .is_empty()
    );
}

#[test]
fn merge_joins_full_days_across_midnight() {
    let hours = WorkingHours::default();
    let mut index = DayIndex::new();
    for day in [monday(), tuesday()] {
        index.add_working_time(Period::new(hours.day_begin(day), hours.day_end(day)), hours);
    }
    let selection = selection(hours.day_begin(monday()), hours.day_end(tuesday()));

    let merged = selection.valid_periods(&index, hours, true);
    assert_eq!(
        merged,
        vec![Period::new(hours.day_begin(monday()), hours.day_end(tuesday()))]
    );
    assert_eq!(selection.valid_periods(&index, hours, false).len(), 2);
    // Duration sums the unmerged pieces.
    assert_eq!(selection.duration(&index, hours), Duration::hours(26));
}

#[test]
fn merge_spans_days_without_working_time() {
    let hours = WorkingHours::default();
    let friday = date(2024, 3, 8);
    let next_monday = date(2024, 3, 11);
    let mut index = DayIndex::new();
    for day in [friday, next_monday] {
        index.add_working_time(Period::new(hours.day_begin(day), hours.day_end(day)), hours);
    }
    let selection = selection(hours.day_begin(friday), hours.day_end(next_monday));

    let merged = selection.valid_periods(&index, hours, true);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].start, hours.day_begin(friday));
    assert_eq!(merged[0].end, hours.day_end(next_monday));
}

#[test]
fn end_day_is_skipped_when_selection_ends_at_its_midnight() {
    let index = split_shift_index();
    let selection = selection(at(monday(), 16, 0), at(tuesday(), 0, 0));
    let periods = selection.valid_periods(&index, WorkingHours::default(), false);
    assert_eq!(
        periods,
        vec![Period::new(at(monday(), 16, 0), at(monday(), 17, 0))]
    );
}

#[test]
fn malformed_indexed_period_counts_as_zero_duration() {
    let hours = WorkingHours::default();
    let mut index = split_shift_index();
    index.add_working_time(Period::new(at(monday(), 15, 30), at(monday(), 14, 30)), hours);
    let selection = selection(at(monday(), 8, 0), at(monday(), 17, 0));
    assert_eq!(selection.duration(&index, hours), Duration::hours(8));
}

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use teleperiod::TeleperiodError;
use teleperiod::core::{Boundary, CoordinateMapper, DayGrid, at_minute, midnight};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    at_minute(day, hour * 60 + minute)
}

fn mapper() -> CoordinateMapper {
    CoordinateMapper::new(date(2024, 3, 4), DayGrid::default())
}

#[test]
fn date_to_x_ignores_time_of_day() {
    let mapper = mapper();
    let monday = date(2024, 3, 4);
    assert_eq!(mapper.date_to_x(midnight(monday)), 0.0);
    assert_eq!(mapper.date_to_x(at(monday, 23, 59)), 0.0);
    assert_eq!(mapper.date_to_x(at(date(2024, 3, 5), 10, 0)), 30.0);
    assert_eq!(mapper.date_to_x(at(date(2024, 3, 3), 12, 0)), -30.0);
    assert_eq!(mapper.date_to_x(at(date(2024, 4, 3), 0, 1)), 30.0 * 30.0);
}

#[test]
fn x_to_date_uses_ceiling_of_columns_and_midnight() {
    let mapper = mapper();
    assert_eq!(mapper.x_to_date(0.0).expect("x"), midnight(date(2024, 3, 4)));
    assert_eq!(mapper.x_to_date(30.0).expect("x"), midnight(date(2024, 3, 5)));
    assert_eq!(mapper.x_to_date(31.0).expect("x"), midnight(date(2024, 3, 6)));
    assert_eq!(mapper.x_to_date(-30.0).expect("x"), midnight(date(2024, 3, 3)));
    assert_eq!(mapper.x_to_date(-1.0).expect("x"), midnight(date(2024, 3, 4)));
}

#[test]
fn x_to_date_rejects_non_finite_input() {
    let err = mapper().x_to_date(f64::NAN).expect_err("nan must fail");
    assert!(matches!(err, TeleperiodError::InvalidData(_)));
}

#[test]
fn huge_finite_coordinates_are_rejected() {
    let mapper = mapper();
    for x in [1.0e300, -1.0e300, 1.0e18] {
        assert!(matches!(
            mapper.x_to_date(x),
            Err(TeleperiodError::InvalidData(_))
        ));
    }
    assert!(matches!(
        mapper.y_to_minutes(1.0e300),
        Err(TeleperiodError::InvalidData(_))
    ));
    assert!(matches!(
        mapper.y_to_minutes(-1.0e300),
        Err(TeleperiodError::InvalidData(_))
    ));
}

#[test]
fn mapper_follows_boundary_origin() {
    let mut boundary = Boundary::new(date(2024, 3, 4));
    boundary.extend(-7);
    let mapper = CoordinateMapper::for_boundary(&boundary, DayGrid::default());
    assert_eq!(mapper.origin(), date(2024, 2, 26));
    assert_eq!(mapper.date_to_x(midnight(date(2024, 3, 4))), 7.0 * 30.0);
}

#[test]
fn time_to_y_clamps_and_interpolates() {
    let mapper = mapper();
    let day = date(2024, 3, 4);
    assert_eq!(mapper.time_to_y(at(day, 6, 0)), 0.0);
    assert_eq!(mapper.time_to_y(at(day, 7, 0)), 0.0);
    assert_relative_eq!(mapper.time_to_y(at(day, 13, 30)), 125.0);
    assert_relative_eq!(mapper.time_to_y(at(day, 20, 0)), 250.0);
    // Past the last minute the minute value itself is returned.
    assert_eq!(mapper.time_to_y(at(day, 20, 1)), 1200.0);
}

#[test]
fn y_to_minutes_inverts_linear_scale() {
    let mapper = mapper();
    assert_eq!(mapper.y_to_minutes(0.0).expect("y"), 420);
    assert_eq!(mapper.y_to_minutes(125.0).expect("y"), 810);
    assert_eq!(mapper.y_to_minutes(250.0).expect("y"), 1200);
    assert!(matches!(
        mapper.y_to_minutes(f64::INFINITY),
        Err(TeleperiodError::InvalidData(_))
    ));
}

#[test]
fn same_day_instants_share_a_column() {
    let mapper = mapper();
    let day = date(2024, 7, 19);
    let x = mapper.date_to_x(at(day, 0, 0));
    for minute in [1, 420, 719, 1200, 1439] {
        assert_eq!(mapper.date_to_x(at_minute(day, minute)), x);
    }
}

proptest! {
    #[test]
    fn minutes_survive_a_pixel_round_trip(minute in 420_u32..=1200) {
        let mapper = mapper();
        let y = mapper.time_to_y(at_minute(date(2024, 3, 4), minute));
        let back = mapper.y_to_minutes(y).expect("finite y");
        prop_assert!((back - i64::from(minute)).abs() <= 2);
    }

    #[test]
    fn column_x_maps_back_to_its_day(days in -400_i64..400) {
        let mapper = mapper();
        let day = date(2024, 3, 4) + chrono::Duration::days(days);
        let x = mapper.date_to_x(at(day, 9, 30));
        prop_assert_eq!(mapper.x_to_date(x).expect("finite x"), midnight(day));
    }
}

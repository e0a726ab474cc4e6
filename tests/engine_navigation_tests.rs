use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use teleperiod::api::{LoadKind, LoadRequest};
use teleperiod::core::{LoadInterval, RangeExtension};
use teleperiod::extensions::{TeleperiodObserver, Timeline};
use teleperiod::interaction::NavigationDirection;
use teleperiod::render::NullRenderer;
use teleperiod::{Teleperiod, TeleperiodConfig, TeleperiodError};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date") + chrono::Duration::days(offset)
}

fn engine() -> Teleperiod<NullRenderer> {
    let config = TeleperiodConfig::default().with_focus_date(day(0));
    Teleperiod::new(NullRenderer::default(), config).expect("engine init")
}

fn full_load(from: i64, to: i64) -> LoadRequest {
    LoadRequest {
        interval: LoadInterval::new(day(from), day(to)),
        kind: LoadKind::WorkingTimesAndEvents,
    }
}

struct ExtensionRecorder {
    seen: Rc<RefCell<Vec<RangeExtension>>>,
}

impl TeleperiodObserver for ExtensionRecorder {
    fn id(&self) -> &str {
        "extension-recorder"
    }

    fn on_range_extended(&mut self, extension: RangeExtension) {
        self.seen.borrow_mut().push(extension);
    }
}

struct RecordingTimeline {
    loads: Rc<RefCell<Vec<LoadInterval>>>,
}

impl Timeline for RecordingTimeline {
    fn name(&self) -> &str {
        "Team absences"
    }

    fn load(&mut self, interval: LoadInterval) {
        self.loads.borrow_mut().push(interval);
    }
}

#[test]
fn new_engine_requests_initially_visible_days() {
    let engine = engine();
    assert_eq!(engine.focus_date(), day(0));
    assert_eq!(engine.window().visible_days(), 30);
    assert_eq!(engine.pending_loads(), vec![full_load(0, 30)]);
    assert_eq!(engine.loaded_interval(), LoadInterval::new(day(0), day(30)));
    assert_eq!(engine.layer_x(), 0.0);
    assert_eq!(engine.layer_width(), 900.0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = TeleperiodConfig::default().with_day_column_width(0.0);
    let err = Teleperiod::new(NullRenderer::default(), config)
        .err()
        .expect("zero column width must fail");
    assert!(matches!(err, TeleperiodError::Config(_)));

    let config = TeleperiodConfig::default().with_width_px(0.0);
    let err = Teleperiod::new(NullRenderer::default(), config)
        .err()
        .expect("zero width must fail");
    assert!(matches!(err, TeleperiodError::InvalidViewport { width: 0, .. }));
}

#[test]
fn forward_step_past_loaded_range_requests_exactly_the_new_days() {
    let mut engine = engine();
    engine.take_pending_loads();

    let transition = engine.navigate_forward().expect("idle queue starts now");
    assert_eq!(transition.direction, NavigationDirection::Forward);
    assert!(transition.extended);
    assert_eq!(transition.from_x, 0.0);
    assert_eq!(transition.to_x, -210.0);
    assert_eq!(transition.delta_x(), -210.0);

    assert_eq!(engine.pending_loads(), vec![full_load(30, 37)]);
    assert_eq!(engine.window().from_offset(), 7);
    assert_eq!(engine.window().to_offset(), 37);
}

#[test]
fn backward_step_creates_room_on_the_left_before_sliding() {
    let mut engine = engine();
    engine.take_pending_loads();

    let transition = engine.navigate_backward().expect("idle queue starts now");
    assert!(transition.extended);
    assert_eq!(transition.from_x, -210.0);
    assert_eq!(transition.to_x, 0.0);
    assert_eq!(engine.pending_loads(), vec![full_load(-7, 0)]);
    assert_eq!(engine.mapper().origin(), day(-7));
    assert_eq!(engine.layer_x(), 0.0);
}

#[test]
fn slide_inside_loaded_range_requests_nothing() {
    let mut engine = engine();
    engine.navigate_forward().expect("starts");
    engine.transition_finished();
    engine.take_pending_loads();

    let transition = engine.navigate_backward().expect("starts");
    assert!(!transition.extended);
    assert_eq!(transition.from_x, -210.0);
    assert_eq!(transition.to_x, 0.0);
    assert!(engine.pending_loads().is_empty());
}

#[test]
fn queued_steps_run_one_after_another() {
    let mut engine = engine();
    let first = engine.navigate_forward().expect("starts");
    assert_eq!(engine.navigate_forward(), None);
    assert_eq!(engine.navigate_backward(), None);
    assert_eq!(engine.queued_navigation_count(), 3);
    assert_eq!(engine.active_transition(), Some(first));

    let second = engine.transition_finished().expect("second step starts");
    assert_eq!(second.id, first.id + 1);
    assert_eq!(second.direction, NavigationDirection::Forward);
    assert!(second.extended);
    assert_eq!(second.from_x, -210.0);
    assert_eq!(second.to_x, -420.0);

    let third = engine.transition_finished().expect("third step starts");
    assert_eq!(third.direction, NavigationDirection::Backward);
    assert!(!third.extended);

    assert_eq!(engine.transition_finished(), None);
    assert_eq!(engine.active_transition(), None);
    assert_eq!(engine.queued_navigation_count(), 0);
    assert_eq!(
        engine.loaded_intervals(),
        &[
            LoadInterval::new(day(0), day(30)),
            LoadInterval::new(day(30), day(37)),
            LoadInterval::new(day(37), day(44)),
        ]
    );
}

#[test]
fn transition_waits_for_every_animated_element() {
    let mut engine = engine();
    engine.navigate_forward().expect("starts");
    engine.navigate_forward();
    engine.transition_started();
    engine.transition_started();

    assert_eq!(engine.transition_finished(), None);
    assert!(engine.active_transition().is_some());
    assert_eq!(engine.queued_navigation_count(), 2);

    let next = engine.transition_finished().expect("next step starts");
    assert_eq!(next.direction, NavigationDirection::Forward);
    assert_eq!(engine.queued_navigation_count(), 1);
}

#[test]
fn observers_see_every_extension() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine();
    engine
        .register_observer(Box::new(ExtensionRecorder {
            seen: Rc::clone(&seen),
        }))
        .expect("register observer");

    engine.navigate_backward().expect("starts");
    assert_eq!(
        seen.borrow().as_slice(),
        &[RangeExtension {
            from: day(-7),
            to: day(0),
        }]
    );
}

#[test]
fn re_focusing_reports_the_new_window_and_slides_stay_silent() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine();
    engine
        .register_observer(Box::new(ExtensionRecorder {
            seen: Rc::clone(&seen),
        }))
        .expect("register observer");

    let target = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
    engine.move_to(target);
    engine.navigate_forward().expect("starts");
    engine.transition_finished();
    engine.navigate_backward().expect("starts");

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            RangeExtension {
                from: target,
                to: target + chrono::Duration::days(30),
            },
            RangeExtension {
                from: target + chrono::Duration::days(30),
                to: target + chrono::Duration::days(37),
            },
        ]
    );
}

#[test]
fn duplicate_observer_ids_are_rejected() {
    let mut engine = engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(ExtensionRecorder {
            seen: Rc::clone(&seen),
        }))
        .expect("first registration");
    let err = engine
        .register_observer(Box::new(ExtensionRecorder { seen }))
        .expect_err("duplicate id must fail");
    assert!(matches!(err, TeleperiodError::InvalidData(_)));
    assert_eq!(engine.observer_count(), 1);
    assert!(engine.unregister_observer("extension-recorder"));
    assert!(!engine.has_observer("extension-recorder"));
}

#[test]
fn move_to_restarts_window_on_new_focus() {
    let mut engine = engine();
    engine.navigate_forward().expect("starts");
    engine.transition_finished();
    engine.take_pending_loads();

    let target = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
    engine.move_to(target);

    assert_eq!(engine.focus_date(), target);
    assert_eq!(engine.window().from_offset(), 0);
    assert_eq!(engine.layer_x(), 0.0);
    assert_eq!(
        engine.pending_loads(),
        vec![LoadRequest {
            interval: LoadInterval::new(target, target + chrono::Duration::days(30)),
            kind: LoadKind::WorkingTimesAndEvents,
        }]
    );
}

#[test]
fn timelines_follow_lazy_loading_and_grow_the_viewport() {
    let loads = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine();
    let height_without = engine.viewport().height;

    engine.add_timeline(Box::new(RecordingTimeline {
        loads: Rc::clone(&loads),
    }));
    engine.navigate_forward().expect("starts");

    assert_eq!(
        loads.borrow().as_slice(),
        &[
            LoadInterval::new(day(0), day(30)),
            LoadInterval::new(day(30), day(37)),
        ]
    );
    assert_eq!(engine.timeline_names(), vec!["Team absences"]);
    assert_eq!(engine.viewport().height, height_without + 30);
}

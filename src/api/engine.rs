use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::debug;

use crate::core::{
    CoordinateMapper, DayIndex, LoadInterval, Period, RangeExtension, Viewport, ViewportWindow,
};
use crate::error::{TeleperiodError, TeleperiodResult};
use crate::extensions::{TeleperiodObserver, Timeline};
use crate::interaction::{AnimationQueue, NavigationDirection, Selection, Transition};
use crate::render::{ClipIdGenerator, Renderer};

use super::{LoadRequest, TeleperiodConfig};

/// Main orchestration facade consumed by host applications.
///
/// `Teleperiod` owns the loaded range and visible window, the day index fed
/// by data completions, the navigation queue and the selection. Drawing,
/// pointer wiring and data transport stay with the host.
pub struct Teleperiod<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TeleperiodConfig,
    pub(super) focus: NaiveDate,
    pub(super) window: ViewportWindow,
    pub(super) index: DayIndex,
    pub(super) loaded_intervals: Vec<LoadInterval>,
    pub(super) pending_loads: VecDeque<LoadRequest>,
    pub(super) queue: AnimationQueue<NavigationDirection>,
    pub(super) active_transition: Option<Transition>,
    pub(super) next_transition_id: u64,
    pub(super) selection: Selection,
    pub(super) highlighted: Vec<Period>,
    pub(super) selected_events: Vec<String>,
    pub(super) observers: Vec<Box<dyn TeleperiodObserver>>,
    pub(super) timelines: Vec<Box<dyn Timeline>>,
    pub(super) clip_ids: ClipIdGenerator,
    /// Filled by listeners on both boundaries, drained after every move.
    pub(super) range_extensions: Rc<RefCell<Vec<RangeExtension>>>,
}

/// Window whose boundaries report every extension into `sink`.
fn subscribed_window(
    focus: NaiveDate,
    config: &TeleperiodConfig,
    sink: &Rc<RefCell<Vec<RangeExtension>>>,
) -> ViewportWindow {
    let mut window = ViewportWindow::new(
        focus,
        config.initial_visible_days(),
        config.navigation_step_days,
    );
    let lower_sink = Rc::clone(sink);
    window
        .lower_mut()
        .subscribe(move |extension| lower_sink.borrow_mut().push(extension));
    let upper_sink = Rc::clone(sink);
    window
        .upper_mut()
        .subscribe(move |extension| upper_sink.borrow_mut().push(extension));
    window
}

impl<R: Renderer> Teleperiod<R> {
    /// Builds the engine and requests data for the initially visible days.
    pub fn new(renderer: R, config: TeleperiodConfig) -> TeleperiodResult<Self> {
        config.validate()?;
        let viewport = config.viewport(0);
        if !viewport.is_valid() {
            return Err(TeleperiodError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let focus = config.resolved_focus_date();
        let range_extensions = Rc::new(RefCell::new(Vec::new()));
        let window = subscribed_window(focus, &config, &range_extensions);

        let mut engine = Self {
            renderer,
            config,
            focus,
            window,
            index: DayIndex::new(),
            loaded_intervals: Vec::new(),
            pending_loads: VecDeque::new(),
            queue: AnimationQueue::new(),
            active_transition: None,
            next_transition_id: 0,
            selection: Selection::new(),
            highlighted: Vec::new(),
            selected_events: Vec::new(),
            observers: Vec::new(),
            timelines: Vec::new(),
            clip_ids: ClipIdGenerator::new(),
            range_extensions,
        };
        engine.open_window();
        Ok(engine)
    }

    fn open_window(&mut self) {
        self.window.open();
        debug!(
            focus = %self.focus,
            visible_days = self.window.visible_days(),
            "opened calendar window"
        );
        self.dispatch_range_extensions();
    }

    /// Re-centers the calendar on `date`.
    ///
    /// Boundaries and the visible window start over from `date` and the new
    /// initial range is requested. Already indexed days are kept.
    pub fn move_to(&mut self, date: NaiveDate) {
        self.config.focus_date = Some(date);
        self.focus = date;
        self.range_extensions.borrow_mut().clear();
        self.window = subscribed_window(date, &self.config, &self.range_extensions);
        self.open_window();
    }

    /// Forwards the extensions reported by the boundaries since the last call.
    pub(super) fn dispatch_range_extensions(&mut self) {
        let extensions = std::mem::take(&mut *self.range_extensions.borrow_mut());
        for extension in extensions {
            self.on_range_extended(extension);
        }
    }

    fn on_range_extended(&mut self, extension: RangeExtension) {
        for observer in &mut self.observers {
            observer.on_range_extended(extension);
        }
        if !extension.is_empty() {
            self.request_load(extension.interval());
        }
    }

    #[must_use]
    pub fn config(&self) -> &TeleperiodConfig {
        &self.config
    }

    #[must_use]
    pub fn focus_date(&self) -> NaiveDate {
        self.focus
    }

    #[must_use]
    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    #[must_use]
    pub fn day_index(&self) -> &DayIndex {
        &self.index
    }

    /// Loaded `[lower, upper)` day range.
    #[must_use]
    pub fn loaded_interval(&self) -> LoadInterval {
        self.window.loaded_interval()
    }

    /// Every interval requested so far, in request order.
    #[must_use]
    pub fn loaded_intervals(&self) -> &[LoadInterval] {
        &self.loaded_intervals
    }

    /// Mapper anchored on the lower boundary's current date.
    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::for_boundary(self.window.lower(), self.config.day_grid())
    }

    /// Settled x of the sliding layer inside the viewport.
    #[must_use]
    pub fn layer_x(&self) -> f64 {
        (self.window.lower().day_offset() - self.window.from_offset()) as f64
            * self.config.day_column_width
    }

    #[must_use]
    pub fn layer_width(&self) -> f64 {
        self.loaded_interval().day_count() as f64 * self.config.day_column_width
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport(self.timelines.len())
    }

    /// Registers an observer. Ids must be unique and non-empty.
    pub fn register_observer(&mut self, observer: Box<dyn TeleperiodObserver>) -> TeleperiodResult<()> {
        let observer_id = observer.id();
        if observer_id.is_empty() {
            return Err(TeleperiodError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(observer_id) {
            return Err(TeleperiodError::InvalidData(format!(
                "observer `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Returns `true` when an observer was removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != observer_id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|observer| observer.id() == observer_id)
    }

    pub fn add_timeline(&mut self, mut timeline: Box<dyn Timeline>) {
        let loaded = self.loaded_interval();
        if !loaded.is_empty() {
            timeline.load(loaded);
        }
        self.timelines.push(timeline);
    }

    #[must_use]
    pub fn timeline_names(&self) -> Vec<&str> {
        self.timelines.iter().map(|timeline| timeline.name()).collect()
    }

    pub fn render(&mut self) -> TeleperiodResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

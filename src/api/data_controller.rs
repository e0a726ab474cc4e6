use chrono::NaiveDateTime;
use tracing::{debug, trace, warn};

use crate::core::{Event, EventInsert, LoadInterval, Period};
use crate::error::{TeleperiodError, TeleperiodResult};
use crate::render::Renderer;

use super::Teleperiod;

/// Data collaborator answering load requests synchronously.
///
/// Hosts with asynchronous transports skip this trait: they drain
/// [`Teleperiod::take_pending_loads`] and report each answer through
/// [`Teleperiod::complete_working_times`] / [`Teleperiod::complete_events`],
/// in any order.
pub trait CalendarSource {
    /// Working-time periods overlapping `interval`. Multi-day periods are
    /// accepted; the engine splits them per day.
    fn working_times(&mut self, interval: LoadInterval) -> TeleperiodResult<Vec<Period>>;

    fn events(&mut self, interval: LoadInterval) -> TeleperiodResult<Vec<Event>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    WorkingTimesAndEvents,
    EventsOnly,
}

impl LoadKind {
    #[must_use]
    pub fn wants_working_times(self) -> bool {
        matches!(self, Self::WorkingTimesAndEvents)
    }
}

/// One outstanding fetch the host must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub interval: LoadInterval,
    pub kind: LoadKind,
}

impl<R: Renderer> Teleperiod<R> {
    pub(super) fn request_load(&mut self, interval: LoadInterval) {
        self.loaded_intervals.push(interval);
        self.queue_load(interval, LoadKind::WorkingTimesAndEvents);
        for timeline in &mut self.timelines {
            timeline.load(interval);
        }
    }

    fn queue_load(&mut self, interval: LoadInterval, kind: LoadKind) {
        let cleared = self.index.clear_events(interval);
        debug!(%interval, ?kind, cleared_events = cleared, "requesting calendar data");
        self.pending_loads.push_back(LoadRequest { interval, kind });
    }

    #[must_use]
    pub fn pending_loads(&self) -> Vec<LoadRequest> {
        self.pending_loads.iter().copied().collect()
    }

    /// Hands every outstanding request to the host, oldest first.
    pub fn take_pending_loads(&mut self) -> Vec<LoadRequest> {
        self.pending_loads.drain(..).collect()
    }

    /// Answers every outstanding request from `source`. Returns how many
    /// requests were processed.
    pub fn load_pending_from<S: CalendarSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let requests = self.take_pending_loads();
        for request in &requests {
            if request.kind.wants_working_times() {
                let result = source.working_times(request.interval);
                self.complete_working_times(request.interval, result);
            }
            let result = source.events(request.interval);
            self.complete_events(request.interval, result);
        }
        requests.len()
    }

    /// Indexes a working-time answer for `interval`.
    ///
    /// A failed fetch is reported to observers; nothing already indexed is
    /// rolled back.
    pub fn complete_working_times(
        &mut self,
        interval: LoadInterval,
        result: TeleperiodResult<Vec<Period>>,
    ) {
        let periods = match result {
            Ok(periods) => periods,
            Err(err) => {
                self.report_fetch_error(interval, err);
                return;
            }
        };

        let hours = self.config.working_hours();
        let mut indexed = 0;
        for period in periods {
            indexed += self.index.add_working_time(period, hours).len();
        }
        trace!(%interval, indexed, "indexed working times");

        if self.selection.is_valid() {
            self.highlighted = self.selection.valid_periods(&self.index, hours, false);
        }
    }

    /// Indexes an event answer for `interval`.
    ///
    /// Events entirely outside the interval are ignored. Events listed in
    /// the selected-events set are not indexed; together they form the range
    /// applied as the new selection.
    pub fn complete_events(&mut self, interval: LoadInterval, result: TeleperiodResult<Vec<Event>>) {
        let events = match result {
            Ok(events) => events,
            Err(err) => {
                self.report_fetch_error(interval, err);
                return;
            }
        };

        let mut selected: Option<(NaiveDateTime, NaiveDateTime)> = None;
        let mut indexed = 0;
        for event in events {
            if event.start > interval.end() || event.end < interval.start() {
                continue;
            }

            if self.is_selected_event(&event) {
                selected = Some(match selected {
                    Some((start, end)) => (start.min(event.start), end.max(event.end)),
                    None => (event.start, event.end),
                });
                continue;
            }

            match self.index.insert_event(event.clone()) {
                EventInsert::Indexed => indexed += 1,
                EventInsert::Duplicate => {
                    trace!(uid = ?event.uid, "skipping re-inserted event");
                }
                EventInsert::Conflict { with } => {
                    warn!(
                        uid = ?event.uid,
                        start = %event.start,
                        end = %event.end,
                        conflicts = with.len(),
                        "event ignored because of a conflict on the same day"
                    );
                }
            }
        }
        trace!(%interval, indexed, "indexed events");

        if let Some((start, end)) = selected {
            self.set_selection(start, end);
        }
    }

    fn is_selected_event(&self, event: &Event) -> bool {
        event
            .uid
            .as_ref()
            .is_some_and(|uid| self.selected_events.iter().any(|selected| selected == uid))
    }

    fn report_fetch_error(&mut self, interval: LoadInterval, err: TeleperiodError) {
        let err = match err {
            TeleperiodError::Fetch { .. } => err,
            other => TeleperiodError::fetch(interval, other.to_string()),
        };
        warn!(%interval, error = %err, "calendar data fetch failed");
        for observer in &mut self.observers {
            observer.on_fetch_error(&err);
        }
    }

    /// Reloads events for the whole loaded range.
    pub fn refresh_events(&mut self) {
        let loaded = self.loaded_interval();
        if loaded.is_empty() {
            return;
        }
        self.queue_load(loaded, LoadKind::EventsOnly);
    }

    /// Marks events by uid as edited: they leave the event layer and their
    /// combined range becomes the selection once events are reloaded.
    pub fn edit_events(&mut self, uids: Vec<String>) {
        self.selected_events = uids;
        self.refresh_events();
    }

    #[must_use]
    pub fn selected_events(&self) -> &[String] {
        &self.selected_events
    }
}

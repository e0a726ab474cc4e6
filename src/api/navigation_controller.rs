use tracing::{debug, trace};

use crate::interaction::{NavigationDirection, QueueStep, Transition};
use crate::render::Renderer;

use super::Teleperiod;

impl<R: Renderer> Teleperiod<R> {
    /// Queues one step towards the past.
    ///
    /// Returns the transition to animate when nothing else was running.
    pub fn navigate_backward(&mut self) -> Option<Transition> {
        self.navigate(NavigationDirection::Backward)
    }

    /// Queues one step towards the future.
    pub fn navigate_forward(&mut self) -> Option<Transition> {
        self.navigate(NavigationDirection::Forward)
    }

    pub fn navigate(&mut self, direction: NavigationDirection) -> Option<Transition> {
        let starts_now = self.queue.enqueue(direction).is_some();
        if !starts_now {
            trace!(?direction, waiting = self.queue.waiting(), "navigation queued");
            return None;
        }
        self.start_queued_transition()
    }

    /// Transition currently animating, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<Transition> {
        self.active_transition
    }

    #[must_use]
    pub fn queued_navigation_count(&self) -> usize {
        self.queue.len()
    }

    /// Start signal of one element animated by the active transition.
    pub fn transition_started(&mut self) {
        self.queue.on_transition_start();
    }

    /// End signal of one element animated by the active transition.
    ///
    /// Once the whole transition ended, the next queued step runs and its
    /// transition is returned.
    pub fn transition_finished(&mut self) -> Option<Transition> {
        match self.queue.on_transition_end() {
            QueueStep::Completed(direction) => {
                trace!(?direction, "transition finished");
                self.active_transition = None;
                self.start_queued_transition()
            }
            QueueStep::StillRunning | QueueStep::Idle => None,
        }
    }

    fn start_queued_transition(&mut self) -> Option<Transition> {
        let direction = *self.queue.head()?;
        let width = self.config.day_column_width;
        let from_offset_before = self.window.from_offset();

        let extension = match direction {
            NavigationDirection::Backward => self.window.grow_backward(),
            NavigationDirection::Forward => self.window.grow_forward(),
        };

        let lower = self.window.lower().day_offset();
        let transition = Transition {
            id: self.next_transition_id,
            direction,
            from_x: (lower - from_offset_before) as f64 * width,
            to_x: (lower - self.window.from_offset()) as f64 * width,
            extended: extension.is_some(),
        };
        self.next_transition_id += 1;

        debug!(
            ?direction,
            from_offset = self.window.from_offset(),
            to_offset = self.window.to_offset(),
            extended = transition.extended,
            "navigation step"
        );
        self.dispatch_range_extensions();

        self.active_transition = Some(transition);
        Some(transition)
    }
}

use chrono::{Duration, NaiveDateTime};
use tracing::trace;

use crate::core::Period;
use crate::error::TeleperiodResult;
use crate::interaction::{ItemBounds, PickOutcome, Selection, SelectionView, pointer_date};
use crate::render::Renderer;

use super::Teleperiod;

impl<R: Renderer> Teleperiod<R> {
    /// Feeds one picked point to the selection and refreshes the highlight.
    ///
    /// Observers are notified on every call, whatever the outcome.
    pub fn pick(&mut self, point: NaiveDateTime) -> PickOutcome {
        let outcome = self.selection.pick(point);
        self.highlighted = if outcome.is_valid() {
            self.selection
                .valid_periods(&self.index, self.config.working_hours(), false)
        } else {
            Vec::new()
        };
        trace!(?outcome, state = ?self.selection.state(), "selection pick");
        self.notify_selection_changed();
        outcome
    }

    /// Picks the point under the pointer inside a working-time item.
    ///
    /// `column_x` is the x of the day column in layer space, `y` the pointer
    /// y relative to the top of the day column.
    pub fn pick_at(
        &mut self,
        column_x: f64,
        y: f64,
        item: ItemBounds,
    ) -> TeleperiodResult<PickOutcome> {
        let point = self.pointer_date(column_x, y, item)?;
        Ok(self.pick(point))
    }

    /// Calendar instant under the pointer, snapped like a pick would be.
    pub fn pointer_date(
        &self,
        column_x: f64,
        y: f64,
        item: ItemBounds,
    ) -> TeleperiodResult<NaiveDateTime> {
        pointer_date(self.mapper(), column_x, y, item, self.config.snap_distance_px)
    }

    /// Replaces the selection with `[from, to)`. Returns whether it is valid.
    pub fn set_selection(&mut self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.clear_selection();
        self.pick(from);
        self.pick(to).is_valid()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.highlighted.clear();
        self.notify_selection_changed();
    }

    fn notify_selection_changed(&mut self) {
        let hours = self.config.working_hours();
        for observer in &mut self.observers {
            observer.on_selection_changed(SelectionView::new(&self.selection, &self.index, hours));
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn selection_view(&self) -> SelectionView<'_> {
        SelectionView::new(&self.selection, &self.index, self.config.working_hours())
    }

    /// Periods currently drawn as the selection overlay.
    #[must_use]
    pub fn highlighted_periods(&self) -> &[Period] {
        &self.highlighted
    }

    #[must_use]
    pub fn selection_duration(&self) -> Duration {
        self.selection
            .duration(&self.index, self.config.working_hours())
    }

    #[must_use]
    pub fn selection_periods(&self, merge_contiguous: bool) -> Vec<Period> {
        self.selection
            .valid_periods(&self.index, self.config.working_hours(), merge_contiguous)
    }
}

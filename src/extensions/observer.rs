use crate::core::RangeExtension;
use crate::error::TeleperiodError;
use crate::interaction::SelectionView;

/// Host-side hooks fired by the engine.
///
/// Observers read state through the provided views and cannot mutate the
/// engine from inside a callback. All hooks default to no-ops.
pub trait TeleperiodObserver {
    fn id(&self) -> &str;

    /// Fired on every selection transition, resets included.
    fn on_selection_changed(&mut self, _selection: SelectionView<'_>) {}

    /// Fired for every extension reported through the engine's lower and
    /// upper boundary subscriptions.
    fn on_range_extended(&mut self, _extension: RangeExtension) {}

    /// Error sink for failed data fetches.
    fn on_fetch_error(&mut self, _error: &TeleperiodError) {}
}

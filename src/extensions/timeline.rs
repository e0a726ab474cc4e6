use crate::core::LoadInterval;

/// Extra row drawn under the working-time graph, e.g. absences of a team.
///
/// Timelines share the engine's lazy loading: `load` is called for every
/// interval the engine requests data for.
pub trait Timeline {
    fn name(&self) -> &str;

    fn load(&mut self, interval: LoadInterval);
}

pub mod animation_queue;
pub mod pointer;
pub mod selection;

use serde::{Deserialize, Serialize};

pub use animation_queue::{AnimationQueue, QueueStep};
pub use pointer::{ItemBounds, pointer_date, round_pick_minutes, snap_to_item_edges};
pub use selection::{PickOutcome, Selection, SelectionState, SelectionView};

/// Direction of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationDirection {
    /// Towards the past; the sliding layer moves right.
    Backward,
    /// Towards the future; the sliding layer moves left.
    Forward,
}

/// One running slide of the day layer, produced when a navigation request
/// reaches the head of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Sequence number, unique per engine instance.
    pub id: u64,
    pub direction: NavigationDirection,
    /// Layer x before the slide, after any space was created on the left.
    pub from_x: f64,
    pub to_x: f64,
    /// Whether the step extended the loaded range.
    pub extended: bool,
}

impl Transition {
    #[must_use]
    pub fn delta_x(self) -> f64 {
        self.to_x - self.from_x
    }
}

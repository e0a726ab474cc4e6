use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::LoadInterval;

/// Handle returned by [`Boundary::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered span covered by one boundary move.
///
/// `from <= to` always holds, whichever direction the boundary moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeExtension {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RangeExtension {
    #[must_use]
    pub fn interval(self) -> LoadInterval {
        LoadInterval::new(self.from, self.to)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.from == self.to
    }
}

type RangeListener = Box<dyn FnMut(RangeExtension)>;

/// One edge of the loaded calendar range, tracked as a day offset from the
/// date it was anchored on.
pub struct Boundary {
    anchor_date: NaiveDate,
    current_date: NaiveDate,
    day_offset: i64,
    listeners: Vec<(SubscriptionId, RangeListener)>,
    next_subscription: u64,
}

impl Boundary {
    #[must_use]
    pub fn new(init_date: NaiveDate) -> Self {
        Self {
            anchor_date: init_date,
            current_date: init_date,
            day_offset: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    #[must_use]
    pub fn day_offset(&self) -> i64 {
        self.day_offset
    }

    /// Moves the boundary by `delta_days` (either sign) and notifies listeners.
    ///
    /// A zero delta is accepted and still notifies with an empty span.
    pub fn extend(&mut self, delta_days: i64) -> RangeExtension {
        let old_date = self.current_date;
        let new_date = old_date + Duration::days(delta_days);
        self.day_offset += delta_days;
        self.current_date = new_date;

        let extension = RangeExtension {
            from: old_date.min(new_date),
            to: old_date.max(new_date),
        };
        for (_, listener) in &mut self.listeners {
            listener(extension);
        }
        extension
    }

    pub fn subscribe(&mut self, listener: impl FnMut(RangeExtension) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` when a listener was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(entry, _)| *entry != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boundary")
            .field("anchor_date", &self.anchor_date)
            .field("current_date", &self.current_date)
            .field("day_offset", &self.day_offset)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

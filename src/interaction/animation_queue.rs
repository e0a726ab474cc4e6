use std::collections::VecDeque;

/// Result of delivering one transition end signal to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueStep<T> {
    /// Nothing was running.
    Idle,
    /// Other elements of the head transition are still animating.
    StillRunning,
    /// The head transition fully ended and was removed. The new head, if any,
    /// must be started by the caller.
    Completed(T),
}

/// FIFO that lets exactly one visual transition run at a time.
///
/// Requests are never merged or dropped: two identical requests arriving
/// back to back run as two sequential transitions. A transition may animate
/// several elements; it counts as ended once every started element ended.
#[derive(Debug, Clone)]
pub struct AnimationQueue<T> {
    queued: VecDeque<T>,
    running_elements: usize,
}

impl<T> Default for AnimationQueue<T> {
    fn default() -> Self {
        Self {
            queued: VecDeque::new(),
            running_elements: 0,
        }
    }
}

impl<T> AnimationQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `request`.
    ///
    /// Returns the request when the queue was idle, meaning the caller must
    /// start it now. Returns `None` when it waits behind a running transition.
    pub fn enqueue(&mut self, request: T) -> Option<&T> {
        self.queued.push_back(request);
        if self.queued.len() > 1 {
            return None;
        }
        self.running_elements = 0;
        self.queued.front()
    }

    /// Request currently executing.
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.queued.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Number of requests waiting behind the head.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.queued.len().saturating_sub(1)
    }

    /// Start signal of one animated element of the head transition.
    pub fn on_transition_start(&mut self) {
        if !self.queued.is_empty() {
            self.running_elements += 1;
        }
    }

    /// End signal of one animated element of the head transition.
    ///
    /// A transition that never reported a start is finished by its first end
    /// signal.
    pub fn on_transition_end(&mut self) -> QueueStep<T> {
        self.running_elements = self.running_elements.saturating_sub(1);
        if self.running_elements > 0 {
            return QueueStep::StillRunning;
        }
        match self.queued.pop_front() {
            Some(completed) => QueueStep::Completed(completed),
            None => QueueStep::Idle,
        }
    }
}

use std::collections::VecDeque;

/// Work postponed until the current input event has finished dispatching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Re-resolve the search field, focus it and put the caret at the end
    FocusSearch,
    /// Put the caret at the end of the already focused search field
    PlaceCaret,
}

/// FIFO of deferred tasks, drained by the host between events.
///
/// There is no cancellation: a rebuild between scheduling and draining is
/// tolerated because the tasks re-resolve what they touch.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<DeferredTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: DeferredTask) {
        self.tasks.push_back(task);
    }

    /// Take everything scheduled so far. Tasks scheduled while the batch runs
    /// belong to the next turn.
    pub fn take_batch(&mut self) -> Vec<DeferredTask> {
        self.tasks.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

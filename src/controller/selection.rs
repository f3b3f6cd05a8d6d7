use log::debug;

use crate::dom::{Document, ScrollOptions};

use super::binding::Handles;
use super::deferred::{DeferredQueue, DeferredTask};
use super::Disposition;

/// The single selection index. `None` means the search field is the active
/// surface and no row is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Forget the index without touching the document (after a roster swap
    /// the old row is gone anyway)
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// The only mutation point for the index
    pub fn move_to(
        &mut self,
        doc: &mut dyn Document,
        handles: &Handles,
        selected_class: &str,
        target: Option<usize>,
        should_focus: bool,
    ) {
        if let Some(previous) = self.index.and_then(|i| handles.row(i)) {
            doc.remove_class(previous, selected_class);
        }

        self.index = target.filter(|&i| i < handles.roster.len());

        if should_focus {
            if let Some(row) = self.index.and_then(|i| handles.row(i)) {
                doc.add_class(row, selected_class);
                doc.scroll_into_view(row, ScrollOptions::CENTERED);
            }
        }
    }

    pub fn move_down(
        &mut self,
        doc: &mut dyn Document,
        handles: &Handles,
        selected_class: &str,
    ) -> Disposition {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= handles.roster.len() {
            debug!("move_down: already at the last row");
            return Disposition::PassThrough;
        }

        if let Some(search) = handles.search {
            doc.blur(search);
        }
        self.move_to(doc, handles, selected_class, Some(next), true);
        Disposition::Consumed
    }

    pub fn move_up(
        &mut self,
        doc: &mut dyn Document,
        handles: &Handles,
        selected_class: &str,
        deferred: &mut DeferredQueue,
    ) -> Disposition {
        let Some(current) = self.index else {
            debug!("move_up: nothing selected");
            return Disposition::PassThrough;
        };

        if current == 0 {
            if let Some(search) = handles.search {
                doc.focus(search);
                deferred.schedule(DeferredTask::PlaceCaret);
            }
        }

        self.move_to(doc, handles, selected_class, current.checked_sub(1), true);
        Disposition::Consumed
    }

    pub fn focus_input(
        &mut self,
        doc: &mut dyn Document,
        handles: &Handles,
        selected_class: &str,
        deferred: &mut DeferredQueue,
    ) -> Disposition {
        let Some(current) = self.index else {
            return Disposition::PassThrough;
        };

        if let Some(row) = handles.row(current) {
            doc.remove_class(row, selected_class);
        }
        self.index = None;

        // Focusing now would let the triggering key land in the field
        deferred.schedule(DeferredTask::FocusSearch);
        Disposition::Consumed
    }

    /// Empty the search field. Returns whether the field was cleared, in which
    /// case the caller emits the search signal.
    pub fn clear_input(&self, doc: &mut dyn Document, handles: &Handles) -> bool {
        if self.index.is_some() {
            return false;
        }
        let Some(search) = handles.search else {
            return false;
        };
        doc.set_value(search, "");
        true
    }
}

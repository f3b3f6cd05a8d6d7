use std::collections::BTreeMap;

use log::{debug, warn};

use crate::config::Selectors;
use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
}

/// What a bound listener does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Pointer selection of the row at this roster index
    SelectRow(usize),
    /// Pointer press on the search field
    SearchField,
    CycleTheme,
    ToggleHelp,
    CloseHelp,
    /// Fires only when the press lands on the overlay element itself
    HelpBackdrop,
}

/// Stores at most one listener per element per event kind
#[derive(Debug, Default)]
pub struct BindingRegistry {
    listeners: BTreeMap<(ElementId, EventKind), Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener, replacing any previous one for the same element and
    /// event kind. Returns `true` when a listener was replaced.
    pub fn attach(&mut self, id: ElementId, kind: EventKind, binding: Binding) -> bool {
        self.listeners.insert((id, kind), binding).is_some()
    }

    /// Detach everything, returning how many listeners were dropped
    pub fn detach_all(&mut self) -> usize {
        let count = self.listeners.len();
        self.listeners.clear();
        count
    }

    pub fn find(&self, id: ElementId, kind: EventKind) -> Option<Binding> {
        self.listeners.get(&(id, kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Element handles resolved by the latest rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handles {
    /// Keyboard-navigable rows in document order
    pub roster: Vec<ElementId>,
    pub search: Option<ElementId>,
    pub overlay: Option<ElementId>,
    pub overlay_close: Option<ElementId>,
    pub help_triggers: Vec<ElementId>,
    pub theme_toggles: Vec<ElementId>,
    pub refresh_control: Option<ElementId>,
    pub pause_control: Option<ElementId>,
}

impl Handles {
    pub fn resolve(doc: &dyn Document, selectors: &Selectors) -> Self {
        let overlay = doc.query(&selectors.overlay);
        let overlay_close = overlay.and_then(|dialog| {
            let buttons = doc.query_all_within(dialog, &selectors.overlay_close);
            if buttons.len() > 1 {
                warn!(
                    "overlay holds {} elements matching {}, binding the first",
                    buttons.len(),
                    selectors.overlay_close
                );
            }
            buttons.into_iter().next()
        });

        let handles = Self {
            roster: doc.query_all(&selectors.rows),
            search: doc.query(&selectors.search),
            overlay,
            overlay_close,
            help_triggers: doc.query_all(&selectors.help_trigger),
            theme_toggles: doc.query_all(&selectors.theme_toggle),
            refresh_control: doc.query(&selectors.refresh_control),
            pause_control: doc.query(&selectors.pause_control),
        };

        if handles.search.is_none() {
            debug!("no search field matching {}", selectors.search);
        }
        if handles.overlay.is_none() {
            debug!("no overlay matching {}", selectors.overlay);
        }
        handles
    }

    pub fn row(&self, index: usize) -> Option<ElementId> {
        self.roster.get(index).copied()
    }

    /// Attach one click listener per handle
    pub fn bind(&self, registry: &mut BindingRegistry) {
        for (index, &row) in self.roster.iter().enumerate() {
            registry.attach(row, EventKind::Click, Binding::SelectRow(index));
        }
        if let Some(search) = self.search {
            registry.attach(search, EventKind::Click, Binding::SearchField);
        }
        for &toggle in &self.theme_toggles {
            registry.attach(toggle, EventKind::Click, Binding::CycleTheme);
        }
        for &trigger in &self.help_triggers {
            registry.attach(trigger, EventKind::Click, Binding::ToggleHelp);
        }
        if let Some(close) = self.overlay_close {
            registry.attach(close, EventKind::Click, Binding::CloseHelp);
        }
        if let Some(overlay) = self.overlay {
            registry.attach(overlay, EventKind::Click, Binding::HelpBackdrop);
        }
    }
}

//! Selection, shortcut and re-binding controller for the flag list.
//!
//! A [`Controller`] is driven by its host one [`InputEvent`] at a time. The
//! host applies the default effect of a key when [`Disposition::PassThrough`]
//! comes back, then drains deferred work with [`Controller::run_deferred`]
//! before dispatching the next event.

pub mod binding;
pub mod deferred;
pub mod selection;
pub mod shortcuts;

pub use binding::{Binding, BindingRegistry, EventKind, Handles};
pub use deferred::{DeferredQueue, DeferredTask};
pub use selection::Selection;
pub use shortcuts::{DispatchContext, SHORTCUTS, Shortcut, ShortcutHelp};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info, warn};

use crate::actions::{self, Signal, Transport};
use crate::config::DashboardConfig;
use crate::dom::{Document, ElementId};
use crate::theme;

/// Which part of the page the transport swapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacedRegion {
    /// Element with this id attribute had its content replaced
    Element(String),
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Pointer press; `target` is the innermost element under the pointer
    Click { target: ElementId },
    ContentReplaced(ReplacedRegion),
}

/// Whether the default effect of an input event must be suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Active,
    Disposed,
}

pub struct Controller {
    config: DashboardConfig,
    lifecycle: Lifecycle,
    handles: Handles,
    bindings: BindingRegistry,
    selection: Selection,
    modifier_mode: bool,
    deferred: DeferredQueue,
    rebuilds: u64,
}

impl Controller {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Created,
            handles: Handles::default(),
            bindings: BindingRegistry::new(),
            selection: Selection::new(),
            modifier_mode: false,
            deferred: DeferredQueue::new(),
            rebuilds: 0,
        }
    }

    /// Bind to the document. Calling it on an active controller just rebuilds.
    pub fn initialize(&mut self, doc: &mut dyn Document) {
        if self.lifecycle == Lifecycle::Active {
            warn!("controller already initialized, rebuilding instead");
        }
        self.lifecycle = Lifecycle::Active;
        self.rebuild(doc);
        info!(
            "controller initialized with {} rows (modifier {})",
            self.handles.roster.len(),
            self.config.keys.modifier.label()
        );
    }

    /// Detach every listener and re-resolve all handles.
    ///
    /// Resets the selection and re-reads the physical modifier state.
    pub fn rebuild(&mut self, doc: &mut dyn Document) {
        // Drop the marker in case the old row survived the swap
        let class = &self.config.selectors.selected_class;
        self.selection.move_to(doc, &self.handles, class, None, false);

        let detached = self.bindings.detach_all();
        self.handles = Handles::resolve(doc, &self.config.selectors);
        self.handles.bind(&mut self.bindings);
        self.selection.reset();
        self.modifier_mode = doc.held_modifiers().intersects(self.config.keys.modifier.flag());
        self.rebuilds += 1;

        debug!(
            "rebuild #{}: detached {}, attached {}, {} rows, modifier held: {}",
            self.rebuilds,
            detached,
            self.bindings.len(),
            self.handles.roster.len(),
            self.modifier_mode
        );
    }

    /// Detach everything; further events are ignored until re-initialized
    pub fn dispose(&mut self) {
        let detached = self.bindings.detach_all();
        self.handles = Handles::default();
        self.selection.reset();
        self.deferred.clear();
        self.modifier_mode = false;
        self.lifecycle = Lifecycle::Disposed;
        info!("controller disposed, {} listeners detached", detached);
    }

    pub fn handle(
        &mut self,
        doc: &mut dyn Document,
        transport: &mut dyn Transport,
        event: InputEvent,
    ) -> Disposition {
        match event {
            InputEvent::Key(key) => self.handle_key(doc, transport, key),
            InputEvent::Click { target } => self.handle_click(doc, target),
            InputEvent::ContentReplaced(region) => {
                self.content_replaced(doc, &region);
                Disposition::PassThrough
            }
        }
    }

    pub fn handle_key(
        &mut self,
        doc: &mut dyn Document,
        transport: &mut dyn Transport,
        key: KeyEvent,
    ) -> Disposition {
        if !self.is_active() {
            return Disposition::PassThrough;
        }

        if let KeyCode::Modifier(code) = key.code {
            if self.config.keys.modifier.matches(code) {
                let held = key.kind != KeyEventKind::Release;
                if held != self.modifier_mode {
                    debug!("modifier mode {}", if held { "on" } else { "off" });
                }
                self.modifier_mode = held;
            }
            return Disposition::PassThrough;
        }

        if key.kind == KeyEventKind::Release {
            return Disposition::PassThrough;
        }

        let ctx = self.dispatch_context(doc);
        match shortcuts::classify(&key, &ctx) {
            Some(shortcut) => self.apply(doc, transport, shortcut),
            None => Disposition::PassThrough,
        }
    }

    /// Pointer presses only touch local state; none of them emit signals
    pub fn handle_click(&mut self, doc: &mut dyn Document, target: ElementId) -> Disposition {
        if !self.is_active() || !doc.contains(target) {
            return Disposition::PassThrough;
        }

        // An open modal covers the page: presses outside it land on its backdrop
        let target = match self.open_overlay(doc) {
            Some(overlay) if !doc.is_within(target, overlay) => overlay,
            _ => target,
        };

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(binding) = self.bindings.find(node, EventKind::Click) {
                path.push((node, binding));
            }
            current = doc.parent(node);
        }

        let mut disposition = Disposition::PassThrough;
        for (node, binding) in path {
            if self.fire(doc, binding, target, node) {
                disposition = Disposition::Consumed;
            }
        }
        disposition
    }

    /// Rebuild when the list region or the whole body was swapped
    pub fn content_replaced(&mut self, doc: &mut dyn Document, region: &ReplacedRegion) {
        if !self.is_active() {
            return;
        }
        let relevant = match region {
            ReplacedRegion::Body => true,
            ReplacedRegion::Element(id) => self.config.is_rebuild_region(id),
        };
        if relevant {
            self.rebuild(doc);
        } else {
            debug!("ignoring replacement of {:?}", region);
        }
    }

    /// Run the work deferred by the event that was just dispatched.
    ///
    /// Returns how many tasks ran.
    pub fn run_deferred(&mut self, doc: &mut dyn Document) -> usize {
        let batch = self.deferred.take_batch();
        for task in &batch {
            match task {
                DeferredTask::FocusSearch => {
                    // The handle may predate a swap; look the field up again
                    if let Some(search) = doc.query(&self.config.selectors.search) {
                        doc.focus(search);
                        place_caret_at_end(doc, search);
                    }
                }
                DeferredTask::PlaceCaret => {
                    if let Some(search) = self.handles.search.filter(|&s| doc.contains(s)) {
                        place_caret_at_end(doc, search);
                    }
                }
            }
        }
        batch.len()
    }

    /// Single mutation point for the selection, exposed to hosts
    pub fn move_to(&mut self, doc: &mut dyn Document, target: Option<usize>, should_focus: bool) {
        let class = &self.config.selectors.selected_class;
        self.selection.move_to(doc, &self.handles, class, target, should_focus);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    pub fn selected_row(&self) -> Option<ElementId> {
        self.selection.index().and_then(|i| self.handles.row(i))
    }

    pub fn modifier_mode(&self) -> bool {
        self.modifier_mode
    }

    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    fn dispatch_context(&self, doc: &dyn Document) -> DispatchContext {
        DispatchContext {
            row_selected: self.selection.index().is_some(),
            overlay_open: self.open_overlay(doc).is_some(),
            modifier_mode: self.modifier_mode,
            search_focused: self
                .handles
                .search
                .is_some_and(|s| doc.active_element() == Some(s)),
        }
    }

    fn open_overlay(&self, doc: &dyn Document) -> Option<ElementId> {
        self.handles.overlay.filter(|&o| doc.is_dialog_open(o))
    }

    fn apply(
        &mut self,
        doc: &mut dyn Document,
        transport: &mut dyn Transport,
        shortcut: Shortcut,
    ) -> Disposition {
        let class = &self.config.selectors.selected_class;
        match shortcut {
            Shortcut::MoveDown => self.selection.move_down(doc, &self.handles, class),
            Shortcut::MoveUp => {
                self.selection
                    .move_up(doc, &self.handles, class, &mut self.deferred)
            }
            Shortcut::FocusSearch => {
                self.selection
                    .focus_input(doc, &self.handles, class, &mut self.deferred)
            }
            Shortcut::Enable => self.emit_row(transport, Signal::EnableFlag),
            Shortcut::Disable => self.emit_row(transport, Signal::DisableFlag),
            Shortcut::Remove => self.emit_row(transport, Signal::RemoveFlag),
            Shortcut::ToggleDetail => self.emit_row(transport, Signal::ToggleDetail),
            Shortcut::ClearSearch => {
                if self.selection.clear_input(doc, &self.handles) {
                    actions::emit(transport, self.handles.search, Signal::Search);
                    Disposition::Consumed
                } else {
                    Disposition::PassThrough
                }
            }
            Shortcut::CloseOverlay => self.close_overlay(doc),
            Shortcut::ToggleOverlay => self.toggle_overlay(doc),
            Shortcut::Refresh => consumed_if(actions::emit(
                transport,
                self.handles.refresh_control,
                Signal::Refresh,
            )),
            Shortcut::TogglePause => consumed_if(actions::emit(
                transport,
                self.handles.pause_control,
                Signal::TogglePause,
            )),
            Shortcut::CycleTheme => {
                theme::cycle(doc, &self.config.theme);
                Disposition::Consumed
            }
        }
    }

    /// Run one bound click listener; returns whether it did anything
    fn fire(
        &mut self,
        doc: &mut dyn Document,
        binding: Binding,
        target: ElementId,
        current: ElementId,
    ) -> bool {
        match binding {
            Binding::SelectRow(index) => {
                if self.selection.index() != Some(index) {
                    self.move_to(doc, Some(index), false);
                }
                true
            }
            Binding::SearchField => {
                self.move_to(doc, None, false);
                true
            }
            Binding::CycleTheme => {
                theme::cycle(doc, &self.config.theme);
                true
            }
            Binding::ToggleHelp => self.toggle_overlay(doc) == Disposition::Consumed,
            Binding::CloseHelp => self.close_overlay(doc) == Disposition::Consumed,
            // Presses inside the dialog content bubble up with a different target
            Binding::HelpBackdrop if target == current => {
                self.close_overlay(doc) == Disposition::Consumed
            }
            Binding::HelpBackdrop => false,
        }
    }

    fn emit_row(&self, transport: &mut dyn Transport, signal: Signal) -> Disposition {
        consumed_if(actions::emit(transport, self.selected_row(), signal))
    }

    fn toggle_overlay(&self, doc: &mut dyn Document) -> Disposition {
        let Some(overlay) = self.handles.overlay.filter(|&o| doc.contains(o)) else {
            debug!("no overlay to toggle");
            return Disposition::PassThrough;
        };
        if doc.is_dialog_open(overlay) {
            doc.close_dialog(overlay);
        } else {
            doc.show_modal(overlay);
        }
        Disposition::Consumed
    }

    fn close_overlay(&self, doc: &mut dyn Document) -> Disposition {
        match self.open_overlay(doc) {
            Some(overlay) => {
                doc.close_dialog(overlay);
                Disposition::Consumed
            }
            None => Disposition::PassThrough,
        }
    }
}

fn consumed_if(done: bool) -> Disposition {
    if done {
        Disposition::Consumed
    } else {
        Disposition::PassThrough
    }
}

fn place_caret_at_end(doc: &mut dyn Document, input: ElementId) {
    let len = doc.value(input).chars().count();
    doc.set_selection_range(input, len, len);
}

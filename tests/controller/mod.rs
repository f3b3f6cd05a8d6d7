//! Shared page fixture: a controller bound to an in-memory flag list with a
//! recording transport.

mod navigation;
mod pointer;
mod rebuild;
mod shortcuts;
mod theme;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use overleash_dashboard::actions::{Signal, Trigger};
use overleash_dashboard::config::{DashboardConfig, ModifierKey};
use overleash_dashboard::dom::{Document, ElementId, MemoryDocument, NodeSpec};
use overleash_dashboard::{Controller, Disposition, InputEvent, ReplacedRegion};

pub fn flag_rows(count: usize) -> Vec<NodeSpec> {
    (0..count)
        .map(|i| {
            NodeSpec::new("div")
                .class("flag")
                .attr("data-key", format!("flag-{}", i))
                .child(NodeSpec::new("span").class("flag-name").text(format!("flag-{}", i)))
        })
        .collect()
}

pub fn page_markup(rows: usize) -> Vec<NodeSpec> {
    vec![
        NodeSpec::new("nav").children([
            NodeSpec::new("button").id("sync").text("Sync"),
            NodeSpec::new("button").id("pause").text("Pause"),
            NodeSpec::new("button").class("theme-toggle").text("Theme"),
            NodeSpec::new("button").class("help-trigger").text("Help"),
        ]),
        NodeSpec::new("input").class("input"),
        NodeSpec::new("div").id("flags").children(flag_rows(rows)),
        NodeSpec::new("dialog")
            .id("help-dialog")
            .child(NodeSpec::new("h2").text("Keyboard shortcuts"))
            .child(NodeSpec::new("button").text("Close")),
    ]
}

pub fn config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.keys.modifier = ModifierKey::Alt;
    config
}

pub struct Page {
    pub doc: MemoryDocument,
    pub controller: Controller,
    pub sent: Vec<Trigger>,
}

impl Page {
    pub fn new(rows: usize) -> Self {
        Self::from_markup(page_markup(rows))
    }

    pub fn from_markup(markup: Vec<NodeSpec>) -> Self {
        let mut doc = MemoryDocument::from_specs(markup);
        let mut controller = Controller::new(config());
        controller.initialize(&mut doc);
        Self {
            doc,
            controller,
            sent: Vec::new(),
        }
    }

    /// Dispatch without draining deferred work
    pub fn dispatch(&mut self, event: InputEvent) -> Disposition {
        self.controller.handle(&mut self.doc, &mut self.sent, event)
    }

    /// Dispatch a key press, then run deferred work like a host would
    pub fn press(&mut self, code: KeyCode) -> Disposition {
        self.key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn key(&mut self, key: KeyEvent) -> Disposition {
        let disposition = self.dispatch(InputEvent::Key(key));
        self.controller.run_deferred(&mut self.doc);
        disposition
    }

    pub fn hold_modifier(&mut self) {
        self.key(modifier(KeyEventKind::Press));
    }

    pub fn release_modifier(&mut self) {
        self.key(modifier(KeyEventKind::Release));
    }

    /// Press `c` while the modifier is held, then let go of it
    pub fn chord(&mut self, c: char) -> Disposition {
        self.hold_modifier();
        let disposition = self.key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT));
        self.release_modifier();
        disposition
    }

    pub fn click(&mut self, target: ElementId) -> Disposition {
        let disposition = self.dispatch(InputEvent::Click { target });
        self.controller.run_deferred(&mut self.doc);
        disposition
    }

    /// Swap the list region for `rows` fresh rows and notify the controller
    pub fn replace_rows(&mut self, rows: usize) {
        self.doc.replace_region("flags", flag_rows(rows));
        self.dispatch(InputEvent::ContentReplaced(ReplacedRegion::Element(
            "flags".to_string(),
        )));
    }

    pub fn replace_body(&mut self, rows: usize) {
        self.doc.replace_body(page_markup(rows));
        self.dispatch(InputEvent::ContentReplaced(ReplacedRegion::Body));
    }

    pub fn row(&self, index: usize) -> ElementId {
        self.controller.handles().roster[index]
    }

    pub fn search(&self) -> ElementId {
        self.controller.handles().search.unwrap()
    }

    pub fn overlay(&self) -> ElementId {
        self.controller.handles().overlay.unwrap()
    }

    pub fn overlay_open(&self) -> bool {
        self.doc.is_dialog_open(self.overlay())
    }

    /// Roster indices carrying the selection marker
    pub fn marked(&self) -> Vec<usize> {
        self.controller
            .handles()
            .roster
            .iter()
            .enumerate()
            .filter(|(_, row)| self.doc.has_class(**row, "selected"))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.sent.iter().map(|t| t.signal).collect()
    }
}

fn modifier(kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(
        KeyCode::Modifier(ModifierKeyCode::LeftAlt),
        KeyModifiers::ALT,
        kind,
    )
}

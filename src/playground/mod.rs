//! Terminal host for the controller.
//!
//! Renders an in-memory flag page with ratatui, feeds crossterm key and mouse
//! events to a [`Controller`] and plays the browser's part: default key
//! actions, deferred work after each event and a local [`FlagServer`] that
//! answers action signals by swapping markup.

pub mod palette;
pub mod render;
pub mod server;

pub use render::HitRegistry;
pub use server::{FlagServer, FlagState};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyEventState, KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{debug, info, warn};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;

use crate::actions::{Signal, Trigger};
use crate::config::DashboardConfig;
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::{Controller, Disposition, InputEvent};

/// One page: document, controller and the server behind it
pub struct Session {
    doc: MemoryDocument,
    server: FlagServer,
    controller: Controller,
    outbox: Vec<Trigger>,
    /// Terminal reports modifier press/release as separate events
    reports_modifiers: bool,
    status: String,
    should_quit: bool,
}

impl Session {
    pub fn new(config: DashboardConfig, server: FlagServer, reports_modifiers: bool) -> Self {
        let mut doc = MemoryDocument::from_specs(server.render_page());
        let mut controller = Controller::new(config);
        controller.initialize(&mut doc);

        Self {
            doc,
            server,
            controller,
            outbox: Vec::new(),
            reports_modifiers,
            status: "ready".to_string(),
            should_quit: false,
        }
    }

    pub fn doc(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn server(&self) -> &FlagServer {
        &self.server
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route one terminal event through the page
    pub fn handle_event(&mut self, event: Event, hits: &HitRegistry) {
        match event {
            Event::Key(key) => self.handle_terminal_key(key),
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    match hits.find_click(mouse.column, mouse.row) {
                        Some(target) => {
                            self.click(target);
                        }
                        None => debug!("click at {},{} hit nothing", mouse.column, mouse.row),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_terminal_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Release
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        self.doc.set_held_modifiers(key.modifiers);
        if self.reports_modifiers || matches!(key.code, KeyCode::Modifier(_)) {
            self.key(key);
            return;
        }

        // Without press/release reporting the modifier only shows up as a flag
        // on the key it combines with
        let modifier = self.controller.config().keys.modifier;
        let held = key.modifiers.intersects(modifier.flag());
        let synthesize = held && !self.controller.modifier_mode();
        if synthesize {
            self.key(modifier_event(modifier.left_code(), KeyEventKind::Press));
        }
        self.key(key);
        if synthesize {
            self.key(modifier_event(modifier.left_code(), KeyEventKind::Release));
        }
    }

    /// Dispatch a key and apply its default action when it passes through
    pub fn key(&mut self, key: KeyEvent) -> Disposition {
        let disposition = self
            .controller
            .handle(&mut self.doc, &mut self.outbox, InputEvent::Key(key));
        if disposition == Disposition::PassThrough && key.kind != KeyEventKind::Release {
            self.key_default(key);
        }
        self.settle();
        disposition
    }

    /// Dispatch a pointer press on `target`, then its default action
    pub fn click(&mut self, target: ElementId) -> Disposition {
        let disposition = self
            .controller
            .handle(&mut self.doc, &mut self.outbox, InputEvent::Click { target });
        self.click_default(target);
        self.settle();
        disposition
    }

    fn key_default(&mut self, key: KeyEvent) {
        let Some(search) = self
            .controller
            .handles()
            .search
            .filter(|&s| self.doc.active_element() == Some(s))
        else {
            return;
        };

        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.doc.insert_char(search, c);
            }
            KeyCode::Backspace => self.doc.delete_backward(search),
            _ => return,
        }
        // The field searches as you type
        self.outbox.push(Trigger {
            target: search,
            signal: Signal::Search,
        });
    }

    fn click_default(&mut self, target: ElementId) {
        let handles = self.controller.handles();
        if handles.search == Some(target) {
            self.doc.focus(target);
            return;
        }

        let native = if handles.refresh_control == Some(target) {
            Some(Signal::Refresh)
        } else if handles.pause_control == Some(target) {
            Some(Signal::TogglePause)
        } else {
            None
        };
        let modal_open = handles.overlay.is_some_and(|o| self.doc.is_dialog_open(o));
        if !modal_open {
            if let Some(active) = self.doc.active_element() {
                self.doc.blur(active);
            }
        }
        if let Some(signal) = native {
            self.outbox.push(Trigger { target, signal });
        }
    }

    /// Run deferred work, then let the server answer every queued signal
    fn settle(&mut self) {
        self.controller.run_deferred(&mut self.doc);

        while !self.outbox.is_empty() {
            for trigger in std::mem::take(&mut self.outbox) {
                if !self.doc.contains(trigger.target) {
                    warn!("dropping {} for a removed element", trigger.signal);
                    continue;
                }
                let Some(region) = self.server.respond(&mut self.doc, trigger) else {
                    continue;
                };
                if let Some(request) = self.server.served().last() {
                    self.status = request.clone();
                }
                self.controller.handle(
                    &mut self.doc,
                    &mut self.outbox,
                    InputEvent::ContentReplaced(region),
                );
            }
        }
    }
}

fn modifier_event(code: crossterm::event::ModifierKeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Modifier(code),
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    }
}

/// Run the playground until the user quits
pub fn run(config: DashboardConfig, flags: usize) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    info!("keyboard enhancement {}", if enhanced { "enabled" } else { "unavailable" });

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let server = FlagServer::demo(flags, config.keys.modifier.label());
    let mut session = Session::new(config, server, enhanced);

    let result = run_loop(&mut terminal, &mut session);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("served {} requests", session.server().served().len());
    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<()> {
    let mut hits = HitRegistry::new();
    loop {
        terminal.draw(|frame| {
            render::draw(
                frame,
                session.doc(),
                session.controller(),
                &mut hits,
                session.status(),
            );
        })?;

        if event::poll(Duration::from_millis(250))? {
            session.handle_event(event::read()?, &hits);
            // Drain whatever else is pending before redrawing
            while event::poll(Duration::from_millis(0))? {
                session.handle_event(event::read()?, &hits);
            }
        }

        if session.should_quit() {
            return Ok(());
        }
    }
}

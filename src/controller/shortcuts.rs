use crossterm::event::{KeyCode, KeyEvent};
use log::trace;

/// A resolved global shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    MoveDown,
    MoveUp,
    Enable,
    Disable,
    Remove,
    ToggleDetail,
    FocusSearch,
    CloseOverlay,
    ClearSearch,
    ToggleOverlay,
    Refresh,
    TogglePause,
    CycleTheme,
}

/// Transient state the classification depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    pub row_selected: bool,
    pub overlay_open: bool,
    pub modifier_mode: bool,
    pub search_focused: bool,
}

/// Classify a key press; `None` means the key passes through untouched.
///
/// While the overlay is open it is modal: only the keys that close it are live.
pub fn classify(key: &KeyEvent, ctx: &DispatchContext) -> Option<Shortcut> {
    let shortcut = if ctx.overlay_open {
        classify_modal(key.code, ctx)
    } else {
        classify_page(key.code, ctx)
    };
    trace!("classify {:?} under {:?} -> {:?}", key.code, ctx, shortcut);
    shortcut
}

fn classify_modal(code: KeyCode, ctx: &DispatchContext) -> Option<Shortcut> {
    match code {
        KeyCode::Esc => Some(Shortcut::CloseOverlay),
        KeyCode::Char('?') => Some(Shortcut::ToggleOverlay),
        KeyCode::Char('h') if ctx.modifier_mode => Some(Shortcut::ToggleOverlay),
        _ => None,
    }
}

fn classify_page(code: KeyCode, ctx: &DispatchContext) -> Option<Shortcut> {
    if ctx.modifier_mode {
        let gated = match code {
            KeyCode::Char('r') => Some(Shortcut::Refresh),
            KeyCode::Char('p') => Some(Shortcut::TogglePause),
            KeyCode::Char('h') => Some(Shortcut::ToggleOverlay),
            KeyCode::Char('t') => Some(Shortcut::CycleTheme),
            _ => None,
        };
        if gated.is_some() {
            return gated;
        }
    }

    match code {
        KeyCode::Down => Some(Shortcut::MoveDown),
        KeyCode::Up => Some(Shortcut::MoveUp),
        KeyCode::Char(c) if ctx.row_selected => match c {
            'e' => Some(Shortcut::Enable),
            'd' => Some(Shortcut::Disable),
            'q' => Some(Shortcut::Remove),
            'i' => Some(Shortcut::ToggleDetail),
            '/' => Some(Shortcut::FocusSearch),
            '?' if !ctx.search_focused => Some(Shortcut::ToggleOverlay),
            _ => None,
        },
        KeyCode::Esc if !ctx.row_selected => Some(Shortcut::ClearSearch),
        KeyCode::Char('?') if !ctx.search_focused => Some(Shortcut::ToggleOverlay),
        _ => None,
    }
}

/// One line of the keyboard reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutHelp {
    pub keys: &'static str,
    pub description: &'static str,
    /// Only live while the modifier key is held
    pub needs_modifier: bool,
}

const fn help(keys: &'static str, description: &'static str, needs_modifier: bool) -> ShortcutHelp {
    ShortcutHelp {
        keys,
        description,
        needs_modifier,
    }
}

/// The keyboard command surface, in display order
pub const SHORTCUTS: &[ShortcutHelp] = &[
    help("↓", "Select next flag", false),
    help("↑", "Select previous flag / back to search", false),
    help("e", "Enable selected flag", false),
    help("d", "Disable selected flag", false),
    help("q", "Remove override of selected flag", false),
    help("i", "Toggle details of selected flag", false),
    help("/", "Back to search", false),
    help("Esc", "Close help / clear search", false),
    help("?", "Toggle this help", false),
    help("r", "Refresh flags from upstream", true),
    help("p", "Pause or resume syncing", true),
    help("h", "Toggle this help", true),
    help("t", "Cycle theme (auto, dark, light)", true),
];

/// Render a key combination for display, e.g. `Alt+r`
pub fn format_binding(entry: &ShortcutHelp, modifier_label: &str) -> String {
    if entry.needs_modifier {
        format!("{}+{}", modifier_label, entry.keys)
    } else {
        entry.keys.to_string()
    }
}

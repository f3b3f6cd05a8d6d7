use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Controller;
use crate::dom::{Document, ElementId, MemoryDocument, Selector};
use crate::theme;

use super::palette::Palette;

/// Screen areas mapped to the element drawn there
#[derive(Debug, Default)]
pub struct HitRegistry {
    targets: Vec<(Rect, ElementId)>,
}

impl HitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rect: Rect, id: ElementId) {
        self.targets.push((rect, id));
    }

    /// Innermost element under the pointer
    pub fn find_click(&self, x: u16, y: u16) -> Option<ElementId> {
        // Search in reverse order so topmost layers are checked first
        self.targets
            .iter()
            .rev()
            .find(|(rect, _)| point_in_rect(x, y, *rect))
            .map(|(_, id)| *id)
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Draw the page and record where every interactive element landed
pub fn draw(
    frame: &mut Frame,
    doc: &MemoryDocument,
    controller: &Controller,
    hits: &mut HitRegistry,
    status: &str,
) {
    hits.clear();
    let preference = theme::current(doc, &controller.config().theme);
    let palette = Palette::for_preference(preference);

    let full_area = frame.area();
    frame.render_widget(Block::default().style(palette.page_style()), full_area);

    let [toolbar_area, search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(full_area);

    draw_toolbar(frame, doc, controller, &palette, hits, toolbar_area, preference);
    draw_search(frame, doc, controller, &palette, hits, search_area);
    draw_rows(frame, doc, controller, &palette, hits, list_area);
    draw_status(frame, controller, &palette, status_area, status);

    let handles = controller.handles();
    if let Some(overlay) = handles.overlay.filter(|&o| doc.is_dialog_open(o)) {
        draw_help(frame, doc, handles.overlay_close, overlay, &palette, hits, full_area);
    }
}

fn draw_toolbar(
    frame: &mut Frame,
    doc: &MemoryDocument,
    controller: &Controller,
    palette: &Palette,
    hits: &mut HitRegistry,
    area: Rect,
    preference: theme::ThemePreference,
) {
    let handles = controller.handles();
    let buttons = handles
        .refresh_control
        .into_iter()
        .chain(handles.pause_control)
        .chain(handles.theme_toggles.iter().copied())
        .chain(handles.help_triggers.iter().copied());

    let mut spans = vec![Span::styled(
        " overleash ",
        Style::default().fg(palette.blue).add_modifier(Modifier::BOLD),
    )];
    let mut x = area.x + 11;
    for button in buttons {
        let label = format!(" {} ", doc.text_content(button));
        let width = label.chars().count() as u16;
        if x + width > area.x + area.width {
            break;
        }
        hits.register(Rect::new(x, area.y, width, 1), button);
        spans.push(Span::styled(label, palette.button_style()));
        spans.push(Span::raw(" "));
        x += width + 1;
    }
    spans.push(Span::styled(format!(" theme: {}", preference), palette.muted_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search(
    frame: &mut Frame,
    doc: &MemoryDocument,
    controller: &Controller,
    palette: &Palette,
    hits: &mut HitRegistry,
    area: Rect,
) {
    let Some(search) = controller.handles().search else {
        return;
    };
    let focused = doc.active_element() == Some(search);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style(focused))
        .title(" Search ");
    let inner = block.inner(area);

    let value = doc.value(search);
    let content = if value.is_empty() && !focused {
        Span::styled("type to filter, ↓ to pick a flag", palette.muted_style())
    } else {
        Span::raw(value.clone())
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
    hits.register(area, search);

    if focused && inner.width > 0 {
        let len = value.chars().count();
        let caret = doc.selection_range(search).map_or(len, |(_, end)| end) as u16;
        frame.set_cursor_position((inner.x + caret.min(inner.width - 1), inner.y));
    }
}

/// First row index to draw so the selected row sits mid-list
fn scroll_offset(selected: Option<usize>, total: usize, height: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };
    selected
        .saturating_sub(height / 2)
        .min(total.saturating_sub(height))
}

fn draw_rows(
    frame: &mut Frame,
    doc: &MemoryDocument,
    controller: &Controller,
    palette: &Palette,
    hits: &mut HitRegistry,
    area: Rect,
) {
    let roster = &controller.handles().roster;
    let selected_class = &controller.config().selectors.selected_class;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style(controller.selected_index().is_some()))
        .title(format!(" Flags ({}) ", roster.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if roster.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No flags match", palette.muted_style())),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    let offset = scroll_offset(controller.selected_index(), roster.len(), height);
    for (slot, (index, &row)) in roster.iter().enumerate().skip(offset).take(height).enumerate() {
        let rect = Rect::new(inner.x, inner.y + slot as u16, inner.width, 1);
        let style = if doc.has_class(row, selected_class) {
            palette.marked_row_style()
        } else if controller.selected_index() == Some(index) {
            palette.pointed_row_style()
        } else {
            Style::default()
        };

        let name = part_text(doc, row, "flag-name");
        let state = part_text(doc, row, "flag-state");
        let mut spans = vec![
            Span::raw(format!(" {:<40}", name)),
            Span::styled(format!("{:<16}", state), palette.flag_state_style(&state)),
        ];
        let details = part_text(doc, row, "flag-details");
        if !details.is_empty() {
            spans.push(Span::styled(details, palette.muted_style()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), rect);
        hits.register(rect, row);
    }
}

fn part_text(doc: &MemoryDocument, row: ElementId, class: &str) -> String {
    doc.query_all_within(row, &Selector::class(class))
        .first()
        .map(|&part| doc.text_content(part))
        .unwrap_or_default()
}

fn draw_status(frame: &mut Frame, controller: &Controller, palette: &Palette, area: Rect, status: &str) {
    let modifier = controller.config().keys.modifier.label();
    let mut spans = Vec::new();
    if controller.modifier_mode() {
        spans.push(Span::styled(format!(" {} ", modifier), palette.button_style()));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(status.to_string(), palette.muted_style()));
    spans.push(Span::styled(
        format!("  ? help · {}+h help · Ctrl+q quit", modifier),
        Style::default().fg(palette.overlay0),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help(
    frame: &mut Frame,
    doc: &MemoryDocument,
    close: Option<ElementId>,
    overlay: ElementId,
    palette: &Palette,
    hits: &mut HitRegistry,
    area: Rect,
) {
    let title = doc
        .query_all_within(overlay, &Selector::tag("h2"))
        .first()
        .map(|&h| doc.text_content(h))
        .unwrap_or_else(|| "Help".to_string());

    let mut lines: Vec<Line> = doc
        .query_all_within(overlay, &Selector::class("shortcut"))
        .into_iter()
        .map(|entry| {
            let keys = doc.attribute(entry, "data-keys").unwrap_or_default();
            Line::from(vec![
                Span::styled(format!("  {:<10}", keys), palette.key_style()),
                Span::raw(doc.text_content(entry)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));

    // Calculate centered position for help modal
    let modal_width = area.width.min(60);
    let modal_height = area.height.min(lines.len() as u16 + 3);
    let modal_area = Rect {
        x: area.x + (area.width.saturating_sub(modal_width)) / 2,
        y: area.y + (area.height.saturating_sub(modal_height)) / 2,
        width: modal_width,
        height: modal_height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.mauve))
        .title(format!(" {} ", title))
        .style(Style::default().fg(palette.text).bg(palette.mantle));
    let inner = block.inner(modal_area);

    frame.render_widget(Clear, modal_area);
    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
    // Only the border belongs to the dialog element; presses there count as
    // the backdrop
    hits.register(modal_area, overlay);
    if let Some(&content) = doc
        .query_all_within(overlay, &Selector::class("help-content"))
        .first()
    {
        hits.register(inner, content);
    }

    if let Some(close) = close {
        let label = format!(" {} ", doc.text_content(close));
        let width = (label.chars().count() as u16).min(inner.width);
        if inner.height > 0 {
            let rect = Rect::new(
                inner.x + inner.width.saturating_sub(width),
                inner.y + inner.height - 1,
                width,
                1,
            );
            frame.render_widget(Paragraph::new(Span::styled(label, palette.button_style())), rect);
            hits.register(rect, close);
        }
    }
}

use super::*;
use overleash_dashboard::dom::Selector;

#[test]
fn test_click_selects_row_without_marker() {
    let mut page = Page::new(3);
    let row = page.row(2);

    assert_eq!(page.click(row), Disposition::Consumed);

    assert_eq!(page.controller.selected_index(), Some(2));
    assert!(page.marked().is_empty());
    assert!(page.sent.is_empty());
}

#[test]
fn test_click_bubbles_from_row_content() {
    let mut page = Page::new(3);
    let row = page.row(1);
    let name = page.doc.query_all_within(row, &Selector::class("flag-name"))[0];

    page.click(name);

    assert_eq!(page.controller.selected_index(), Some(1));
}

#[test]
fn test_click_on_selected_row_keeps_marker() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    let row = page.row(0);

    page.click(row);

    assert_eq!(page.controller.selected_index(), Some(0));
    assert_eq!(page.marked(), vec![0]);
}

#[test]
fn test_click_moves_from_marked_row() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    let row = page.row(2);

    page.click(row);

    assert_eq!(page.controller.selected_index(), Some(2));
    assert!(page.marked().is_empty());

    // Keyboard continues from the clicked row
    page.press(KeyCode::Up);
    assert_eq!(page.marked(), vec![1]);
}

#[test]
fn test_click_search_clears_selection() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    let search = page.search();

    page.click(search);

    assert_eq!(page.controller.selected_index(), None);
    assert!(page.marked().is_empty());
}

#[test]
fn test_theme_toggle_click_cycles() {
    let mut page = Page::new(1);
    let toggle = page.controller.handles().theme_toggles[0];

    page.click(toggle);
    page.click(toggle);

    assert_eq!(page.doc.root_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(page.doc.cookie("prefers-color-scheme").as_deref(), Some("light"));
}

#[test]
fn test_help_trigger_and_close_button() {
    let mut page = Page::new(2);
    let trigger = page.controller.handles().help_triggers[0];
    let close = page.controller.handles().overlay_close.unwrap();

    page.click(trigger);
    assert!(page.overlay_open());

    assert_eq!(page.click(close), Disposition::Consumed);
    assert!(!page.overlay_open());
}

#[test]
fn test_backdrop_closes_but_dialog_content_does_not() {
    let mut page = Page::new(2);
    let overlay = page.overlay();
    let heading = page.doc.query_all_within(overlay, &Selector::tag("h2"))[0];
    page.press(KeyCode::Char('?'));

    assert_eq!(page.click(heading), Disposition::PassThrough);
    assert!(page.overlay_open());

    assert_eq!(page.click(overlay), Disposition::Consumed);
    assert!(!page.overlay_open());
}

#[test]
fn test_press_outside_open_overlay_lands_on_backdrop() {
    let mut page = Page::new(3);
    page.press(KeyCode::Char('?'));
    let row = page.row(1);

    page.click(row);

    assert!(!page.overlay_open());
    assert_eq!(page.controller.selected_index(), None);
}

#[test]
fn test_pointer_never_emits_signals() {
    let mut page = Page::new(2);
    let sync = page.controller.handles().refresh_control.unwrap();
    let pause = page.controller.handles().pause_control.unwrap();

    assert_eq!(page.click(sync), Disposition::PassThrough);
    assert_eq!(page.click(pause), Disposition::PassThrough);
    assert!(page.sent.is_empty());
}

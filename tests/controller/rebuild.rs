use super::*;
use overleash_dashboard::dom::Selector;

#[test]
fn test_list_swap_resets_selection_and_roster() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    page.press(KeyCode::Down);
    let before = page.controller.rebuild_count();

    page.replace_rows(5);

    assert_eq!(page.controller.rebuild_count(), before + 1);
    assert_eq!(page.controller.selected_index(), None);
    assert_eq!(page.controller.handles().roster.len(), 5);
    assert!(page.marked().is_empty());

    // Navigation starts over on the new rows
    page.press(KeyCode::Down);
    assert_eq!(page.marked(), vec![0]);
}

#[test]
fn test_unrelated_region_keeps_state() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    let before = page.controller.rebuild_count();

    page.dispatch(InputEvent::ContentReplaced(ReplacedRegion::Element(
        "last-sync".to_string(),
    )));

    assert_eq!(page.controller.rebuild_count(), before);
    assert_eq!(page.controller.selected_index(), Some(0));
}

#[test]
fn test_body_swap_rebinds_everything() {
    let mut page = Page::new(2);
    let old_search = page.search();
    let old_overlay = page.overlay();

    page.replace_body(4);

    assert_ne!(page.search(), old_search);
    assert_ne!(page.overlay(), old_overlay);
    assert_eq!(page.controller.handles().roster.len(), 4);

    page.press(KeyCode::Char('?'));
    assert!(page.overlay_open());
}

#[test]
fn test_repeated_rebuilds_bind_once() {
    let mut page = Page::new(3);
    let bound = page.controller.bindings().len();

    page.controller.rebuild(&mut page.doc);
    page.controller.rebuild(&mut page.doc);
    assert_eq!(page.controller.bindings().len(), bound);

    // A doubled listener would open and immediately close the overlay
    let trigger = page.controller.handles().help_triggers[0];
    page.click(trigger);
    assert!(page.overlay_open());
}

#[test]
fn test_rebuild_clears_marker_on_surviving_rows() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    let row = page.row(0);

    page.controller.rebuild(&mut page.doc);

    assert!(page.doc.contains(row));
    assert!(!page.doc.has_class(row, "selected"));
    assert_eq!(page.controller.selected_index(), None);
}

#[test]
fn test_rebuild_reads_held_modifier() {
    let mut page = Page::new(2);
    page.doc.set_held_modifiers(KeyModifiers::ALT);

    page.replace_body(2);
    assert!(page.controller.modifier_mode());

    page.doc.set_held_modifiers(KeyModifiers::NONE);
    page.replace_body(2);
    assert!(!page.controller.modifier_mode());
}

#[test]
fn test_deferred_focus_survives_body_swap() {
    let mut page = Page::new(2);
    page.press(KeyCode::Down);
    page.dispatch(InputEvent::Key(KeyEvent::new(
        KeyCode::Char('/'),
        KeyModifiers::NONE,
    )));

    page.replace_body(2);
    page.controller.run_deferred(&mut page.doc);

    let search = page.doc.query(&Selector::class("input")).unwrap();
    assert_eq!(page.doc.active_element(), Some(search));
}

#[test]
fn test_missing_elements_are_no_ops() {
    let mut page = Page::from_markup(flag_rows(2));

    assert_eq!(page.press(KeyCode::Char('?')), Disposition::PassThrough);
    assert_eq!(page.press(KeyCode::Esc), Disposition::PassThrough);
    assert_eq!(page.chord('r'), Disposition::PassThrough);
    assert!(page.sent.is_empty());

    page.press(KeyCode::Down);
    assert_eq!(page.press(KeyCode::Char('/')), Disposition::Consumed);
    assert_eq!(page.press(KeyCode::Up), Disposition::PassThrough);
    assert_eq!(page.doc.active_element(), None);
}

#[test]
fn test_disposed_controller_ignores_input() {
    let mut page = Page::new(3);
    page.controller.dispose();

    assert!(!page.controller.is_active());
    assert!(page.controller.bindings().is_empty());
    assert_eq!(page.press(KeyCode::Down), Disposition::PassThrough);
    assert_eq!(page.controller.selected_index(), None);

    page.controller.initialize(&mut page.doc);
    assert_eq!(page.press(KeyCode::Down), Disposition::Consumed);
}

#[test]
fn test_instances_are_independent() {
    let mut first = Page::new(3);
    let mut second = Page::new(3);

    first.press(KeyCode::Down);
    first.press(KeyCode::Down);
    second.press(KeyCode::Down);

    assert_eq!(first.controller.selected_index(), Some(1));
    assert_eq!(second.controller.selected_index(), Some(0));
}

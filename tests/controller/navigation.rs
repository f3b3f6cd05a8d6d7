use super::*;
use overleash_dashboard::dom::ScrollOptions;

#[test]
fn test_down_walks_the_list_and_stops_at_the_end() {
    let mut page = Page::new(3);

    let mut seen = Vec::new();
    let mut dispositions = Vec::new();
    for _ in 0..4 {
        dispositions.push(page.press(KeyCode::Down));
        seen.push(page.controller.selected_index());
    }

    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(2)]);
    assert_eq!(dispositions[..3], [Disposition::Consumed; 3]);
    assert_eq!(dispositions[3], Disposition::PassThrough);
    assert_eq!(page.marked(), vec![2]);
}

#[test]
fn test_marker_and_scroll_follow_selection() {
    let mut page = Page::new(4);
    page.press(KeyCode::Down);
    page.press(KeyCode::Down);

    assert_eq!(page.marked(), vec![1]);
    assert_eq!(
        page.doc.last_scroll(),
        Some((page.row(1), ScrollOptions::CENTERED))
    );
}

#[test]
fn test_move_to_leaves_exactly_one_marked_row() {
    let mut page = Page::new(5);
    for target in [3, 0, 4, 4, 1] {
        page.controller.move_to(&mut page.doc, Some(target), true);
        assert_eq!(page.marked(), vec![target]);
    }

    page.controller.move_to(&mut page.doc, None, true);
    assert!(page.marked().is_empty());
    assert_eq!(page.controller.selected_index(), None);
}

#[test]
fn test_down_leaves_the_search_field() {
    let mut page = Page::new(2);
    let search = page.search();
    page.doc.focus(search);

    page.press(KeyCode::Down);

    assert_eq!(page.doc.active_element(), None);
    assert_eq!(page.controller.selected_index(), Some(0));
}

#[test]
fn test_up_from_first_row_returns_to_search() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.set_value(search, "beta");
    page.press(KeyCode::Down);

    assert_eq!(page.press(KeyCode::Up), Disposition::Consumed);

    assert_eq!(page.controller.selected_index(), None);
    assert!(page.marked().is_empty());
    assert_eq!(page.doc.active_element(), Some(search));
    assert_eq!(page.doc.selection_range(search), Some((4, 4)));
}

#[test]
fn test_up_moves_back_one_row() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    page.press(KeyCode::Down);
    page.press(KeyCode::Down);

    page.press(KeyCode::Up);

    assert_eq!(page.controller.selected_index(), Some(1));
    assert_eq!(page.marked(), vec![1]);
    assert_eq!(page.doc.active_element(), None);
}

#[test]
fn test_up_without_selection_passes_through() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.focus(search);

    assert_eq!(page.press(KeyCode::Up), Disposition::PassThrough);
    assert_eq!(page.controller.selected_index(), None);
    assert_eq!(page.controller.pending_deferred(), 0);
}

#[test]
fn test_navigation_on_empty_list() {
    let mut page = Page::new(0);

    assert_eq!(page.press(KeyCode::Down), Disposition::PassThrough);
    assert_eq!(page.press(KeyCode::Up), Disposition::PassThrough);
    assert_eq!(page.controller.selected_index(), None);
}

#[test]
fn test_key_release_is_ignored() {
    let mut page = Page::new(3);
    let release = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Release);

    assert_eq!(page.key(release), Disposition::PassThrough);
    assert_eq!(page.controller.selected_index(), None);
}

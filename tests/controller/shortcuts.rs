use super::*;

#[test]
fn test_row_actions_need_a_selection() {
    let mut page = Page::new(3);

    for c in ['e', 'd', 'q', 'i'] {
        assert_eq!(page.press(KeyCode::Char(c)), Disposition::PassThrough);
    }
    assert!(page.sent.is_empty());
}

#[test]
fn test_row_actions_target_the_selected_row() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    page.press(KeyCode::Down);

    for c in ['e', 'd', 'q', 'i'] {
        assert_eq!(page.press(KeyCode::Char(c)), Disposition::Consumed);
    }

    assert_eq!(
        page.signals(),
        vec![
            Signal::EnableFlag,
            Signal::DisableFlag,
            Signal::RemoveFlag,
            Signal::ToggleDetail
        ]
    );
    let row = page.row(1);
    assert!(page.sent.iter().all(|t| t.target == row));
    assert_eq!(page.controller.selected_index(), Some(1));
}

#[test]
fn test_slash_focuses_search_after_the_event() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.set_value(search, "abc");
    page.press(KeyCode::Down);

    let disposition = page.dispatch(InputEvent::Key(KeyEvent::new(
        KeyCode::Char('/'),
        KeyModifiers::NONE,
    )));

    // Nothing moves until the host drains the queue
    assert_eq!(disposition, Disposition::Consumed);
    assert_eq!(page.doc.active_element(), None);
    assert_eq!(page.controller.pending_deferred(), 1);
    assert_eq!(page.controller.selected_index(), None);
    assert!(page.marked().is_empty());

    assert_eq!(page.controller.run_deferred(&mut page.doc), 1);
    assert_eq!(page.doc.active_element(), Some(search));
    assert_eq!(page.doc.selection_range(search), Some((3, 3)));
    assert_eq!(page.doc.value(search), "abc");
}

#[test]
fn test_escape_clears_search_and_requests_results() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.set_value(search, "checkout");
    page.doc.focus(search);

    assert_eq!(page.press(KeyCode::Esc), Disposition::Consumed);

    assert_eq!(page.doc.value(search), "");
    assert_eq!(
        page.sent,
        vec![Trigger {
            target: search,
            signal: Signal::Search
        }]
    );
}

#[test]
fn test_escape_with_selection_passes_through() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.set_value(search, "checkout");
    page.press(KeyCode::Down);

    assert_eq!(page.press(KeyCode::Esc), Disposition::PassThrough);
    assert_eq!(page.doc.value(search), "checkout");
    assert!(page.sent.is_empty());
}

#[test]
fn test_modifier_keys_do_nothing_alone() {
    let mut page = Page::new(3);

    for c in ['r', 'p', 'h', 't'] {
        assert_eq!(page.press(KeyCode::Char(c)), Disposition::PassThrough);
    }

    assert!(page.sent.is_empty());
    assert!(!page.overlay_open());
    assert_eq!(page.doc.root_attribute("data-theme"), None);
}

#[test]
fn test_modifier_chords() {
    let mut page = Page::new(3);
    let sync = page.controller.handles().refresh_control.unwrap();
    let pause = page.controller.handles().pause_control.unwrap();

    assert_eq!(page.chord('r'), Disposition::Consumed);
    assert_eq!(page.chord('p'), Disposition::Consumed);
    assert_eq!(
        page.sent,
        vec![
            Trigger {
                target: sync,
                signal: Signal::Refresh
            },
            Trigger {
                target: pause,
                signal: Signal::TogglePause
            },
        ]
    );

    page.chord('t');
    assert_eq!(page.doc.root_attribute("data-theme").as_deref(), Some("dark"));

    page.chord('h');
    assert!(page.overlay_open());
    page.chord('h');
    assert!(!page.overlay_open());
}

#[test]
fn test_modifier_mode_tracks_press_and_release() {
    let mut page = Page::new(1);
    assert!(!page.controller.modifier_mode());

    page.hold_modifier();
    assert!(page.controller.modifier_mode());
    page.release_modifier();
    assert!(!page.controller.modifier_mode());

    // Other modifiers do not count
    page.key(KeyEvent::new_with_kind(
        KeyCode::Modifier(ModifierKeyCode::LeftControl),
        KeyModifiers::CONTROL,
        KeyEventKind::Press,
    ));
    assert!(!page.controller.modifier_mode());
}

#[test]
fn test_question_mark_opens_and_escape_closes() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);

    assert_eq!(page.press(KeyCode::Char('?')), Disposition::Consumed);
    assert!(page.overlay_open());

    assert_eq!(page.press(KeyCode::Esc), Disposition::Consumed);
    assert!(!page.overlay_open());
    assert_eq!(page.controller.selected_index(), Some(0));
    assert_eq!(page.marked(), vec![0]);
}

#[test]
fn test_question_mark_while_typing_passes_through() {
    let mut page = Page::new(3);
    let search = page.search();
    page.doc.focus(search);

    assert_eq!(page.press(KeyCode::Char('?')), Disposition::PassThrough);
    assert!(!page.overlay_open());
}

#[test]
fn test_open_overlay_is_modal() {
    let mut page = Page::new(3);
    page.press(KeyCode::Down);
    page.press(KeyCode::Char('?'));

    assert_eq!(page.press(KeyCode::Down), Disposition::PassThrough);
    assert_eq!(page.press(KeyCode::Char('e')), Disposition::PassThrough);
    assert_eq!(page.chord('r'), Disposition::PassThrough);

    assert_eq!(page.controller.selected_index(), Some(0));
    assert!(page.sent.is_empty());
    assert!(page.overlay_open());

    assert_eq!(page.press(KeyCode::Char('?')), Disposition::Consumed);
    assert!(!page.overlay_open());
}

use super::*;
use overleash_dashboard::dom::Cookie;
use overleash_dashboard::theme::{self, ThemePreference};

#[test]
fn test_chord_cycles_auto_dark_light() {
    let mut page = Page::new(1);
    let config = page.controller.config().theme.clone();

    let mut seen = Vec::new();
    for _ in 0..4 {
        page.chord('t');
        seen.push(theme::current(&page.doc, &config));
    }

    assert_eq!(
        seen,
        vec![
            ThemePreference::Dark,
            ThemePreference::Light,
            ThemePreference::Auto,
            ThemePreference::Dark
        ]
    );
    assert_eq!(page.doc.cookie("prefers-color-scheme").as_deref(), Some("dark"));
}

#[test]
fn test_unknown_value_starts_from_auto() {
    let mut page = Page::new(1);
    page.doc.set_root_attribute("data-theme", "sepia");

    page.chord('t');

    assert_eq!(page.doc.root_attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn test_cookie_carries_preference_across_reload() {
    let mut page = Page::new(1);
    page.doc.set_cookie(&Cookie {
        name: "prefers-color-scheme".to_string(),
        value: "light".to_string(),
        path: "/".to_string(),
        max_age_secs: 31_536_000,
    });

    page.chord('t');

    assert_eq!(page.doc.root_attribute("data-theme").as_deref(), Some("auto"));
    assert_eq!(page.doc.cookie("prefers-color-scheme").as_deref(), Some("auto"));
}

#[test]
fn test_theme_change_survives_rebuild() {
    let mut page = Page::new(2);
    page.chord('t');

    page.replace_body(2);

    assert_eq!(page.doc.root_attribute("data-theme").as_deref(), Some("dark"));
    assert!(page.sent.is_empty());
}

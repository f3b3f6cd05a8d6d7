/*
Catppuccin colours used by the playground

Mocha (dark)         Latte (light)
Mauve    cba6f7      8839ef
Red      f38ba8      d20f39
Peach    fab387      fe640b
Yellow   f9e2af      df8e1d
Green    a6e3a1      40a02b
Teal     94e2d5      179299
Blue     89b4fa      1e66f5
Lavender b4befe      7287fd
Text     cdd6f4      4c4f69
Subtext0 a6adc8      6c6f85
Overlay0 6c7086      9ca0b0
Surface1 45475a      bcc0cc
Surface0 313244      ccd0da
Base     1e1e2e      eff1f5
Mantle   181825      e6e9ef
*/

use ratatui::style::{Color, Modifier, Style};

use crate::theme::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mauve: Color,
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub blue: Color,
    pub lavender: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay0: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
    pub mantle: Color,
}

impl Palette {
    /// Terminals give no reliable hint about their background, so `auto`
    /// renders dark.
    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::latte(),
            ThemePreference::Dark | ThemePreference::Auto => Self::mocha(),
        }
    }

    fn mocha() -> Self {
        Self {
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            peach: Color::Rgb(0xfa, 0xb3, 0x87),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            teal: Color::Rgb(0x94, 0xe2, 0xd5),
            blue: Color::Rgb(0x89, 0xb4, 0xfa),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay0: Color::Rgb(0x6c, 0x70, 0x86),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            surface0: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            mantle: Color::Rgb(0x18, 0x18, 0x25),
        }
    }

    fn latte() -> Self {
        Self {
            mauve: Color::Rgb(0x88, 0x39, 0xef),
            red: Color::Rgb(0xd2, 0x0f, 0x39),
            peach: Color::Rgb(0xfe, 0x64, 0x0b),
            yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
            green: Color::Rgb(0x40, 0xa0, 0x2b),
            teal: Color::Rgb(0x17, 0x92, 0x99),
            blue: Color::Rgb(0x1e, 0x66, 0xf5),
            lavender: Color::Rgb(0x72, 0x87, 0xfd),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
            overlay0: Color::Rgb(0x9c, 0xa0, 0xb0),
            surface1: Color::Rgb(0xbc, 0xc0, 0xcc),
            surface0: Color::Rgb(0xcc, 0xd0, 0xda),
            base: Color::Rgb(0xef, 0xf1, 0xf5),
            mantle: Color::Rgb(0xe6, 0xe9, 0xef),
        }
    }

    pub fn page_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.blue)
        } else {
            Style::default().fg(self.overlay0)
        }
    }

    /// Row carrying the selection marker
    pub fn marked_row_style(&self) -> Style {
        Style::default()
            .fg(self.lavender)
            .bg(self.surface1)
            .add_modifier(Modifier::BOLD)
    }

    /// Row selected by pointer, without a marker
    pub fn pointed_row_style(&self) -> Style {
        Style::default().fg(self.lavender).bg(self.surface0)
    }

    pub fn flag_state_style(&self, state: &str) -> Style {
        if state.starts_with("on") {
            Style::default().fg(self.green)
        } else {
            Style::default().fg(self.red)
        }
    }

    pub fn button_style(&self) -> Style {
        Style::default().fg(self.base).bg(self.mauve)
    }

    pub fn key_style(&self) -> Style {
        Style::default().fg(self.peach).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.subtext0)
    }
}
